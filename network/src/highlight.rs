//! Node highlighting over a base stylesheet.
//!
//! The graph view keeps one [`Stylesheet`]: a `node` and an `edge` base rule
//! followed by at most one `#id` rule per highlighted node. Tool panels only
//! ever change background colors, so a rule is just a selector plus a color.
//!
//! Overlap between groups is resolved by visiting groups in order and
//! upserting each member, so the last group that mentions a node wins.

#[cfg(test)]
#[path = "highlight_test.rs"]
mod highlight_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Background used for nodes that are not highlighted.
pub const DEFAULT_NODE_COLOR: &str = "gray";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    #[error("{groups} node groups but {colors} colors")]
    LengthMismatch { groups: usize, colors: usize },
    #[error("invalid selector: {0:?}")]
    InvalidSelector(String),
}

/// Which elements a rule applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    AllNodes,
    AllEdges,
    NodeId(String),
    Class(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllNodes => f.write_str("node"),
            Self::AllEdges => f.write_str("edge"),
            Self::NodeId(id) => write!(f, "#{id}"),
            Self::Class(class) => write!(f, ".{class}"),
        }
    }
}

impl FromStr for Selector {
    type Err = HighlightError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "node" => Ok(Self::AllNodes),
            "edge" => Ok(Self::AllEdges),
            _ => {
                if let Some(id) = raw.strip_prefix('#').filter(|id| !id.is_empty()) {
                    Ok(Self::NodeId(id.to_owned()))
                } else if let Some(class) = raw.strip_prefix('.').filter(|c| !c.is_empty()) {
                    Ok(Self::Class(class.to_owned()))
                } else {
                    Err(HighlightError::InvalidSelector(raw.to_owned()))
                }
            }
        }
    }
}

impl TryFrom<String> for Selector {
    type Error = HighlightError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: Selector,
    #[serde(rename = "background-color")]
    pub background_color: String,
}

impl StyleRule {
    #[must_use]
    pub fn new(selector: Selector, background_color: impl Into<String>) -> Self {
        Self {
            selector,
            background_color: background_color.into(),
        }
    }
}

/// One legend row: a color and what it means.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub color: String,
    pub label: String,
}

/// A named set of nodes painted one color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightGroup {
    pub label: String,
    pub color: String,
    pub node_ids: Vec<String>,
}

impl HighlightGroup {
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>, node_ids: Vec<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            node_ids,
        }
    }
}

/// Ordered highlight groups produced by a tool panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightPlan {
    pub groups: Vec<HighlightGroup>,
}

impl HighlightPlan {
    #[must_use]
    pub fn new(groups: Vec<HighlightGroup>) -> Self {
        Self { groups }
    }

    /// Legend entries, one per group, in group order.
    #[must_use]
    pub fn key(&self) -> Vec<KeyEntry> {
        self.groups
            .iter()
            .map(|group| KeyEntry {
                color: group.color.clone(),
                label: group.label.clone(),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stylesheet {
    default_color: String,
    rules: Vec<StyleRule>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Stylesheet {
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_color(DEFAULT_NODE_COLOR)
    }

    #[must_use]
    pub fn with_default_color(color: impl Into<String>) -> Self {
        let default_color = color.into();
        Self {
            rules: vec![
                StyleRule::new(Selector::AllNodes, default_color.clone()),
                StyleRule::new(Selector::AllEdges, default_color.clone()),
            ],
            default_color,
        }
    }

    #[must_use]
    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    #[must_use]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Return every rule's background to the default color.
    pub fn reset(&mut self) {
        for rule in &mut self.rules {
            rule.background_color.clone_from(&self.default_color);
        }
    }

    /// Paint `groups[i]` with `colors[i]`, optionally resetting first.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::LengthMismatch`] when the slices differ in
    /// length. The stylesheet is left untouched in that case.
    pub fn color_nodes(
        &mut self,
        groups: &[Vec<String>],
        colors: &[String],
        reset: bool,
    ) -> Result<(), HighlightError> {
        if groups.len() != colors.len() {
            return Err(HighlightError::LengthMismatch {
                groups: groups.len(),
                colors: colors.len(),
            });
        }
        if reset {
            self.reset();
        }
        for (ids, color) in groups.iter().zip(colors) {
            for id in ids {
                self.upsert(id, color);
            }
        }
        Ok(())
    }

    /// Paint every group of `plan`, optionally resetting first.
    pub fn apply(&mut self, plan: &HighlightPlan, reset: bool) {
        if reset {
            self.reset();
        }
        for group in &plan.groups {
            for id in &group.node_ids {
                self.upsert(id, &group.color);
            }
        }
    }

    /// Set the `#id` rule's color, appending the rule if it is missing.
    pub fn upsert(&mut self, node_id: &str, color: &str) {
        let existing = self
            .rules
            .iter_mut()
            .find(|rule| matches!(&rule.selector, Selector::NodeId(id) if id == node_id));
        match existing {
            Some(rule) => color.clone_into(&mut rule.background_color),
            None => self
                .rules
                .push(StyleRule::new(Selector::NodeId(node_id.to_owned()), color)),
        }
    }

    /// Effective background of a node: its `#id` rule, else the `node` rule.
    #[must_use]
    pub fn node_color(&self, node_id: &str) -> &str {
        let by_id = self
            .rules
            .iter()
            .find(|rule| matches!(&rule.selector, Selector::NodeId(id) if id == node_id));
        let base = || self.rules.iter().find(|rule| rule.selector == Selector::AllNodes);
        by_id
            .or_else(base)
            .map_or(self.default_color.as_str(), |rule| rule.background_color.as_str())
    }
}
