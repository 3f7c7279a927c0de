//! View models shared by the statistical tool panels.
//!
//! Panels stay thin: they fetch through the API helper, then hand the
//! decoded payload to these functions to get table rows, highlight plans,
//! and request bodies.

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;

use std::fmt;

use crate::api::{EffectEstimate, IndependenceLog, IndependenceTests, LoggedIndependenceTest, NodeValuePair};
use crate::highlight::{HighlightGroup, HighlightPlan};

pub const TREATMENT_COLOR: &str = "blue";
pub const OUTCOME_COLOR: &str = "orange";
pub const TARGET_COLOR: &str = "red";
pub const BLANKET_COLOR: &str = "blue";
pub const INDEPENDENT_COLOR: &str = "blue";
pub const CONDITIONAL_COLOR: &str = "orange";

const TREATMENT_SEPARATOR: char = '~';

/// A treatment variable, optionally pinned to one of its values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreatmentChoice {
    pub variable: String,
    pub value: Option<String>,
}

impl TreatmentChoice {
    #[must_use]
    pub fn new(variable: impl Into<String>, value: Option<String>) -> Self {
        Self {
            variable: variable.into(),
            value,
        }
    }

    /// Parse the `variable~value` query form.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(TREATMENT_SEPARATOR) {
            Some((variable, value)) => Self::new(variable, Some(value.to_owned())),
            None => Self::new(raw, None),
        }
    }

    /// The `variable~value` form sent as the `treatment` query parameter.
    #[must_use]
    pub fn query(&self) -> String {
        match &self.value {
            Some(value) => format!("{}{TREATMENT_SEPARATOR}{value}", self.variable),
            None => self.variable.clone(),
        }
    }
}

impl fmt::Display for TreatmentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} = {value}", self.variable),
            None => f.write_str(&self.variable),
        }
    }
}

/// Treatment and outcome picked in the effect panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectSelection {
    pub treatment: Option<TreatmentChoice>,
    pub outcome: Option<String>,
}

impl EffectSelection {
    /// Treatment candidates, minus the variable already chosen as outcome.
    #[must_use]
    pub fn treatment_options<'a>(&self, pairs: &'a [NodeValuePair]) -> Vec<&'a NodeValuePair> {
        pairs
            .iter()
            .filter(|pair| self.outcome.as_deref() != Some(pair.node.as_str()))
            .collect()
    }

    /// Outcome candidates, minus the treatment variable.
    #[must_use]
    pub fn outcome_options<'a>(&self, pairs: &'a [NodeValuePair]) -> Vec<&'a str> {
        let treatment = self.treatment.as_ref().map(|choice| choice.variable.as_str());
        pairs
            .iter()
            .map(|pair| pair.node.as_str())
            .filter(|node| Some(*node) != treatment)
            .collect()
    }

    /// `(treatment query, outcome)` once both are chosen.
    #[must_use]
    pub fn request(&self) -> Option<(String, String)> {
        match (&self.treatment, &self.outcome) {
            (Some(treatment), Some(outcome)) => Some((treatment.query(), outcome.clone())),
            _ => None,
        }
    }

    /// Highlight for the current selection. Nothing is painted until a
    /// treatment is chosen.
    #[must_use]
    pub fn plan(&self) -> Option<HighlightPlan> {
        let treatment = self.treatment.as_ref()?;
        Some(HighlightPlan::new(vec![
            HighlightGroup::new("Treatment (doing)", TREATMENT_COLOR, vec![treatment.variable.clone()]),
            HighlightGroup::new("Effect variable", OUTCOME_COLOR, self.outcome.iter().cloned().collect()),
        ]))
    }
}

/// One row of the effect table.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectRow {
    pub metric: String,
    pub value: f64,
    pub color: String,
}

/// Text color for an effect value: pale green for small values, darker as
/// the value approaches one.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn effect_color(value: f64) -> String {
    const TARGET_GREEN: f64 = 128.0;
    let scale = value.max(0.25);
    let red_blue = (255.0 * (1.0 - scale)).floor() as i64;
    let green = (255.0 + scale * (TARGET_GREEN - 255.0)).floor() as i64;
    format!("rgb({red_blue},{green},{red_blue})")
}

/// Rows for `outcome`, in metric order. Empty if the estimate has no entry
/// for it.
#[must_use]
pub fn effect_rows(estimate: &EffectEstimate, outcome: &str) -> Vec<EffectRow> {
    estimate
        .causal_estimate
        .get(outcome)
        .into_iter()
        .flatten()
        .map(|(metric, value)| EffectRow {
            metric: metric.clone(),
            value: *value,
            color: effect_color(*value),
        })
        .collect()
}

/// Target in red and its blanket in blue.
///
/// The legend should only be replaced when `members` is non-empty.
#[must_use]
pub fn markov_blanket_plan(target: &str, members: &[String]) -> HighlightPlan {
    HighlightPlan::new(vec![
        HighlightGroup::new("Target variable", TARGET_COLOR, vec![target.to_owned()]),
        HighlightGroup::new("Markov blanket", BLANKET_COLOR, members.to_vec()),
    ])
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndependenceRow {
    pub id: usize,
    pub independence_assumption: Vec<String>,
    pub conditional_variables: Vec<String>,
    pub p_value: f64,
}

impl IndependenceRow {
    #[must_use]
    pub fn plan(&self) -> HighlightPlan {
        HighlightPlan::new(vec![
            HighlightGroup::new(
                "Independent variables",
                INDEPENDENT_COLOR,
                self.independence_assumption.clone(),
            ),
            HighlightGroup::new(
                "Conditional variable(s)",
                CONDITIONAL_COLOR,
                self.conditional_variables.clone(),
            ),
        ])
    }

    /// Body recording that the user inspected this row.
    #[must_use]
    pub fn log_body(&self) -> IndependenceLog {
        IndependenceLog {
            target: LoggedIndependenceTest {
                independence_assumption: self.independence_assumption.clone(),
                conditional_variables: self.conditional_variables.clone(),
                p_value: self.p_value,
            },
        }
    }
}

/// Round half up to two decimals.
#[must_use]
pub fn round_p_value(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

#[must_use]
pub fn independence_rows(tests: &IndependenceTests) -> Vec<IndependenceRow> {
    tests
        .independence_test_dict
        .iter()
        .enumerate()
        .map(|(id, test)| IndependenceRow {
            id,
            independence_assumption: test.independence_assumption.clone(),
            conditional_variables: test.conditioning_set.clone(),
            p_value: round_p_value(test.value),
        })
        .collect()
}

/// Wall-clock fields used to name downloaded transcripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalTimestamp {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// `chat_history_dd-mm-yyyy-hh.mm.ss.txt`
#[must_use]
pub fn chat_history_file_name(at: LocalTimestamp) -> String {
    format!(
        "chat_history_{:02}-{:02}-{}-{:02}.{:02}.{:02}.txt",
        at.day, at.month, at.year, at.hour, at.minute, at.second
    )
}
