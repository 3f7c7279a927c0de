//! Graph elements in the node/edge shape the backend serves.
//!
//! Every element is wrapped in a `data` object on the wire:
//! `{"data": {"id": "smoking", "label": "smoking"}}` for nodes and
//! `{"data": {"id": "a->b", "source": "a", "target": "b"}}` for edges.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};

/// Error returned when building an [`ElementSet`] from raw elements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    /// Two elements share the same id.
    #[error("duplicate element id: {0}")]
    DuplicateId(String),
}

/// Canonical id of the directed edge `source -> target`.
#[must_use]
pub fn edge_id(source: &str, target: &str) -> String {
    format!("{source}->{target}")
}

/// A node or edge of the causal graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphElement {
    pub data: ElementData,
}

/// Payload of a [`GraphElement`].
///
/// Edges are tried first when decoding since a node payload never carries
/// `source`/`target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementData {
    Edge {
        id: String,
        source: String,
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Node {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl GraphElement {
    /// Build a node element whose label equals its id.
    #[must_use]
    pub fn node(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            data: ElementData::Node {
                label: Some(id.clone()),
                id,
            },
        }
    }

    /// Build an unlabeled edge keyed by [`edge_id`].
    #[must_use]
    pub fn edge(source: &str, target: &str) -> Self {
        Self {
            data: ElementData::Edge {
                id: edge_id(source, target),
                source: source.to_owned(),
                target: target.to_owned(),
                label: None,
            },
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match &self.data {
            ElementData::Edge { id, .. } | ElementData::Node { id, .. } => id,
        }
    }

    /// Display label, falling back to the id.
    #[must_use]
    pub fn label(&self) -> &str {
        match &self.data {
            ElementData::Edge { id, label, .. } | ElementData::Node { id, label } => {
                label.as_deref().unwrap_or(id.as_str())
            }
        }
    }

    #[must_use]
    pub fn is_edge(&self) -> bool {
        matches!(self.data, ElementData::Edge { .. })
    }

    #[must_use]
    pub fn is_node(&self) -> bool {
        matches!(self.data, ElementData::Node { .. })
    }

    /// `(source, target)` for edges, `None` for nodes.
    #[must_use]
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        match &self.data {
            ElementData::Edge { source, target, .. } => Some((source, target)),
            ElementData::Node { .. } => None,
        }
    }
}

/// Ordered collection of graph elements with unique ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GraphElement>", into = "Vec<GraphElement>")]
pub struct ElementSet {
    elements: Vec<GraphElement>,
}

impl ElementSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::DuplicateId`] for the first repeated id.
    pub fn from_elements(elements: Vec<GraphElement>) -> Result<Self, ElementError> {
        let mut set = Self::new();
        for element in elements {
            let id = element.id().to_owned();
            if !set.insert(element) {
                return Err(ElementError::DuplicateId(id));
            }
        }
        Ok(set)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GraphElement> {
        self.elements.iter()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphElement> {
        self.elements.iter().filter(|element| element.is_node())
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphElement> {
        self.elements.iter().filter(|element| element.is_edge())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GraphElement> {
        self.elements.iter().find(|element| element.id() == id)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }

    /// Append an element. Returns `false` (and leaves the set untouched) if
    /// the id is already present.
    pub fn insert(&mut self, element: GraphElement) -> bool {
        if self.contains(element.id()) {
            return false;
        }
        self.elements.push(element);
        true
    }

    /// Remove the element with `id`, preserving the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<GraphElement> {
        let index = self.position(id)?;
        Some(self.elements.remove(index))
    }
}

impl TryFrom<Vec<GraphElement>> for ElementSet {
    type Error = ElementError;

    fn try_from(elements: Vec<GraphElement>) -> Result<Self, Self::Error> {
        Self::from_elements(elements)
    }
}

impl From<ElementSet> for Vec<GraphElement> {
    fn from(set: ElementSet) -> Self {
        set.elements
    }
}

impl<'a> IntoIterator for &'a ElementSet {
    type Item = &'a GraphElement;
    type IntoIter = std::slice::Iter<'a, GraphElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
