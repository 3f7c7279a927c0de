//! REST paths and payloads of the analysis backend.
//!
//! Every front-end builds request URLs from these helpers and decodes
//! responses into these types, so the wire contract lives in one place.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const NETWORK_PATH: &str = "/network";
pub const NODE_VALUES_PATH: &str = "/network/data?unique_values=True";
pub const ESTIMATE_EFFECT_PATH: &str = "/network/estimate_effect";
pub const MARKOV_BLANKET_PATH: &str = "/network/markov_blanket";
pub const INDEPENDENCE_PATH: &str = "/network/test_independence";
pub const INDEPENDENCE_LOG_PATH: &str = "/network/test_independence/log";
pub const CHAT_HISTORY_PATH: &str = "/chat_history";
pub const TRACK_ACTIONS_PATH: &str = "/track_actions";

/// Join a backend base URL and a path, tolerating a trailing slash.
#[must_use]
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{path}?{query}")
}

/// `treatment` is the `variable~value` form produced by the treatment picker.
#[must_use]
pub fn estimate_effect_path(treatment: &str, outcome: &str) -> String {
    with_query(ESTIMATE_EFFECT_PATH, &[("treatment", treatment), ("outcome", outcome)])
}

#[must_use]
pub fn markov_blanket_path(target: &str) -> String {
    with_query(MARKOV_BLANKET_PATH, &[("target", target)])
}

/// A node and the distinct values it takes in the data set.
///
/// On the wire this is a single-key object, `{"smoking": ["yes", "no"]}`.
/// Numeric values are kept as their JSON text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeValuePair {
    pub node: String,
    pub values: Vec<String>,
}

impl Serialize for NodeValuePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.node, &self.values)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for NodeValuePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairVisitor;

        impl<'de> Visitor<'de> for PairVisitor {
            type Value = NodeValuePair;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object with exactly one node key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let Some((node, raw)) = map.next_entry::<String, Vec<Value>>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                if map.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                let values = raw
                    .into_iter()
                    .map(|value| match value {
                        Value::String(text) => Ok(text),
                        Value::Number(number) => Ok(number.to_string()),
                        Value::Bool(flag) => Ok(flag.to_string()),
                        other => Err(de::Error::custom(format!("unsupported node value {other}"))),
                    })
                    .collect::<Result<_, _>>()?;
                Ok(NodeValuePair { node, values })
            }
        }

        deserializer.deserialize_map(PairVisitor)
    }
}

/// Response of `GET /network/estimate_effect`.
///
/// `causal_estimate` maps an outcome variable to metric name and value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectEstimate {
    #[serde(default)]
    pub causal_estimate: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub formula: Option<String>,
}

/// Response of `GET /network/markov_blanket`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkovBlanket {
    #[serde(rename = "markovBlanket", default)]
    pub markov_blanket: BTreeMap<String, Vec<String>>,
}

impl MarkovBlanket {
    /// Blanket members of `target`, empty when the backend did not list it.
    #[must_use]
    pub fn members(&self, target: &str) -> &[String] {
        self.markov_blanket.get(target).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Response of `GET /network/test_independence`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndependenceTests {
    #[serde(default)]
    pub independence_test_dict: Vec<IndependenceTest>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndependenceTest {
    pub independence_assumption: Vec<String>,
    #[serde(default)]
    pub conditioning_set: Vec<String>,
    pub value: f64,
}

/// Body of `PUT /network/test_independence/log`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndependenceLog {
    pub target: LoggedIndependenceTest,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedIndependenceTest {
    pub independence_assumption: Vec<String>,
    pub conditional_variables: Vec<String>,
    pub p_value: f64,
}

/// Body of `PUT /track_actions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackActions {
    pub is_tracking: bool,
}
