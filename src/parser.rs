//! Serde model of the GraphML JSON export read at startup.
//!
//! The export wraps everything in `graphml.graph`; nodes carry `@id`, edges
//! `@source`/`@target`, and both store attributes as `data` entries of
//! `{"@key": "dN", "#text": value}`. XML to JSON converters collapse
//! single-element lists into plain objects and sometimes emit numbers for
//! `#text`, so both shapes are accepted.

use crate::error::LoadError;
use serde::{Deserialize, Deserializer};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct GraphDescription {
    pub graphml: GraphMl,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphMl {
    pub graph: RawGraph,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGraph {
    #[serde(default, rename = "node", deserialize_with = "one_or_many")]
    pub nodes: Vec<RawNode>,
    #[serde(default, rename = "edge", deserialize_with = "one_or_many")]
    pub edges: Vec<RawEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub data: Vec<DataEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    #[serde(rename = "@source")]
    pub source: String,
    #[serde(rename = "@target")]
    pub target: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub data: Vec<DataEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataEntry {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "#text", default)]
    pub text: Option<serde_json::Value>,
}

impl DataEntry {
    /// `#text` as a string, whether the export stored it as a string or a number.
    pub fn text(&self) -> Option<String> {
        match self.text.as_ref()? {
            serde_json::Value::String(value) => Some(value.clone()),
            serde_json::Value::Number(value) => Some(value.to_string()),
            serde_json::Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }
}

impl GraphDescription {
    pub fn graph(&self) -> &RawGraph {
        &self.graphml.graph
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<OneOrMany<T>> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

pub fn parse_description(input: &str) -> Result<GraphDescription, LoadError> {
    let description: GraphDescription = serde_json::from_str(input)?;
    tracing::debug!(
        nodes = description.graph().nodes.len(),
        edges = description.graph().edges.len(),
        "parsed graph description"
    );
    Ok(description)
}

pub fn load_description(path: &Path) -> Result<GraphDescription, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    parse_description(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_shaped_export() {
        let input = r##"{"graphml": {"graph": {
            "node": [
                {"@id": "start", "data": [{"@key": "d0", "#text": "10"}]},
                {"@id": "end", "data": []}
            ],
            "edge": [
                {"@source": "start", "@target": "end",
                 "data": [{"@key": "d5", "#text": "3"}, {"@key": "d6", "#text": "forward"}]}
            ]
        }}}"##;
        let description = parse_description(input).unwrap();
        let graph = description.graph();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].id, "start");
        assert_eq!(graph.nodes[0].data[0].text().as_deref(), Some("10"));
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].data[1].text().as_deref(), Some("forward"));
    }

    #[test]
    fn accepts_collapsed_single_entries() {
        let input = r##"{"graphml": {"graph": {
            "node": {"@id": "start", "data": {"@key": "d0", "#text": 7}},
            "edge": {"@source": "start", "@target": "start"}
        }}}"##;
        let description = parse_description(input).unwrap();
        let graph = description.graph();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].data.len(), 1);
        assert_eq!(graph.nodes[0].data[0].text().as_deref(), Some("7"));
        assert_eq!(graph.edges.len(), 1);
        assert!(graph.edges[0].data.is_empty());
    }

    #[test]
    fn missing_edge_list_means_no_edges() {
        let input = r##"{"graphml": {"graph": {"node": []}}}"##;
        let description = parse_description(input).unwrap();
        assert!(description.graph().edges.is_empty());
    }

    #[test]
    fn rejects_non_graphml_documents() {
        let err = parse_description(r#"{"graph": {}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
