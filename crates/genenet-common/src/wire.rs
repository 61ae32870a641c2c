//! JSON shapes exchanged between the analysis server and its clients.
//!
//! | Endpoint | Response |
//! |----------|----------|
//! | `GET /status/` | [`ServerStatus`] |
//! | `POST /upload/` | [`NetworkGraph`] |
//!
//! Field names follow the wire contract exactly (`isInterest`, `isBiogrid`), so
//! graphs produced by older server builds that flag interaction edges with a
//! `"yes"` string still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Dataset readiness reported by `GET /status/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub links_file_loaded: bool,
    pub links_file_rows: u64,
    pub biogrid_file_loaded: bool,
    pub biogrid_file_rows: u64,
    #[serde(default)]
    pub server_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerStatus {
    /// Both reference datasets are in memory, so `/upload/` will be served.
    pub fn is_ready(&self) -> bool {
        self.links_file_loaded && self.biogrid_file_loaded
    }
}

/// A gene in the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneNode {
    pub id: String,
    #[serde(rename = "isInterest", default)]
    pub is_interest: bool,
}

/// A connection between two genes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneEdge {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(rename = "isBiogrid", default)]
    pub is_biogrid: BiogridFlag,
}

impl GeneEdge {
    pub fn kind(&self) -> EdgeKind {
        if self.is_biogrid.0 {
            EdgeKind::Interaction
        } else if self.value.unwrap_or(0.0) >= 0.0 {
            EdgeKind::PositiveCorrelation
        } else {
            EdgeKind::NegativeCorrelation
        }
    }
}

/// What an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Curated BioGRID interaction between the two genes.
    Interaction,
    PositiveCorrelation,
    NegativeCorrelation,
}

/// Whether an edge is backed by the interaction database.
///
/// Always written as a JSON bool. Read from a bool, a string (`"yes"`, `"true"`,
/// `"1"` are true, anything else false), a number (non-zero is true) or `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiogridFlag(pub bool);

impl From<bool> for BiogridFlag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl Serialize for BiogridFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for BiogridFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Number(f64),
            Text(String),
        }

        let flag = match Option::<Raw>::deserialize(deserializer)? {
            None => false,
            Some(Raw::Bool(b)) => b,
            Some(Raw::Number(n)) => n != 0.0,
            Some(Raw::Text(s)) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "yes" | "true" | "1"
            ),
        };
        Ok(Self(flag))
    }
}

/// Node/edge graph returned by `POST /upload/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkGraph {
    pub nodes: Vec<GeneNode>,
    pub edges: Vec<GeneEdge>,
}

impl NetworkGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GeneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn interest_nodes(&self) -> impl Iterator<Item = &GeneNode> {
        self.nodes.iter().filter(|n| n.is_interest)
    }

    pub fn biogrid_edges(&self) -> impl Iterator<Item = &GeneEdge> {
        self.edges.iter().filter(|e| e.is_biogrid.0)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_biogrid_flag_accepts_strings_and_bools() {
        let raw = r#"{
            "nodes": [{"id": "NPC1", "isInterest": true}, {"id": "NPC2", "isInterest": false}],
            "edges": [
                {"source": "NPC1", "target": "NPC2", "value": 0.41, "isBiogrid": "yes"},
                {"source": "NPC1", "target": "LIPA", "value": 0.22, "isBiogrid": false},
                {"source": "NPC1", "target": "SCAP", "value": -0.3, "isBiogrid": null},
                {"source": "NPC1", "target": "SREBF2", "isBiogrid": "no"}
            ]
        }"#;
        let graph: NetworkGraph = serde_json::from_str(raw).unwrap();
        let flags: Vec<bool> = graph.edges.iter().map(|e| e.is_biogrid.0).collect();
        assert_eq!(flags, vec![true, false, false, false]);
        assert_eq!(graph.edges[3].value, None);
        assert_eq!(graph.biogrid_edges().count(), 1);
    }

    #[test]
    fn test_graph_serialises_wire_names() {
        let graph = NetworkGraph {
            nodes: vec![GeneNode { id: "KRAS".into(), is_interest: true }],
            edges: vec![GeneEdge {
                source: "KRAS".into(),
                target: "RAF1".into(),
                value: Some(0.5),
                is_biogrid: BiogridFlag(true),
            }],
        };
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nodes"][0]["isInterest"], serde_json::json!(true));
        assert_eq!(json["edges"][0]["isBiogrid"], serde_json::json!(true));
        assert_eq!(json["edges"][0]["value"], serde_json::json!(0.5));
    }

    #[test]
    fn test_edge_kind() {
        let mut edge = GeneEdge {
            source: "A".into(),
            target: "B".into(),
            value: Some(-0.4),
            is_biogrid: BiogridFlag(false),
        };
        assert_eq!(edge.kind(), EdgeKind::NegativeCorrelation);
        edge.value = Some(0.0);
        assert_eq!(edge.kind(), EdgeKind::PositiveCorrelation);
        edge.is_biogrid = BiogridFlag(true);
        assert_eq!(edge.kind(), EdgeKind::Interaction);
    }

    #[test]
    fn test_status_tolerates_minimal_payload() {
        let raw = r#"{"links_file_loaded": true, "links_file_rows": 10,
                      "biogrid_file_loaded": false, "biogrid_file_rows": 0}"#;
        let status: ServerStatus = serde_json::from_str(raw).unwrap();
        assert!(status.links_file_loaded);
        assert!(!status.is_ready());
        assert_eq!(status.server_status, "");
        assert_eq!(status.error, None);
    }
}
