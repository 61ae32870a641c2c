//! Text summary of a received network.

use std::fmt;

use genenet_common::{EdgeKind, NetworkGraph};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSummary {
    pub nodes: usize,
    pub interest_nodes: usize,
    pub edges: usize,
    pub interaction_edges: usize,
    pub positive_edges: usize,
    pub negative_edges: usize,
    /// Edge with the largest absolute correlation: (source, target, value).
    pub strongest: Option<(String, String, f64)>,
}

impl From<&NetworkGraph> for GraphSummary {
    fn from(graph: &NetworkGraph) -> Self {
        let mut summary = GraphSummary {
            nodes: graph.nodes.len(),
            interest_nodes: graph.interest_nodes().count(),
            edges: graph.edges.len(),
            ..Default::default()
        };

        for edge in &graph.edges {
            match edge.kind() {
                EdgeKind::Interaction => summary.interaction_edges += 1,
                EdgeKind::PositiveCorrelation => summary.positive_edges += 1,
                EdgeKind::NegativeCorrelation => summary.negative_edges += 1,
            }
            if let Some(value) = edge.value {
                let stronger = summary
                    .strongest
                    .as_ref()
                    .map_or(true, |(_, _, best)| value.abs() > best.abs());
                if stronger {
                    summary.strongest = Some((edge.source.clone(), edge.target.clone(), value));
                }
            }
        }
        summary
    }
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Genes:  {} ({} of interest)", self.nodes, self.interest_nodes)?;
        writeln!(
            f,
            "Edges:  {} ({} BioGRID, {} positive, {} negative correlation)",
            self.edges, self.interaction_edges, self.positive_edges, self.negative_edges
        )?;
        match &self.strongest {
            Some((source, target, value)) => {
                write!(f, "Strongest correlation: {source} - {target} ({value:.3})")
            }
            None => write!(f, "No correlated genes above threshold"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genenet_common::{BiogridFlag, GeneEdge, GeneNode};
    use pretty_assertions::assert_eq;

    fn edge(source: &str, target: &str, value: f64, biogrid: bool) -> GeneEdge {
        GeneEdge {
            source: source.into(),
            target: target.into(),
            value: Some(value),
            is_biogrid: BiogridFlag(biogrid),
        }
    }

    #[test]
    fn test_summary_counts() {
        let graph = NetworkGraph {
            nodes: vec![
                GeneNode { id: "NPC1".into(), is_interest: true },
                GeneNode { id: "NPC2".into(), is_interest: false },
                GeneNode { id: "MDM2".into(), is_interest: false },
                GeneNode { id: "LIPA".into(), is_interest: false },
            ],
            edges: vec![
                edge("NPC1", "NPC2", 0.52, true),
                edge("NPC1", "LIPA", 0.33, false),
                edge("NPC1", "MDM2", -0.61, false),
            ],
        };
        let summary = GraphSummary::from(&graph);
        assert_eq!(summary.nodes, 4);
        assert_eq!(summary.interest_nodes, 1);
        assert_eq!(
            (summary.interaction_edges, summary.positive_edges, summary.negative_edges),
            (1, 1, 1)
        );
        assert_eq!(summary.strongest, Some(("NPC1".into(), "MDM2".into(), -0.61)));
        assert!(summary.to_string().contains("NPC1 - MDM2 (-0.610)"));
    }

    #[test]
    fn test_empty_graph_summary() {
        let summary = GraphSummary::from(&NetworkGraph::default());
        assert_eq!(summary, GraphSummary::default());
        assert!(summary.to_string().ends_with("No correlated genes above threshold"));
    }
}
