//! Joins correlation and interaction edges into the graph served to clients.

use std::collections::HashSet;

use genenet_common::{BiogridFlag, GeneEdge, GeneNode, NetworkGraph};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::biogrid::{interaction_edges, BiogridParams, InteractionSet};
use crate::correlation::{correlation_edges, CorrelationLink, CorrelationParams};
use crate::datasets::Datasets;
use crate::error::{NetworkError, Result};
use crate::genes::GeneList;
use crate::table::Table;

/// Per-request analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_num")]
    pub num: usize,
    #[serde(default = "bool_true")]
    pub positive: bool,
    #[serde(default = "default_min_citations")]
    pub min_citations: usize,
    #[serde(default = "default_interaction_type")]
    pub interaction_type: Option<String>,
    #[serde(default)]
    pub taxid: Option<String>,
}

fn default_threshold()     -> f64   { 0.2 }
fn default_num()           -> usize { 3 }
fn bool_true()             -> bool  { true }
fn default_min_citations() -> usize { 2 }
fn default_interaction_type() -> Option<String> {
    BiogridParams::default().interaction_type
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            num: default_num(),
            positive: bool_true(),
            min_citations: default_min_citations(),
            interaction_type: default_interaction_type(),
            taxid: None,
        }
    }
}

impl AnalysisParams {
    pub fn correlation(&self) -> CorrelationParams {
        CorrelationParams { threshold: self.threshold, positive: self.positive, num: self.num }
    }

    pub fn biogrid(&self) -> BiogridParams {
        BiogridParams {
            min_citations: self.min_citations,
            interaction_type: self.interaction_type.clone(),
            taxid: self.taxid.clone(),
        }
    }
}

/// One edge per correlation link, flagged when BioGRID also reports the pair.
///
/// Interaction-only pairs do not add edges. Nodes are the edge endpoints in order
/// of first appearance.
pub fn assemble(
    genes: &GeneList,
    correlations: &[CorrelationLink],
    interactions: &InteractionSet,
) -> NetworkGraph {
    let edges: Vec<GeneEdge> = correlations
        .iter()
        .map(|link| GeneEdge {
            source: link.gene.clone(),
            target: link.gene1.clone(),
            value: Some(link.corrscore),
            is_biogrid: BiogridFlag(interactions.contains(&link.gene, &link.gene1)),
        })
        .collect();

    let mut seen = HashSet::new();
    let nodes = edges
        .iter()
        .flat_map(|e| [e.source.as_str(), e.target.as_str()])
        .filter(|id| seen.insert(*id))
        .map(|id| GeneNode { id: id.to_string(), is_interest: genes.contains(id) })
        .collect();

    NetworkGraph { nodes, edges }
}

/// Full pipeline for one uploaded genes sheet.
pub fn build_network(
    datasets: &Datasets,
    genes_table: &Table,
    params: &AnalysisParams,
) -> Result<NetworkGraph> {
    let correlation = params.correlation();
    correlation.validate()?;

    let (Some(links), Some(biogrid)) = (datasets.links(), datasets.biogrid()) else {
        return Err(NetworkError::NotReady);
    };

    let genes = GeneList::from_table(genes_table)?;
    let correlations = correlation_edges(links, &genes, &correlation);
    let interactions = interaction_edges(biogrid, &genes, &params.biogrid());
    let interaction_set: InteractionSet = interactions.iter().collect();

    let graph = assemble(&genes, &correlations, &interaction_set);
    info!(
        genes = genes.len(),
        correlation_edges = correlations.len(),
        interaction_pairs = interactions.len(),
        nodes = graph.nodes.len(),
        biogrid_edges = graph.biogrid_edges().count(),
        "Built gene network"
    );
    Ok(graph)
}
