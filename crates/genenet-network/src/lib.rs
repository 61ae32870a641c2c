//! genenet-network — Builds gene networks from DepMap co-essentiality links and
//! BioGRID interactions.
//!
//! The pipeline for one request:
//!
//! 1. read the uploaded genes-of-interest sheet ([`GeneList`]),
//! 2. pick the strongest correlated partners per gene ([`correlation_edges`]),
//! 3. collect well-cited BioGRID partners ([`interaction_edges`]),
//! 4. join both into a [`NetworkGraph`](genenet_common::NetworkGraph) ([`assemble`]).
//!
//! The reference tables are loaded once into [`Datasets`] and shared read-only.

pub mod error;
pub mod table;
pub mod genes;
pub mod correlation;
pub mod biogrid;
pub mod orthologs;
pub mod assemble;
pub mod datasets;

pub use error::{NetworkError, Result};
pub use table::Table;
pub use genes::GeneList;
pub use correlation::{correlation_edges, CorrelationLink, CorrelationParams, LinksTable};
pub use biogrid::{interaction_edges, BiogridParams, BiogridTable, InteractionEdge, InteractionSet};
pub use orthologs::OrthologMap;
pub use assemble::{assemble, build_network, AnalysisParams};
pub use datasets::{DataSources, Datasets};
