//! genenet-common — Wire types and errors shared by the genenet server and client.

pub mod error;
pub mod wire;

// Re-export commonly used types
pub use error::{GenenetError, Result};
pub use wire::{BiogridFlag, EdgeKind, GeneEdge, GeneNode, NetworkGraph, ServerStatus};
