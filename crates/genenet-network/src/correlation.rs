//! DepMap co-essentiality links and top-N partner selection.
//!
//! The links table has one row per gene pair with a Pearson correlation of their
//! CRISPR knockout effects across cell lines (`Gene`, `Gene1`, `corrscore`).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::genes::GeneList;
use crate::table::Table;

/// One co-essentiality link.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationLink {
    pub gene: String,
    pub gene1: String,
    pub corrscore: f64,
}

impl CorrelationLink {
    pub fn new(gene: impl Into<String>, gene1: impl Into<String>, corrscore: f64) -> Self {
        Self { gene: gene.into(), gene1: gene1.into(), corrscore }
    }
}

/// All links loaded from the reference dataset.
#[derive(Debug, Clone, Default)]
pub struct LinksTable {
    links: Vec<CorrelationLink>,
}

impl LinksTable {
    pub fn new(links: Vec<CorrelationLink>) -> Self {
        Self { links }
    }

    /// Read `Gene`, `Gene1`, `corrscore` columns. Rows with a non-numeric score are skipped.
    pub fn from_table(table: &Table) -> Result<Self> {
        let gene = table.require_column("Gene")?;
        let gene1 = table.require_column("Gene1")?;
        let score = table.require_column("corrscore")?;

        let mut links = Vec::with_capacity(table.len());
        let mut skipped = 0usize;
        for row in 0..table.len() {
            let (a, b) = (table.cell(row, gene), table.cell(row, gene1));
            match table.cell(row, score).parse::<f64>() {
                Ok(s) if s.is_finite() && !a.is_empty() && !b.is_empty() => {
                    links.push(CorrelationLink::new(a, b, s));
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "Skipped links without a usable corrscore");
        }
        Ok(Self { links })
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CorrelationLink> {
        self.links.iter()
    }
}

/// Selection parameters for co-essential partners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationParams {
    /// Minimum score in positive mode, maximum score in negative mode.
    pub threshold: f64,
    /// Positively (true) or negatively (false) correlated partners.
    pub positive: bool,
    /// Partners kept per gene of interest.
    pub num: usize,
}

impl Default for CorrelationParams {
    fn default() -> Self {
        Self { threshold: 0.2, positive: true, num: 3 }
    }
}

impl CorrelationParams {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(-1.0..=1.0).contains(&self.threshold) {
            return Err(NetworkError::InvalidParameter(format!(
                "threshold must be between -1 and 1, got {}",
                self.threshold
            )));
        }
        if self.num == 0 {
            return Err(NetworkError::InvalidParameter(
                "num must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn admits(&self, score: f64) -> bool {
        if self.positive {
            score >= self.threshold && score > 0.0
        } else {
            score <= self.threshold && score < 0.0
        }
    }
}

/// Strongest `num` partners for every gene of interest.
///
/// Groups come out in ascending gene order; within a group the strongest link is
/// first and equal scores keep their dataset order.
pub fn correlation_edges(
    links: &LinksTable,
    genes: &GeneList,
    params: &CorrelationParams,
) -> Vec<CorrelationLink> {
    let mut grouped: BTreeMap<&str, Vec<&CorrelationLink>> = BTreeMap::new();
    for link in links.iter() {
        if genes.contains(&link.gene) && params.admits(link.corrscore) {
            grouped.entry(link.gene.as_str()).or_default().push(link);
        }
    }

    let mut out = Vec::new();
    for (_, mut group) in grouped {
        // sort_by is stable, so ties stay in dataset order
        group.sort_by(|a, b| {
            let ord = b.corrscore.partial_cmp(&a.corrscore).unwrap_or(Ordering::Equal);
            if params.positive { ord } else { ord.reverse() }
        });
        out.extend(group.into_iter().take(params.num).cloned());
    }
    out
}
