//! Human → model-organism ortholog mapping for the links dataset.
//!
//! DepMap links are computed on human cell lines. For a mouse screen the links are
//! re-keyed on mouse orthologs so uploaded mouse gene lists match directly.

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::correlation::{CorrelationLink, LinksTable};
use crate::error::Result;
use crate::table::Table;

#[derive(Debug, Clone, Default)]
pub struct OrthologMap {
    map: HashMap<String, Vec<String>>,
}

impl OrthologMap {
    /// Read `Gene_human` / `Gene_mouse` columns; one human gene may repeat.
    pub fn from_table(table: &Table) -> Result<Self> {
        let human = table.require_column("Gene_human")?;
        let mouse = table.require_column("Gene_mouse")?;

        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for row in 0..table.len() {
            let (h, m) = (table.cell(row, human), table.cell(row, mouse));
            if h.is_empty() || m.is_empty() {
                continue;
            }
            let targets = map.entry(h.to_string()).or_default();
            if !targets.iter().any(|t| t == m) {
                targets.push(m.to_string());
            }
        }
        Ok(Self { map })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn orthologs(&self, human: &str) -> &[String] {
        self.map.get(human).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Re-key every link on orthologs of both endpoints.
    ///
    /// Links with an unmapped endpoint are dropped; when several human pairs map to
    /// the same ortholog pair the first score wins.
    pub fn map_links(&self, links: &LinksTable) -> LinksTable {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut mapped = Vec::new();

        for link in links.iter() {
            for a in self.orthologs(&link.gene) {
                for b in self.orthologs(&link.gene1) {
                    if seen.insert((a.clone(), b.clone())) {
                        mapped.push(CorrelationLink::new(a.clone(), b.clone(), link.corrscore));
                    }
                }
            }
        }

        info!(
            human_links = links.len(),
            mapped_links = mapped.len(),
            "Mapped links onto orthologs"
        );
        LinksTable::new(mapped)
    }
}
