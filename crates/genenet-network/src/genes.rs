//! Genes of interest read from an uploaded sheet with a `Gene` column.

use std::collections::HashSet;

use crate::error::Result;
use crate::table::Table;

pub const GENE_COLUMN: &str = "Gene";

/// Ordered, de-duplicated list of gene symbols.
#[derive(Debug, Clone, Default)]
pub struct GeneList {
    genes: Vec<String>,
    exact: HashSet<String>,
    upper: HashSet<String>,
}

impl GeneList {
    pub fn from_table(table: &Table) -> Result<Self> {
        let col = table.require_column(GENE_COLUMN)?;
        Ok((0..table.len()).map(|row| table.cell(row, col)).collect())
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(|g| g.as_str())
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.exact.contains(gene)
    }

    pub fn contains_ignore_case(&self, gene: &str) -> bool {
        self.upper.contains(&gene.to_uppercase())
    }
}

impl<S: AsRef<str>> FromIterator<S> for GeneList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = GeneList::default();
        for gene in iter {
            let gene = gene.as_ref().trim();
            if gene.is_empty() || !list.exact.insert(gene.to_string()) {
                continue;
            }
            list.upper.insert(gene.to_uppercase());
            list.genes.push(gene.to_string());
        }
        list
    }
}
