//! BioGRID interaction lookup over MITAB-style exports.
//!
//! Interactor columns hold `|`-separated identifiers such as
//! `entrez gene/locuslink:MAP2K4|biogrid:112315` or
//! `hgnc:SERK1(gene name synonym)`. Only symbol-bearing namespaces are kept.
//! Symbols for each row are extracted once at load time.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::genes::GeneList;
use crate::table::Table;

const SYMBOL_NAMESPACES: &[&str] = &["hgnc", "entrez gene/locuslink"];

const COLUMNS_A: &[&str] = &[
    "ID Interactor A",
    "Alt. ID Interactor A",
    "Alt IDs Interactor A",
    "Alias(es) interactor A",
    "Aliases Interactor A",
];

const COLUMNS_B: &[&str] = &[
    "ID Interactor B",
    "Alt. ID Interactor B",
    "Alt IDs Interactor B",
    "Alias(es) interactor B",
    "Aliases Interactor B",
];

const INTERACTION_TYPE_COLUMNS: &[&str] = &["Interaction Types", "Interaction Type(s)"];

#[derive(Debug, Clone, Default, PartialEq)]
struct InteractionRow {
    symbols_a: Vec<String>,
    symbols_b: Vec<String>,
    /// `None` when the export has no such column.
    interaction_type: Option<String>,
    taxid_a: Option<String>,
    taxid_b: Option<String>,
}

/// Pre-parsed BioGRID interactions.
#[derive(Debug, Clone, Default)]
pub struct BiogridTable {
    rows: Vec<InteractionRow>,
}

impl BiogridTable {
    pub fn from_table(table: &Table) -> Result<Self> {
        let cols_a: Vec<usize> = COLUMNS_A.iter().filter_map(|c| table.column(c)).collect();
        let cols_b: Vec<usize> = COLUMNS_B.iter().filter_map(|c| table.column(c)).collect();
        if cols_a.is_empty() {
            return Err(NetworkError::MissingColumn(COLUMNS_A[1].to_string()));
        }
        if cols_b.is_empty() {
            return Err(NetworkError::MissingColumn(COLUMNS_B[1].to_string()));
        }
        let type_col = table.column_any(INTERACTION_TYPE_COLUMNS);
        let taxid_a = table.column("Taxid Interactor A");
        let taxid_b = table.column("Taxid Interactor B");

        let opt_cell = |row: usize, col: Option<usize>| col.map(|c| table.cell(row, c).to_string());

        let rows: Vec<InteractionRow> = (0..table.len())
            .map(|row| InteractionRow {
                symbols_a: extract_symbols(cols_a.iter().map(|&c| table.cell(row, c))),
                symbols_b: extract_symbols(cols_b.iter().map(|&c| table.cell(row, c))),
                interaction_type: opt_cell(row, type_col),
                taxid_a: opt_cell(row, taxid_a),
                taxid_b: opt_cell(row, taxid_b),
            })
            .collect();

        let without_symbols = rows
            .iter()
            .filter(|r| r.symbols_a.is_empty() || r.symbols_b.is_empty())
            .count();
        debug!(rows = rows.len(), without_symbols, "Parsed BioGRID interactions");

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Filters for interaction lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiogridParams {
    /// Minimum number of supporting rows for a pair to count.
    pub min_citations: usize,
    /// Keep only rows of this interaction type (when the column exists).
    pub interaction_type: Option<String>,
    /// Keep only rows where both interactors carry this taxid (when the columns exist).
    pub taxid: Option<String>,
}

impl Default for BiogridParams {
    fn default() -> Self {
        Self {
            min_citations: 2,
            interaction_type: Some(r#"psi-mi:"MI:0915"(physical association)"#.to_string()),
            taxid: None,
        }
    }
}

impl BiogridParams {
    /// Filters only apply to columns present in the export; an empty cell in a
    /// present column never matches.
    fn admits(&self, row: &InteractionRow) -> bool {
        if let (Some(wanted), Some(cell)) = (&self.interaction_type, &row.interaction_type) {
            if !cell.split('|').any(|t| t.trim() == wanted) {
                return false;
            }
        }
        if let Some(wanted) = &self.taxid {
            let matches = |cell: &Option<String>| match cell {
                None => true,
                Some(cell) => cell
                    .split('|')
                    .any(|t| t.split('(').next().unwrap_or(t).trim() == wanted),
            };
            if !matches(&row.taxid_a) || !matches(&row.taxid_b) {
                return false;
            }
        }
        true
    }
}

/// A gene of interest and one of its interaction partners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEdge {
    pub gene: String,
    pub partner: String,
    pub citations: usize,
}

/// Interaction partners of the genes of interest with at least `min_citations` support.
///
/// Gene matching is case-insensitive; self-interactions are dropped. Output is
/// sorted by (gene, partner).
pub fn interaction_edges(
    table: &BiogridTable,
    genes: &GeneList,
    params: &BiogridParams,
) -> Vec<InteractionEdge> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();

    let mut emit = |from: &[String], to: &[String]| {
        for a in from.iter().filter(|a| genes.contains_ignore_case(a)) {
            for b in to.iter().filter(|b| !b.eq_ignore_ascii_case(a)) {
                *counts.entry((a.clone(), b.clone())).or_default() += 1;
            }
        }
    };

    for row in table.rows.iter().filter(|r| params.admits(r)) {
        emit(&row.symbols_a, &row.symbols_b);
        emit(&row.symbols_b, &row.symbols_a);
    }

    counts
        .into_iter()
        .filter(|(_, n)| *n >= params.min_citations)
        .map(|((gene, partner), citations)| InteractionEdge { gene, partner, citations })
        .collect()
}

/// Exact lookup of directed (gene, partner) pairs.
#[derive(Debug, Clone, Default)]
pub struct InteractionSet {
    pairs: HashSet<(String, String)>,
}

impl InteractionSet {
    pub fn contains(&self, gene: &str, partner: &str) -> bool {
        self.pairs.contains(&(gene.to_string(), partner.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> FromIterator<&'a InteractionEdge> for InteractionSet {
    fn from_iter<I: IntoIterator<Item = &'a InteractionEdge>>(iter: I) -> Self {
        let pairs = iter
            .into_iter()
            .map(|e| (e.gene.clone(), e.partner.clone()))
            .collect();
        Self { pairs }
    }
}

/// Gene symbols found in a set of MITAB identifier cells.
fn extract_symbols<'a>(cells: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for entry in cells.flat_map(|c| c.split('|')) {
        if let Some(symbol) = parse_symbol(entry) {
            if seen.insert(symbol.to_uppercase()) {
                symbols.push(symbol);
            }
        }
    }
    symbols
}

fn parse_symbol(entry: &str) -> Option<String> {
    let entry = entry.trim();
    let (namespace, _) = entry.split_once(':')?;
    let namespace = namespace.trim().trim_matches('"').to_ascii_lowercase();
    if !SYMBOL_NAMESPACES.contains(&namespace.as_str()) {
        return None;
    }
    let head = entry.split('(').next().unwrap_or(entry);
    let symbol = head.rsplit(':').next().unwrap_or(head).trim().trim_matches('"');
    if symbol.is_empty() || symbol == "-" || symbol.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(symbol.to_string())
}
