//! Reference datasets held in memory for the lifetime of the server.
//!
//! Expects, under the configured data directory:
//! - the DepMap links file (`Gene`, `Gene1`, `corrscore`)
//! - a BioGRID MITAB export or its processed spreadsheet
//! - optionally an ortholog map (`Gene_human`, `Gene_mouse`)
//!
//! A dataset that cannot be found or parsed is logged and left unloaded; the
//! server keeps answering `/status/` so the problem is visible to clients.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use genenet_common::ServerStatus;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::biogrid::BiogridTable;
use crate::correlation::LinksTable;
use crate::error::{NetworkError, Result};
use crate::orthologs::OrthologMap;
use crate::table::Table;

/// Where the reference files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSources {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_links_file")]
    pub links_file: String,
    #[serde(default = "default_biogrid_file")]
    pub biogrid_file: String,
    #[serde(default)]
    pub orthologs_file: Option<String>,
}

fn default_data_dir()     -> PathBuf { PathBuf::from("data") }
fn default_links_file()   -> String  { "links_achilles.xlsx".to_string() }
fn default_biogrid_file() -> String  { "biogrid_human_processed_4_4_212.xlsx".to_string() }

impl Default for DataSources {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            links_file: default_links_file(),
            biogrid_file: default_biogrid_file(),
            orthologs_file: None,
        }
    }
}

impl DataSources {
    /// Candidate locations for `file`, in lookup order.
    pub fn candidates(&self, file: &str) -> Vec<PathBuf> {
        let file_path = Path::new(file);
        if file_path.is_absolute() {
            return vec![file_path.to_path_buf()];
        }
        let mut paths = vec![self.dir.join(file)];
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(&self.dir).join(file));
        }
        paths.push(file_path.to_path_buf());
        paths
    }

    /// First existing candidate for `file`.
    pub fn resolve(&self, file: &str) -> Result<PathBuf> {
        let searched = self.candidates(file);
        searched
            .iter()
            .find(|p| p.exists())
            .cloned()
            .ok_or_else(|| NetworkError::DatasetNotFound { file: file.to_string(), searched })
    }
}

#[derive(Debug, Default)]
pub struct Datasets {
    links: Option<LinksTable>,
    biogrid: Option<BiogridTable>,
    loaded_at: Option<DateTime<Utc>>,
    errors: Vec<String>,
}

impl Datasets {
    pub fn new(links: Option<LinksTable>, biogrid: Option<BiogridTable>) -> Self {
        Self { links, biogrid, loaded_at: Some(Utc::now()), errors: Vec::new() }
    }

    /// Load every configured dataset. Never fails; see [`Datasets::status`].
    pub fn load(sources: &DataSources) -> Self {
        let mut datasets = Self::default();

        match load_links(sources) {
            Ok(links) => datasets.links = Some(links),
            Err(e) => {
                error!(error = %e, "Error loading links file");
                datasets.errors.push(format!("links: {e}"));
            }
        }

        match load_biogrid(sources) {
            Ok(biogrid) => datasets.biogrid = Some(biogrid),
            Err(e) => {
                error!(error = %e, "Error loading BioGRID file");
                datasets.errors.push(format!("biogrid: {e}"));
            }
        }

        datasets.loaded_at = Some(Utc::now());
        datasets
    }

    pub fn is_ready(&self) -> bool {
        self.links.is_some() && self.biogrid.is_some()
    }

    pub fn links(&self) -> Option<&LinksTable> {
        self.links.as_ref()
    }

    pub fn biogrid(&self) -> Option<&BiogridTable> {
        self.biogrid.as_ref()
    }

    pub fn status(&self) -> ServerStatus {
        ServerStatus {
            links_file_loaded: self.links.is_some(),
            links_file_rows: self.links.as_ref().map_or(0, |l| l.len() as u64),
            biogrid_file_loaded: self.biogrid.is_some(),
            biogrid_file_rows: self.biogrid.as_ref().map_or(0, |b| b.len() as u64),
            server_status: "running".to_string(),
            loaded_at: self.loaded_at,
            error: (!self.errors.is_empty()).then(|| self.errors.join("; ")),
        }
    }
}

fn read_table(sources: &DataSources, file: &str, what: &str) -> Result<Table> {
    let path = sources.resolve(file)?;
    info!(path = %path.display(), "Loading {what} file");
    let started = Instant::now();
    let table = Table::from_path(&path)?;
    info!(
        rows = table.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "{what} file loaded"
    );
    Ok(table)
}

fn load_links(sources: &DataSources) -> Result<LinksTable> {
    let links = LinksTable::from_table(&read_table(sources, &sources.links_file, "links")?)?;
    match &sources.orthologs_file {
        Some(file) => {
            let map = OrthologMap::from_table(&read_table(sources, file, "orthologs")?)?;
            Ok(map.map_links(&links))
        }
        None => Ok(links),
    }
}

fn load_biogrid(sources: &DataSources) -> Result<BiogridTable> {
    BiogridTable::from_table(&read_table(sources, &sources.biogrid_file, "BioGRID")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_leave_datasets_unloaded() {
        let dir = tempfile::tempdir().unwrap();
        let sources = DataSources {
            dir: dir.path().to_path_buf(),
            links_file: "absent_links.csv".into(),
            biogrid_file: "absent_biogrid.tsv".into(),
            orthologs_file: None,
        };
        let datasets = Datasets::load(&sources);
        assert!(!datasets.is_ready());

        let status = datasets.status();
        assert!(!status.links_file_loaded);
        assert_eq!(status.links_file_rows, 0);
        assert_eq!(status.server_status, "running");
        let error = status.error.unwrap();
        assert!(error.contains("absent_links.csv"));
        assert!(error.contains("absent_biogrid.tsv"));
    }

    #[test]
    fn test_resolve_prefers_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("links.csv"), "Gene,Gene1,corrscore\n").unwrap();
        let sources = DataSources { dir: dir.path().to_path_buf(), ..Default::default() };
        assert_eq!(sources.resolve("links.csv").unwrap(), dir.path().join("links.csv"));
        assert!(matches!(
            sources.resolve("nope.csv"),
            Err(NetworkError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_load_with_orthologs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("links.csv"),
            "Gene,Gene1,corrscore\nNPC1,NPC2,0.4\nNPC1,TP53,0.3\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("bg.tsv"),
            "Alt IDs Interactor A\tAlt IDs Interactor B\nhgnc:Npc1\thgnc:Npc2\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("orth.csv"),
            "Gene_human,Gene_mouse\nNPC1,Npc1\nNPC2,Npc2\n",
        )
        .unwrap();
        let sources = DataSources {
            dir: dir.path().to_path_buf(),
            links_file: "links.csv".into(),
            biogrid_file: "bg.tsv".into(),
            orthologs_file: Some("orth.csv".into()),
        };
        let datasets = Datasets::load(&sources);
        assert!(datasets.is_ready());
        let status = datasets.status();
        assert_eq!(status.links_file_rows, 1);
        assert_eq!(status.biogrid_file_rows, 1);
        assert!(status.error.is_none());
    }
}
