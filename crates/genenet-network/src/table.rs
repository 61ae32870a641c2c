//! Minimal string grid read from CSV, TSV/MITAB or spreadsheet files.
//!
//! Every dataset this crate consumes (gene lists, DepMap links, BioGRID exports,
//! ortholog maps) arrives as either an Excel workbook or a delimited text file with
//! a header row. They are all normalised into a [`Table`] first; typed loaders then
//! pick the columns they need by name.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use crate::error::{NetworkError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Spreadsheet,
    Delimited(u8),
}

impl Format {
    fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())?;

        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            "tsv" | "tab" | "txt" | "mitab" => Some(Self::Delimited(b'\t')),
            "csv" => Some(Self::Delimited(b',')),
            _ => None,
        }
    }

    /// Workbooks are zip (xlsx/ods) or OLE (xls) containers; trust the magic
    /// bytes over the name, which browsers sometimes send as `blob`. Text without
    /// a known extension is tab-separated when its header line has tabs but no commas.
    fn detect(file_name: &str, bytes: &[u8]) -> Self {
        const ZIP: &[u8] = b"PK\x03\x04";
        const OLE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];
        if bytes.starts_with(ZIP) || bytes.starts_with(OLE) {
            return Self::Spreadsheet;
        }
        Self::from_file_name(file_name).unwrap_or_else(|| {
            let header = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
            if header.contains(&b'\t') && !header.contains(&b',') {
                Self::Delimited(b'\t')
            } else {
                Self::Delimited(b',')
            }
        })
    }
}

/// Header row plus data rows, all cells as trimmed strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| normalise_header(&h)).collect();
        Self { headers, rows }
    }

    /// Parse `bytes`, choosing the format from magic bytes or the extension of `file_name`.
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self> {
        let table = match Format::detect(file_name, bytes) {
            Format::Spreadsheet => read_spreadsheet(file_name, bytes)?,
            Format::Delimited(delimiter) => read_delimited(file_name, bytes, delimiter)?,
        };
        debug!(
            file = file_name,
            columns = table.headers.len(),
            rows = table.rows.len(),
            "Parsed table"
        );
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        Self::from_bytes(name, &bytes)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the header matching `name`, ignoring case and surrounding spaces.
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    /// First of `names` present in the header row.
    pub fn column_any(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|n| self.column(n))
    }

    /// Like [`column`](Self::column) but fails with [`NetworkError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column(name)
            .ok_or_else(|| NetworkError::MissingColumn(name.to_string()))
    }

    /// Cell text, or `""` when the row is shorter than the header.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

/// Strip BOMs and the MITAB `#` comment marker from a header cell.
fn normalise_header(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .trim_start_matches('#')
        .trim()
        .to_string()
}

fn read_delimited(file_name: &str, bytes: &[u8], delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        // MITAB cells embed quotes, e.g. psi-mi:"MI:0915"(physical association)
        .quoting(delimiter != b'\t')
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(normalise_header).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(NetworkError::EmptyTable(file_name.to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(|c| c.trim().to_string()).collect());
    }

    Ok(Table { headers, rows })
}

fn read_spreadsheet(file_name: &str, bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| NetworkError::Spreadsheet(format!("{file_name}: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| NetworkError::EmptyTable(file_name.to_string()))?
        .map_err(|e| NetworkError::Spreadsheet(format!("{file_name}: {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| NetworkError::EmptyTable(file_name.to_string()))?
        .iter()
        .map(|c| normalise_header(&cell_text(c)))
        .collect();

    let rows = rows
        .map(|r| r.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .collect();

    Ok(Table { headers, rows })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_file_name("genes.xlsx"), Some(Format::Spreadsheet));
        assert_eq!(Format::from_file_name("GENES.XLS"), Some(Format::Spreadsheet));
        assert_eq!(Format::from_file_name("biogrid.mitab"), Some(Format::Delimited(b'\t')));
        assert_eq!(Format::from_file_name("links.tsv"), Some(Format::Delimited(b'\t')));
        assert_eq!(Format::from_file_name("links.csv"), Some(Format::Delimited(b',')));
        assert_eq!(Format::from_file_name("noext"), None);
    }

    #[test]
    fn test_magic_bytes_override_extension() {
        assert_eq!(Format::detect("blob", b"PK\x03\x04rest"), Format::Spreadsheet);
        assert_eq!(Format::detect("genes.xlsx", b"Gene\nNPC1\n"), Format::Spreadsheet);
        assert_eq!(Format::detect("blob", b"Gene\nNPC1\n"), Format::Delimited(b','));
    }

    #[test]
    fn test_unnamed_text_is_sniffed() {
        assert_eq!(Format::detect("upload", b"Gene\tScore\nNPC1\t-2\n"), Format::Delimited(b'\t'));
        assert_eq!(Format::detect("upload", b"Gene,Score\nNPC1,-2\n"), Format::Delimited(b','));
        assert_eq!(Format::detect("hits.dat", b"Gene\tNote\nNPC1\ta,b\n"), Format::Delimited(b'\t'));
        let table = Table::from_bytes("upload", b"Gene\tScore\nNPC1\t-2\n").unwrap();
        assert_eq!(table.headers, vec!["Gene", "Score"]);
    }

    #[test]
    fn test_csv_columns_case_insensitive() {
        let table = Table::from_bytes("genes.csv", b"gene,Score\nNPC1,1\n NPC2 ,2\n\n").unwrap();
        assert_eq!(table.column("Gene"), Some(0));
        assert_eq!(table.column(" score "), Some(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 0), "NPC2");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_mitab_header_and_quotes() {
        let raw = "#ID Interactor A\tInteraction Types\n\
                   entrez gene/locuslink:6416\tpsi-mi:\"MI:0915\"(physical association)\n";
        let table = Table::from_bytes("bg.mitab", raw.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["ID Interactor A", "Interaction Types"]);
        assert_eq!(table.cell(0, 1), "psi-mi:\"MI:0915\"(physical association)");
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let table = Table::from_bytes("x.csv", b"a,b,c\n1\n1,2,3\n").unwrap();
        assert_eq!(table.cell(0, 2), "");
        assert_eq!(table.cell(1, 2), "3");
    }

    #[test]
    fn test_require_column_reports_name() {
        let table = Table::from_bytes("x.csv", b"a,b\n1,2\n").unwrap();
        let err = table.require_column("Gene").unwrap_err();
        assert_eq!(err.to_string(), "Missing column 'Gene'");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            Table::from_bytes("x.csv", b""),
            Err(NetworkError::EmptyTable(_))
        ));
    }

    fn links_workbook() -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["Gene", "Gene1", "corrscore", "Note"].into_iter().enumerate() {
            sheet.write_string(0, col as u16, header).unwrap();
        }
        sheet.write_string(1, 0, "NPC1").unwrap();
        sheet.write_string(1, 1, "NPC2").unwrap();
        sheet.write_number(1, 2, 0.45).unwrap();
        sheet.write_string(1, 3, "lysosomal").unwrap();
        // row 2 left blank
        sheet.write_string(3, 0, "NPC1").unwrap();
        sheet.write_string(3, 1, "LIPA").unwrap();
        sheet.write_number(3, 2, 1.0).unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_workbook_cells_as_text() {
        let table = Table::from_bytes("links.xlsx", &links_workbook()).unwrap();
        assert_eq!(table.headers, vec!["Gene", "Gene1", "corrscore", "Note"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["NPC1", "NPC2", "0.45", "lysosomal"],
                vec!["NPC1", "LIPA", "1", ""],
            ]
        );
    }

    #[test]
    fn test_workbook_detected_without_extension() {
        let bytes = links_workbook();
        assert_eq!(
            Table::from_bytes("blob", &bytes).unwrap(),
            Table::from_bytes("links.xlsx", &bytes).unwrap()
        );
    }

    #[test]
    fn test_garbage_spreadsheet_is_an_error() {
        let err = Table::from_bytes("genes.xlsx", b"not a zip file").unwrap_err();
        assert!(matches!(err, NetworkError::Spreadsheet(_)));
        assert!(err.is_client_error());
    }
}
