use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

pub const LOCATION_COLUMN: &str = "Location_Main";
pub const PRICE_COLUMN: &str = "Price";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// The three files the extraction pipeline may leave in the results directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    ToursJson,
    ToursXlsx,
    RefinedXlsx,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::ToursJson,
        ArtifactKind::ToursXlsx,
        ArtifactKind::RefinedXlsx,
    ];

    /// File name inside the results directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::ToursJson => "tours_extracted.json",
            ArtifactKind::ToursXlsx => "tours_extracted.xlsx",
            ArtifactKind::RefinedXlsx => "tours_extracted_refined.xlsx",
        }
    }

    /// File name the artifact is offered under for download.
    pub fn download_name(self) -> &'static str {
        match self {
            ArtifactKind::ToursJson => "tours.json",
            ArtifactKind::ToursXlsx => "tours.xlsx",
            ArtifactKind::RefinedXlsx => "tours_refined.xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ArtifactKind::ToursJson => "application/json",
            ArtifactKind::ToursXlsx | ArtifactKind::RefinedXlsx => XLSX_CONTENT_TYPE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::ToursJson => "JSON",
            ArtifactKind::ToursXlsx => "Excel",
            ArtifactKind::RefinedXlsx => "Refined Excel",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRef {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub exists: bool,
}

/// Presence of every artifact, resolved once per rendering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPresence {
    refs: [ArtifactRef; 3],
}

impl ArtifactPresence {
    pub fn new(tours_json: ArtifactRef, tours_xlsx: ArtifactRef, refined_xlsx: ArtifactRef) -> Self {
        Self {
            refs: [tours_json, tours_xlsx, refined_xlsx],
        }
    }

    pub fn get(&self, kind: ArtifactKind) -> &ArtifactRef {
        match kind {
            ArtifactKind::ToursJson => &self.refs[0],
            ArtifactKind::ToursXlsx => &self.refs[1],
            ArtifactKind::RefinedXlsx => &self.refs[2],
        }
    }

    pub fn is_present(&self, kind: ArtifactKind) -> bool {
        self.get(kind).exists
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtifactRef> {
        self.refs.iter()
    }

    pub fn present(&self) -> impl Iterator<Item = &ArtifactRef> {
        self.refs.iter().filter(|r| r.exists)
    }
}

/// Contents of the JSON artifact. Individual tours are kept opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TourResults {
    pub tours: Vec<serde_json::Value>,
}

impl TourResults {
    pub fn total(&self) -> usize {
        self.tours.len()
    }
}

/// A single spreadsheet cell after decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric reading of the cell. Text holding a number counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Grouping key for categorical columns; empty cells have none.
    pub fn as_key(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Header row plus body rows of the first worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Rows are padded or cut to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

/// Typed view over the refined spreadsheet: both columns are optional.
#[derive(Debug, Clone, Copy)]
pub struct RefinedView<'a> {
    table: &'a Table,
    location: Option<usize>,
    price: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefinedRow {
    pub location_main: Option<String>,
    pub price: Option<f64>,
}

impl<'a> RefinedView<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            location: table.column_index(LOCATION_COLUMN),
            price: table.column_index(PRICE_COLUMN),
        }
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }

    pub fn rows(&self) -> impl Iterator<Item = RefinedRow> + 'a {
        let (location, price) = (self.location, self.price);
        self.table.rows().iter().map(move |row| RefinedRow {
            location_main: location.and_then(|i| row[i].as_key()),
            price: price.and_then(|i| row[i].as_number()),
        })
    }

    pub fn locations(&self) -> Option<impl Iterator<Item = String> + 'a> {
        self.has_location()
            .then(|| self.rows().filter_map(|row| row.location_main))
    }

    pub fn prices(&self) -> Option<impl Iterator<Item = f64> + 'a> {
        self.has_price().then(|| self.rows().filter_map(|row| row.price))
    }
}

/// Summary statistics shown in the metrics panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_tours: usize,
    pub city_count: Option<usize>,
    pub average_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

/// Counts per distinct value, most frequent first, ties in first-seen order.
pub fn count_by_value<I>(values: I) -> Vec<LocationCount>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<LocationCount> = Vec::new();

    for value in values {
        match index.get(&value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push(LocationCount {
                    location: value,
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
