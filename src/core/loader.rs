use crate::domain::model::{ArtifactRef, CellValue, Table, TourResults};
use crate::domain::ports::Storage;
use crate::utils::error::{ReportError, Result};
use calamine::{Data, Reader, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;

/// Reads artifacts into memory. Absent artifacts are skipped, never an error.
pub struct ResultLoader<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> ResultLoader<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn load_tours(&self, artifact: &ArtifactRef) -> Result<Option<TourResults>> {
        if !artifact.exists {
            tracing::debug!("Skipping {}: not present", artifact.kind);
            return Ok(None);
        }

        let bytes = self.storage.read_file(artifact.kind.file_name())?;
        let results = parse_tours(&bytes, artifact.kind.file_name())?;
        tracing::info!("Loaded {} tours from {}", results.total(), artifact.kind);
        Ok(Some(results))
    }

    pub fn load_table(&self, artifact: &ArtifactRef) -> Result<Option<Table>> {
        if !artifact.exists {
            tracing::debug!("Skipping {}: not present", artifact.kind);
            return Ok(None);
        }

        let bytes = self.storage.read_file(artifact.kind.file_name())?;
        let table = parse_workbook(bytes, artifact.kind.file_name())?;
        tracing::info!(
            "Loaded {} rows x {} columns from {}",
            table.nrows(),
            table.ncols(),
            artifact.kind
        );
        Ok(Some(table))
    }
}

/// Parses the JSON artifact. The top level must be an object; a missing
/// `tours` key means no tours, a non-list `tours` is malformed.
pub fn parse_tours(bytes: &[u8], artifact: &str) -> Result<TourResults> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| ReportError::parse(artifact, e))?;

    let object = value
        .as_object()
        .ok_or_else(|| ReportError::parse(artifact, "top-level value is not an object"))?;

    match object.get("tours") {
        None | Some(serde_json::Value::Null) => {
            tracing::warn!("{} has no 'tours' list, counting zero tours", artifact);
            Ok(TourResults::default())
        }
        Some(serde_json::Value::Array(tours)) => Ok(TourResults {
            tours: tours.clone(),
        }),
        Some(_) => Err(ReportError::parse(artifact, "'tours' is not a list")),
    }
}

/// Parses the first worksheet: row one is the header, the rest is data.
///
/// Column positions count from column A even when the leading columns
/// are empty.
pub fn parse_workbook(bytes: Vec<u8>, artifact: &str) -> Result<Table> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| ReportError::parse(artifact, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::parse(artifact, "workbook has no worksheets"))?
        .map_err(|e| ReportError::parse(artifact, e))?;

    let offset = range.start().map_or(0, |(_, col)| col as usize);
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_names(header_row, offset),
        None => return Ok(Table::default()),
    };

    let body = rows
        .map(|row| {
            std::iter::repeat(CellValue::Empty)
                .take(offset)
                .chain(row.iter().map(cell_value))
                .collect()
        })
        .collect();

    Ok(Table::new(headers, body))
}

/// Header names are kept as written. Blank headers become `Unnamed: <i>`
/// with `i` counted from column A; repeats get a `.1`, `.2` suffix.
fn header_names(row: &[Data], offset: usize) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    let leading = (0..offset).map(|i| format!("Unnamed: {}", i));
    let named = row.iter().enumerate().map(|(i, cell)| match cell_value(cell) {
        CellValue::Empty => format!("Unnamed: {}", offset + i),
        value => value.to_string(),
    });

    leading
        .chain(named)
        .map(|base| {
            let n = seen.entry(base.clone()).or_insert(0);
            let name = if *n == 0 {
                base
            } else {
                format!("{}.{}", base, n)
            };
            *n += 1;
            name
        })
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Text(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::MemoryStorage;
    use crate::domain::model::ArtifactKind;
    use std::path::PathBuf;

    fn artifact(kind: ArtifactKind, exists: bool) -> ArtifactRef {
        ArtifactRef {
            kind,
            path: PathBuf::from(kind.file_name()),
            exists,
        }
    }

    #[test]
    fn test_parse_tours_counts_list() {
        let results = parse_tours(br#"{"tours": [{"name": "a"}, {"name": "b"}, 3]}"#, "t.json")
            .unwrap();
        assert_eq!(results.total(), 3);
    }

    #[test]
    fn test_parse_tours_empty_and_missing() {
        assert_eq!(parse_tours(br#"{"tours": []}"#, "t.json").unwrap().total(), 0);
        assert_eq!(parse_tours(br#"{"meta": {}}"#, "t.json").unwrap().total(), 0);
    }

    #[test]
    fn test_parse_tours_rejects_malformed() {
        let err = parse_tours(b"{\"tours\": [", "t.json").unwrap_err();
        assert!(matches!(err, ReportError::ParseError { .. }));

        let err = parse_tours(b"[1, 2]", "t.json").unwrap_err();
        assert!(matches!(err, ReportError::ParseError { .. }));

        let err = parse_tours(br#"{"tours": "many"}"#, "t.json").unwrap_err();
        assert!(matches!(err, ReportError::ParseError { .. }));
    }

    #[test]
    fn test_parse_workbook_rejects_garbage() {
        let err = parse_workbook(b"not a spreadsheet".to_vec(), "r.xlsx").unwrap_err();
        match err {
            ReportError::ParseError { artifact, .. } => assert_eq!(artifact, "r.xlsx"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_header_names_fill_blanks_and_dedupe() {
        let row = vec![
            Data::String("Price".into()),
            Data::Empty,
            Data::String("Price".into()),
            Data::Float(2024.0),
        ];
        assert_eq!(
            header_names(&row, 0),
            vec!["Price", "Unnamed: 1", "Price.1", "2024"]
        );
    }

    #[test]
    fn test_header_names_keep_surrounding_spaces() {
        let row = vec![Data::String(" Price".into()), Data::String("Location_Main ".into())];
        let headers = header_names(&row, 0);
        assert_eq!(headers, vec![" Price", "Location_Main "]);

        let table = Table::new(headers, Vec::new());
        let view = crate::domain::model::RefinedView::new(&table);
        assert!(!view.has_price());
        assert!(!view.has_location());
    }

    #[test]
    fn test_parse_workbook_counts_columns_from_a() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 1, "Location_Main").unwrap();
        worksheet.write_string(1, 1, "Paris").unwrap();
        worksheet.write_number(1, 2, 120.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = parse_workbook(bytes, "r.xlsx").unwrap();
        assert_eq!(table.headers(), ["Unnamed: 0", "Location_Main", "Unnamed: 2"]);
        assert_eq!(
            table.rows()[0],
            vec![
                CellValue::Empty,
                CellValue::Text("Paris".into()),
                CellValue::Number(120.0)
            ]
        );
    }

    #[test]
    fn test_loader_skips_absent_artifacts() {
        let storage = MemoryStorage::new();
        let loader = ResultLoader::new(&storage);

        assert!(loader
            .load_tours(&artifact(ArtifactKind::ToursJson, false))
            .unwrap()
            .is_none());
        assert!(loader
            .load_table(&artifact(ArtifactKind::RefinedXlsx, false))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_loader_reads_present_json() {
        let storage =
            MemoryStorage::new().with_file("tours_extracted.json", br#"{"tours": [{}, {}]}"#);
        let loader = ResultLoader::new(&storage);

        let results = loader
            .load_tours(&artifact(ArtifactKind::ToursJson, true))
            .unwrap()
            .unwrap();
        assert_eq!(results.total(), 2);
    }
}
