use crate::config::ExportSettings;
use crate::domain::model::{ArtifactKind, Table};
use crate::domain::ports::Storage;
use crate::utils::error::{ReportError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const BUNDLE_FILE_NAME: &str = "tours_bundle.zip";
pub const TABLE_CSV_FILE_NAME: &str = "tours_refined.csv";

/// An artifact offered for download, bytes exactly as found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Download {
    pub kind: ArtifactKind,
    pub file_name: &'static str,
    pub content_type: &'static str,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Reads the raw bytes of each listed artifact from the results storage.
pub fn collect_downloads<S: Storage>(storage: &S, kinds: &[ArtifactKind]) -> Result<Vec<Download>> {
    kinds
        .iter()
        .map(|&kind| -> Result<Download> {
            let bytes = storage.read_file(kind.file_name())?;
            tracing::debug!("Prepared download {} ({} bytes)", kind.download_name(), bytes.len());
            Ok(Download {
                kind,
                file_name: kind.download_name(),
                content_type: kind.content_type(),
                bytes,
            })
        })
        .collect()
}

/// Writes every download under its download name.
pub fn write_downloads<S: Storage>(downloads: &[Download], target: &S) -> Result<Vec<PathBuf>> {
    downloads
        .iter()
        .map(|download| -> Result<PathBuf> {
            let path = target.write_file(download.file_name, &download.bytes)?;
            tracing::info!("📥 Exported {} to {}", download.kind.label(), path.display());
            Ok(path)
        })
        .collect()
}

/// Packs the downloads (and the optional table CSV) into a single zip.
pub fn write_bundle<S: Storage>(
    downloads: &[Download],
    table_csv: Option<&[u8]>,
    target: &S,
) -> Result<PathBuf> {
    let zip_data = {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for download in downloads {
            zip.start_file(download.file_name, SimpleFileOptions::default())?;
            zip.write_all(&download.bytes)?;
        }

        if let Some(csv) = table_csv {
            zip.start_file(TABLE_CSV_FILE_NAME, SimpleFileOptions::default())?;
            zip.write_all(csv)?;
        }

        zip.finish()?.into_inner()
    };

    tracing::debug!("Writing bundle ({} bytes)", zip_data.len());
    let path = target.write_file(BUNDLE_FILE_NAME, &zip_data)?;
    tracing::info!("📦 Bundle saved to {}", path.display());
    Ok(path)
}

/// Writes the downloads, then the optional table CSV and bundle.
pub fn export_all<S: Storage>(
    downloads: &[Download],
    table: Option<&Table>,
    settings: &ExportSettings,
    target: &S,
) -> Result<Vec<PathBuf>> {
    let mut written = write_downloads(downloads, target)?;

    let table_csv = match (settings.table_csv, table) {
        (true, Some(table)) => Some(table_to_csv(table)?),
        (true, None) => {
            tracing::warn!("No refined table loaded, skipping {}", TABLE_CSV_FILE_NAME);
            None
        }
        (false, _) => None,
    };

    if let Some(csv) = &table_csv {
        written.push(target.write_file(TABLE_CSV_FILE_NAME, csv)?);
    }

    if settings.bundle {
        written.push(write_bundle(downloads, table_csv.as_deref(), target)?);
    }

    Ok(written)
}

/// Serializes the table as CSV with a header row.
pub fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::IoError(e.into_error()))
}
