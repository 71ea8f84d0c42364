//! Evidence snapshot persistence

use crate::model::EvidenceKind;
use crate::EvidenceResult;
use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes evidence snapshots into one output directory
#[derive(Debug, Clone)]
pub struct EvidenceStore {
    output_dir: PathBuf,
}

impl EvidenceStore {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Serialize `data` to `{kind}_{YYYYMMDD_HHMMSS}.json` and return its path.
    ///
    /// The output directory is created (recursively) if it does not exist.
    pub fn save_evidence<T: Serialize + ?Sized>(&self, kind: EvidenceKind, data: &T) -> EvidenceResult<PathBuf> {
        self.save_evidence_at(kind, data, Local::now())
    }

    /// [`EvidenceStore::save_evidence`] with an explicit wall-clock time
    pub fn save_evidence_at<T: Serialize + ?Sized>(
        &self,
        kind: EvidenceKind,
        data: &T,
        at: DateTime<Local>,
    ) -> EvidenceResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(snapshot_file_name(kind, at));
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, data)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!("Generated {} evidence: {}", kind, path.display());
        Ok(path)
    }

    /// Read a snapshot back
    pub fn load_evidence<T: DeserializeOwned>(path: &Path) -> EvidenceResult<T> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// File name for a snapshot of `kind` taken at `at`
pub fn snapshot_file_name(kind: EvidenceKind, at: DateTime<Local>) -> String {
    format!("{}_{}.json", kind.as_str(), at.format("%Y%m%d_%H%M%S"))
}
