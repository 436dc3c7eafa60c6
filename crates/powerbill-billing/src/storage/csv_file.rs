use crate::domain::types::CustomerRecord;
use crate::error::{BillingError, Result};
use crate::storage::{csv_format, RecordRepository};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Customer records kept in a single CSV file that is rewritten on every save
#[derive(Debug, Clone)]
pub struct CsvRecordRepository {
    path: PathBuf,
    atomic_writes: bool,
}

impl CsvRecordRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_writes: true,
        }
    }

    /// When enabled (the default) saves go to a temporary file in the same
    /// directory which is then renamed over the target, so a failed save never
    /// leaves a truncated file behind.
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn save_atomic(&self, records: &[CustomerRecord]) -> Result<()> {
        let dir = self.parent_dir();
        let mut temp = NamedTempFile::new_in(dir)
            .map_err(|e| BillingError::storage(format!("create temp file in {}", dir.display()), e))?;

        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            csv_format::write_records(&mut writer, records)?;
            writer
                .flush()
                .map_err(|e| BillingError::storage("flush temp file", e))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| BillingError::storage("sync temp file", e))?;

        temp.persist(&self.path)
            .map_err(|e| BillingError::storage(format!("replace {}", self.path.display()), e.error))?;
        Ok(())
    }

    fn save_direct(&self, records: &[CustomerRecord]) -> Result<()> {
        let file = File::create(&self.path)
            .map_err(|e| BillingError::storage(format!("open {} for writing", self.path.display()), e))?;
        let mut writer = BufWriter::new(file);
        csv_format::write_records(&mut writer, records)?;
        writer
            .flush()
            .map_err(|e| BillingError::storage(format!("write {}", self.path.display()), e))?;
        Ok(())
    }
}

impl RecordRepository for CsvRecordRepository {
    fn load_all(&self) -> Result<Vec<CustomerRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(BillingError::storage(
                    format!("open {}", self.path.display()),
                    e,
                ))
            }
        };

        let records = csv_format::read_records(BufReader::new(file))?;
        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn save_all(&self, records: &[CustomerRecord]) -> Result<()> {
        let dir = self.parent_dir();
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| BillingError::storage(format!("create {}", dir.display()), e))?;
        }

        if self.atomic_writes {
            self.save_atomic(records)?;
        } else {
            self.save_direct(records)?;
        }
        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Amount, CustomerId};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn records() -> Vec<CustomerRecord> {
        vec![
            CustomerRecord::new(
                CustomerId::FIRST,
                "Ram \"RK\" Kumar".to_string(),
                "Village Road 12, North".to_string(),
                120,
                Amount::from_decimal(dec!(250)),
            ),
            CustomerRecord::restore(
                CustomerId::new(5).unwrap(),
                "Sita Devi".to_string(),
                "Green Street".to_string(),
                250,
                Amount::from_decimal(dec!(600)),
                NaiveDate::from_ymd_opt(2024, 5, 17),
            ),
        ]
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvRecordRepository::new(dir.path().join("customers.csv"));
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_atomic_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvRecordRepository::new(dir.path().join("nested").join("customers.csv"));
        repo.save_all(&records()).unwrap();
        assert_eq!(repo.load_all().unwrap(), records());

        let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_direct_round_trip_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let repo =
            CsvRecordRepository::new(dir.path().join("customers.csv")).with_atomic_writes(false);
        repo.save_all(&records()).unwrap();
        repo.save_all(&records()[..1]).unwrap();
        assert_eq!(repo.load_all().unwrap(), records()[..1].to_vec());
    }

    #[test]
    fn test_save_into_directory_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = CsvRecordRepository::new(dir.path());
        let err = repo.save_all(&records()).unwrap_err();
        assert!(matches!(err, BillingError::Storage { .. }));
    }
}
