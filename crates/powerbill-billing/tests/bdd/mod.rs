use chrono::NaiveDate;
use powerbill_billing::domain::{CustomerService, FixedClock, SlabTariff};
use powerbill_billing::storage::{CsvRecordRepository, RecordRepository};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestContext {
    pub dir: TempDir,
    pub data_file: PathBuf,
    pub today: NaiveDate,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_file = dir.path().join("customers.csv");
        Self {
            dir,
            data_file,
            today: NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"),
        }
    }

    pub fn repository(&self) -> CsvRecordRepository {
        CsvRecordRepository::new(&self.data_file)
    }

    /// A fresh service session over the data file, as after a restart.
    pub fn open_service(&self) -> CustomerService<CsvRecordRepository> {
        CustomerService::open(self.repository(), SlabTariff::standard())
            .expect("Failed to open customer service")
            .with_clock(FixedClock(self.today))
    }

    pub fn write_data_file(&self, contents: &str) {
        std::fs::write(&self.data_file, contents).expect("Failed to write data file");
    }

    pub fn read_data_file(&self) -> String {
        std::fs::read_to_string(&self.data_file).expect("Failed to read data file")
    }

    pub fn stored_count(&self) -> usize {
        self.repository()
            .load_all()
            .expect("Failed to load records")
            .len()
    }
}

pub mod scenarios;
