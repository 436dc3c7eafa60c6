pub mod csv_file;
pub mod csv_format;
pub mod memory;

use crate::domain::types::CustomerRecord;
use crate::error::Result;

pub use csv_file::CsvRecordRepository;
pub use memory::InMemoryRecordRepository;

/// Persistence backend for the whole customer collection.
///
/// Saves always replace the full collection; there is no incremental append.
pub trait RecordRepository {
    /// Read every stored record in insertion order. "No data yet" yields an
    /// empty vector, not an error.
    fn load_all(&self) -> Result<Vec<CustomerRecord>>;

    /// Replace the stored collection with `records`.
    fn save_all(&self, records: &[CustomerRecord]) -> Result<()>;

    /// Human readable location used in log lines and warnings.
    fn location(&self) -> String;
}
