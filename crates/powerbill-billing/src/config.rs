use crate::domain::tariff::{Slab, SlabTariff};
use crate::error::Result;
use crate::storage::CsvRecordRepository;
use powerbill_common::{load_layered, ConfigurationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "POWERBILL_";
pub const DEFAULT_CONFIG_FILE: &str = "powerbill.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BillingConfig {
    pub storage: StorageConfig,
    pub tariff: TariffConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// CSV file holding every customer record
    pub data_file: PathBuf,
    /// Write through a temporary file and rename it into place
    #[serde(default = "default_atomic_writes")]
    pub atomic_writes: bool,
}

fn default_atomic_writes() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("customers.csv"),
            atomic_writes: default_atomic_writes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffConfig {
    /// Added to every bill with non-zero consumption
    pub fixed_charge: Decimal,
    /// Ordered slabs; only the last one may omit `up_to`
    pub slabs: Vec<Slab>,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            fixed_charge: SlabTariff::STANDARD_FIXED_CHARGE,
            slabs: SlabTariff::standard_slabs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

impl BillingConfig {
    /// Defaults, then `path` (or `powerbill.toml`) if present, then
    /// `POWERBILL_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let config: BillingConfig = load_layered(&BillingConfig::default(), Some(path), ENV_PREFIX)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                key: "storage.data_file".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        self.build_tariff()?;
        Ok(())
    }

    pub fn build_tariff(&self) -> Result<SlabTariff> {
        SlabTariff::new(self.tariff.slabs.clone(), self.tariff.fixed_charge)
    }

    pub fn record_repository(&self) -> CsvRecordRepository {
        CsvRecordRepository::new(&self.storage.data_file)
            .with_atomic_writes(self.storage.atomic_writes)
    }

    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
