//! Command handlers for the powerbill CLI

pub mod config;
pub mod customers;
pub mod menu;
pub mod tariff;

use crate::error::Result;
use color_eyre::eyre::WrapErr;
use powerbill_billing::config::DisplayConfig;
use powerbill_billing::domain::CustomerService;
use powerbill_billing::storage::{CsvRecordRepository, RecordRepository};
use powerbill_billing::BillingConfig;

/// Loaded customer records plus the presentation settings handlers need
pub struct Session<R: RecordRepository = CsvRecordRepository> {
    pub service: CustomerService<R>,
    pub display: DisplayConfig,
    pub json: bool,
}

impl Session<CsvRecordRepository> {
    /// Load the configured data file.
    ///
    /// A file that fails strict loading stops the CLI here: starting empty
    /// would overwrite it on the first save.
    pub fn open(config: &BillingConfig, json: bool) -> Result<Self> {
        let tariff = config.build_tariff()?;
        let repository = config.record_repository();
        let location = repository.location();
        let service = CustomerService::open(repository, tariff)
            .wrap_err_with(|| format!("Could not load customer records from {location}"))?;

        Ok(Self::new(service, config.display.clone(), json))
    }
}

impl<R: RecordRepository> Session<R> {
    pub fn new(service: CustomerService<R>, display: DisplayConfig, json: bool) -> Self {
        Self {
            service,
            display,
            json,
        }
    }

    pub fn currency(&self) -> &str {
        &self.display.currency_symbol
    }
}
