use crate::cli::{commands::Commands, handlers};
use crate::error::Result;
use crate::interactive::InteractivePrompter;
use clap::Parser;
use clap_verbosity_flag::{OffLevel, Verbosity};
use powerbill_billing::config::DEFAULT_CONFIG_FILE;
use powerbill_billing::BillingConfig;
use std::path::PathBuf;
use tracing::debug;

/// Powerbill - electricity billing records
#[derive(Parser, Debug)]
#[command(
    name = "powerbill",
    version,
    about = "Powerbill - electricity billing records",
    long_about = "Keep customer consumption records, generate slab-tariff bills and record payments.

QUICK START:
  powerbill                                  # Interactive menu
  powerbill sample                           # Add demo customers
  powerbill ls                               # List customers

BILLING:
  powerbill add --name \"Ram Kumar\" --units 120
  powerbill bill <id>                        # Show a bill
  powerbill pay <id> [--yes]                 # Record a payment
  powerbill tariff --units 250               # Price a consumption

CONFIGURATION:
  powerbill gen-config > powerbill.toml      # Write default configuration"
)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Customer data file (overrides storage.data_file)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<OffLevel>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    /// Execute the CLI command
    pub fn run(mut self) -> Result<()> {
        match self.command.take().unwrap_or(Commands::Menu) {
            // Needs no configuration, so a broken file can still be replaced
            Commands::GenConfig { output } => handlers::config::handle_gen_config(output.as_deref()),
            Commands::Tariff { units } => {
                handlers::tariff::handle_tariff(&self.load_config()?, units, self.json)
            }

            Commands::Menu => handlers::menu::handle_menu(
                &mut self.open_session()?,
                &mut InteractivePrompter::new(),
            ),
            Commands::Add { customer } => {
                handlers::customers::handle_add(&mut self.open_session()?, customer)
            }
            Commands::Bill { id } => handlers::customers::handle_bill(&self.open_session()?, id),
            Commands::Pay { id, yes } => handlers::customers::handle_pay(
                &mut self.open_session()?,
                id,
                yes,
                &mut InteractivePrompter::new(),
            ),
            Commands::Ls => handlers::customers::handle_ls(&self.open_session()?),
            Commands::Sample => handlers::customers::handle_sample(&mut self.open_session()?),
        }
    }

    fn open_session(&self) -> Result<handlers::Session> {
        handlers::Session::open(&self.load_config()?, self.json)
    }

    /// Layered configuration with `--data-file` applied last.
    pub fn load_config(&self) -> Result<BillingConfig> {
        let mut config = BillingConfig::load(Some(self.config.as_path()))?;
        if let Some(data_file) = &self.data_file {
            config.storage.data_file = data_file.clone();
            config.validate()?;
        }
        debug!(
            "Using data file {} (config {})",
            config.storage.data_file.display(),
            self.config.display()
        );
        Ok(config)
    }
}
