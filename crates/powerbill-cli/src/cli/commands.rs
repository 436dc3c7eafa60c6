use clap::{Args as ClapArgs, Subcommand};
use powerbill_billing::domain::CustomerId;
use std::path::PathBuf;

/// Main CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive menu (default when no command is given)
    Menu,

    /// Register a customer and generate their bill
    Add {
        #[command(flatten)]
        customer: NewCustomerArgs,
    },

    /// Show the bill for a customer
    Bill {
        /// Customer id
        id: CustomerId,
    },

    /// Mark a customer's bill as paid today
    Pay {
        /// Customer id
        id: CustomerId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List every customer
    Ls,

    /// Add the two demo customers
    Sample,

    /// Show the slab schedule, optionally priced for a consumption
    Tariff {
        /// Units to price against the schedule
        #[arg(short, long, allow_negative_numbers = true)]
        units: Option<i64>,
    },

    /// Print the default configuration as TOML
    GenConfig {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct NewCustomerArgs {
    /// Customer name
    #[arg(long)]
    pub name: String,

    /// Postal address
    #[arg(long, default_value = "")]
    pub address: String,

    /// Units consumed this period
    #[arg(long, allow_negative_numbers = true)]
    pub units: i64,
}
