use crate::error::Result;
use crate::output::print_success;
use color_eyre::eyre::eyre;
use powerbill_billing::BillingConfig;
use std::path::Path;

/// Print the default configuration, or write it to `output`.
pub fn handle_gen_config(output: Option<&Path>) -> Result<()> {
    let toml = BillingConfig::default()
        .to_toml()
        .map_err(|e| eyre!("Failed to serialize default configuration: {}", e))?;

    match output {
        None => println!("{toml}"),
        Some(path) => {
            std::fs::write(path, &toml)?;
            print_success(&format!("Configuration written to {}", path.display()));
        }
    }
    Ok(())
}
