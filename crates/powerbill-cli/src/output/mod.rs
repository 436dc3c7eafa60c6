//! Output formatting utilities

pub mod table_output;

use crate::error::Result;
use crate::interactive::MenuAction;
use console::style;
use powerbill_billing::domain::Amount;
use serde::Serialize;

/// Output data as JSON
pub fn json_output<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}

/// Print a success message with green checkmark
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message with red X
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}

/// Print a warning to stderr so it survives `--json` piping
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
}

/// Print an informational message with blue info icon
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

pub fn print_menu(actions: &[MenuAction]) {
    println!();
    println!("{}", style("===== Electricity Billing =====").cyan().bold());
    for action in actions {
        println!("  {}. {}", style(action.number()).bold(), action.label());
    }
}

pub fn format_amount(amount: Amount, currency: &str) -> String {
    format!("{currency}{amount}")
}
