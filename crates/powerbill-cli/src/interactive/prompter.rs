//! Terminal prompts backed by dialoguer

use super::{MenuAction, MenuInput};
use crate::cli::commands::NewCustomerArgs;
use crate::error::Result;
use crate::output::{format_amount, print_menu};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use powerbill_billing::domain::{BillSummary, CustomerId};

/// Prompts on the controlling terminal; invalid answers are re-asked in place.
pub struct InteractivePrompter {
    theme: ColorfulTheme,
}

impl InteractivePrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for InteractivePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuInput for InteractivePrompter {
    fn choose_action(&mut self) -> Result<MenuAction> {
        print_menu(&MenuAction::ALL);
        let action = Input::<MenuAction>::with_theme(&self.theme)
            .with_prompt("Enter choice")
            .interact_text()?;
        Ok(action)
    }

    fn new_customer(&mut self) -> Result<NewCustomerArgs> {
        let name: String = Input::with_theme(&self.theme)
            .with_prompt("Enter Name")
            .validate_with(|name: &String| -> std::result::Result<(), &str> {
                if name.trim().is_empty() {
                    Err("Name cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let address: String = Input::with_theme(&self.theme)
            .with_prompt("Enter Address")
            .allow_empty(true)
            .interact_text()?;

        let units: i64 = Input::with_theme(&self.theme)
            .with_prompt("Enter Units Consumed")
            .validate_with(|units: &i64| -> std::result::Result<(), &str> {
                if *units < 0 {
                    Err("Units cannot be negative")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        Ok(NewCustomerArgs {
            name,
            address,
            units,
        })
    }

    fn customer_id(&mut self) -> Result<CustomerId> {
        let id = Input::<CustomerId>::with_theme(&self.theme)
            .with_prompt("Enter Customer ID")
            .interact_text()?;
        Ok(id)
    }

    fn confirm_payment(&mut self, bill: &BillSummary, currency: &str) -> Result<bool> {
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!(
                "Pay {} for {} (customer {})?",
                format_amount(bill.amount_due, currency),
                bill.name,
                bill.id
            ))
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}
