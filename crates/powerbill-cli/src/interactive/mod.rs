//! Interactive prompts for the menu and payment confirmation

pub mod prompter;

pub use prompter::InteractivePrompter;

use crate::cli::commands::NewCustomerArgs;
use crate::error::Result;
use powerbill_billing::domain::{BillSummary, CustomerId};
use std::fmt;
use std::str::FromStr;

/// One entry of the numbered main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddCustomer,
    ViewBill,
    PayBill,
    ListAll,
    AddSampleData,
    Exit,
}

impl MenuAction {
    /// Menu order; `Exit` is listed last but answers to `0`.
    pub const ALL: [MenuAction; 6] = [
        MenuAction::AddCustomer,
        MenuAction::ViewBill,
        MenuAction::PayBill,
        MenuAction::ListAll,
        MenuAction::AddSampleData,
        MenuAction::Exit,
    ];

    pub fn number(&self) -> u8 {
        match self {
            MenuAction::AddCustomer => 1,
            MenuAction::ViewBill => 2,
            MenuAction::PayBill => 3,
            MenuAction::ListAll => 4,
            MenuAction::AddSampleData => 5,
            MenuAction::Exit => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddCustomer => "Add customer & generate bill",
            MenuAction::ViewBill => "View bill by customer ID",
            MenuAction::PayBill => "Pay bill",
            MenuAction::ListAll => "View all customers",
            MenuAction::AddSampleData => "Add sample demo data",
            MenuAction::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for MenuAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let choice = s.trim();
        MenuAction::ALL
            .into_iter()
            .find(|action| action.number().to_string() == choice)
            .ok_or_else(|| format!("'{choice}' is not a menu option, enter a number from 0 to 5"))
    }
}

/// Source of menu answers.
///
/// Implementations must only return values that passed their own checks
/// (non-empty name, non-negative units, positive id), re-asking otherwise.
pub trait MenuInput {
    fn choose_action(&mut self) -> Result<MenuAction>;

    fn new_customer(&mut self) -> Result<NewCustomerArgs>;

    fn customer_id(&mut self) -> Result<CustomerId>;

    fn confirm_payment(&mut self, bill: &BillSummary, currency: &str) -> Result<bool>;
}
