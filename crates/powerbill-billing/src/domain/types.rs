use crate::error::BillingError;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer identifier, positive and assigned in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u32);

impl CustomerId {
    pub const FIRST: CustomerId = CustomerId(1);

    /// Returns `None` for zero, which is never a valid id.
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u32 = s
            .trim()
            .parse()
            .map_err(|_| BillingError::validation("customer id", format!("'{s}' is not a number")))?;
        Self::new(raw).ok_or_else(|| BillingError::validation("customer id", "must be positive"))
    }
}

/// Monetary amount held at exactly two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const SCALE: u32 = 2;

    pub fn zero() -> Self {
        Self::from_decimal(Decimal::ZERO)
    }

    pub fn from_decimal(amount: Decimal) -> Self {
        let mut rounded =
            amount.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(Self::SCALE);
        Self(rounded)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_decimal(Decimal::from_str(s.trim())?))
    }
}

/// A registered customer and their single bill.
///
/// The amount is fixed at creation and the payment date, once set, is never
/// changed or cleared. A record is paid exactly when it has a payment date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    id: CustomerId,
    name: String,
    address: String,
    units_consumed: u64,
    amount_due: Amount,
    payment_date: Option<NaiveDate>,
}

impl CustomerRecord {
    /// New, unpaid record.
    pub fn new(
        id: CustomerId,
        name: String,
        address: String,
        units_consumed: u64,
        amount_due: Amount,
    ) -> Self {
        Self {
            id,
            name,
            address,
            units_consumed,
            amount_due,
            payment_date: None,
        }
    }

    /// Rebuild a record exactly as it was persisted.
    pub fn restore(
        id: CustomerId,
        name: String,
        address: String,
        units_consumed: u64,
        amount_due: Amount,
        payment_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            address,
            units_consumed,
            amount_due,
            payment_date,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn units_consumed(&self) -> u64 {
        self.units_consumed
    }

    pub fn amount_due(&self) -> Amount {
        self.amount_due
    }

    pub fn payment_date(&self) -> Option<NaiveDate> {
        self.payment_date
    }

    pub fn is_paid(&self) -> bool {
        self.payment_date.is_some()
    }

    pub fn status(&self) -> BillStatus {
        match self.payment_date {
            Some(on) => BillStatus::Paid { on },
            None => BillStatus::Unpaid,
        }
    }

    pub fn summary(&self) -> BillSummary {
        BillSummary {
            id: self.id,
            name: self.name.clone(),
            address: self.address.clone(),
            units_consumed: self.units_consumed,
            amount_due: self.amount_due,
            status: self.status(),
        }
    }

    /// Record the payment. Returns `false` without touching the record if it
    /// was already paid.
    pub(crate) fn mark_paid(&mut self, on: NaiveDate) -> bool {
        if self.payment_date.is_some() {
            return false;
        }
        self.payment_date = Some(on);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BillStatus {
    Unpaid,
    Paid { on: NaiveDate },
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillStatus::Unpaid => write!(f, "UNPAID"),
            BillStatus::Paid { on } => write!(f, "PAID on {}", on.format("%Y-%m-%d")),
        }
    }
}

/// Read-only billing view of one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub units_consumed: u64,
    pub amount_due: Amount,
    pub status: BillStatus,
}
