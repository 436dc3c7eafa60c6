use crate::domain::types::Amount;
use crate::error::{BillingError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Maps consumed units to the amount due
pub trait BillCalculator {
    /// Zero or negative consumption is billed at zero, with no fixed charge.
    fn compute_amount(&self, units: i64) -> Amount;
}

/// One pricing band. `up_to` is the cumulative upper bound in units; the last
/// slab is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<u64>,
    pub rate: Decimal,
}

impl Slab {
    pub fn bounded(up_to: u64, rate: Decimal) -> Self {
        Self {
            up_to: Some(up_to),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self { up_to: None, rate }
    }
}

/// Units charged within one slab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlabCharge {
    pub first_unit: u64,
    pub last_unit: u64,
    pub units: u64,
    pub rate: Decimal,
    pub subtotal: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TariffBreakdown {
    pub charges: Vec<SlabCharge>,
    pub fixed_charge: Amount,
    pub total: Amount,
}

impl TariffBreakdown {
    fn empty() -> Self {
        Self {
            charges: Vec::new(),
            fixed_charge: Amount::zero(),
            total: Amount::zero(),
        }
    }
}

/// Tiered consumption tariff with a flat charge on every non-zero bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlabTariff {
    slabs: Vec<Slab>,
    fixed_charge: Decimal,
}

impl SlabTariff {
    pub const STANDARD_FIXED_CHARGE: Decimal = dec!(50.00);

    /// Build a tariff, checking that the slabs form a contiguous schedule.
    pub fn new(slabs: Vec<Slab>, fixed_charge: Decimal) -> Result<Self> {
        if slabs.is_empty() {
            return Err(BillingError::InvalidTariff(
                "at least one slab is required".to_string(),
            ));
        }
        if fixed_charge.is_sign_negative() && !fixed_charge.is_zero() {
            return Err(BillingError::InvalidTariff(format!(
                "fixed charge {fixed_charge} is negative"
            )));
        }

        let mut previous_bound = 0u64;
        let last = slabs.len() - 1;
        for (index, slab) in slabs.iter().enumerate() {
            if slab.rate.is_sign_negative() && !slab.rate.is_zero() {
                return Err(BillingError::InvalidTariff(format!(
                    "slab {} has negative rate {}",
                    index + 1,
                    slab.rate
                )));
            }
            match (slab.up_to, index == last) {
                (Some(bound), false) => {
                    if bound <= previous_bound {
                        return Err(BillingError::InvalidTariff(format!(
                            "slab {} ends at {bound}, which does not exceed the previous bound {previous_bound}",
                            index + 1
                        )));
                    }
                    previous_bound = bound;
                }
                (None, false) => {
                    return Err(BillingError::InvalidTariff(format!(
                        "slab {} is unbounded but is not the last slab",
                        index + 1
                    )));
                }
                (Some(_), true) => {
                    return Err(BillingError::InvalidTariff(
                        "the last slab must be unbounded".to_string(),
                    ));
                }
                (None, true) => {}
            }
        }

        Ok(Self {
            slabs,
            fixed_charge,
        })
    }

    /// 1.50 for the first 100 units, 2.50 for the next 100, 4.00 beyond,
    /// plus a 50.00 fixed charge.
    pub fn standard() -> Self {
        Self {
            slabs: Self::standard_slabs(),
            fixed_charge: Self::STANDARD_FIXED_CHARGE,
        }
    }

    pub fn standard_slabs() -> Vec<Slab> {
        vec![
            Slab::bounded(100, dec!(1.50)),
            Slab::bounded(200, dec!(2.50)),
            Slab::unbounded(dec!(4.00)),
        ]
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    pub fn fixed_charge(&self) -> Amount {
        Amount::from_decimal(self.fixed_charge)
    }

    /// Per-slab line items for `units`, consuming slabs in order.
    pub fn breakdown(&self, units: i64) -> TariffBreakdown {
        if units <= 0 {
            return TariffBreakdown::empty();
        }
        let units = units.unsigned_abs();

        let mut charges = Vec::new();
        let mut raw_total = Decimal::ZERO;
        let mut lower = 0u64;
        for slab in &self.slabs {
            if lower >= units {
                break;
            }
            let upper = slab.up_to.map_or(units, |bound| bound.min(units));
            let billed = upper - lower;
            let cost = slab.rate * Decimal::from(billed);
            raw_total += cost;
            charges.push(SlabCharge {
                first_unit: lower + 1,
                last_unit: upper,
                units: billed,
                rate: slab.rate,
                subtotal: Amount::from_decimal(cost),
            });
            lower = upper;
        }

        TariffBreakdown {
            charges,
            fixed_charge: self.fixed_charge(),
            total: Amount::from_decimal(raw_total + self.fixed_charge),
        }
    }
}

impl Default for SlabTariff {
    fn default() -> Self {
        Self::standard()
    }
}

impl BillCalculator for SlabTariff {
    fn compute_amount(&self, units: i64) -> Amount {
        self.breakdown(units).total
    }
}
