//! Table formatting for CLI output

use super::format_amount;
use console::style;
use powerbill_billing::domain::{BillSummary, CustomerRecord, SlabTariff, TariffBreakdown};
use tabled::{settings::Style, Table, Tabled};

/// Names longer than this are cut in the customer listing.
const NAME_WIDTH: usize = 19;

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Units")]
    units: u64,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Paid")]
    paid: &'static str,
    #[tabled(rename = "Pay Date")]
    pay_date: String,
}

pub fn render_customers(records: &[CustomerRecord], currency: &str) -> String {
    let rows: Vec<CustomerRow> = records
        .iter()
        .map(|record| CustomerRow {
            id: record.id().as_u32(),
            name: record.name().chars().take(NAME_WIDTH).collect(),
            units: record.units_consumed(),
            amount: format_amount(record.amount_due(), currency),
            paid: if record.is_paid() { "Yes" } else { "No" },
            pay_date: record
                .payment_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

/// Display customers in table format
pub fn display_customers(records: &[CustomerRecord], currency: &str) {
    println!("{}", render_customers(records, currency));
}

pub fn render_bill(bill: &BillSummary, currency: &str) -> String {
    [
        format!("Customer ID : {}", bill.id),
        format!("Name        : {}", bill.name),
        format!("Address     : {}", bill.address),
        format!("Units       : {}", bill.units_consumed),
        format!("Amount Due  : {}", format_amount(bill.amount_due, currency)),
        format!("Status      : {}", bill.status),
    ]
    .join("\n")
}

pub fn display_bill(bill: &BillSummary, currency: &str) {
    println!("{}", style("----- Bill Details -----").bold());
    println!("{}", render_bill(bill, currency));
}

#[derive(Tabled)]
struct SlabRow {
    #[tabled(rename = "Units")]
    range: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

pub fn render_tariff(tariff: &SlabTariff, currency: &str) -> String {
    let mut lower = 0u64;
    let rows: Vec<SlabRow> = tariff
        .slabs()
        .iter()
        .map(|slab| {
            let range = match slab.up_to {
                Some(upper) => format!("{}-{}", lower + 1, upper),
                None => format!("{}+", lower + 1),
            };
            lower = slab.up_to.unwrap_or(lower);
            SlabRow {
                range,
                rate: format!("{currency}{}/unit", slab.rate),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!(
        "{table}\nFixed charge: {} (bills with consumption only)",
        format_amount(tariff.fixed_charge(), currency)
    )
}

pub fn display_tariff(tariff: &SlabTariff, currency: &str) {
    println!("{}", render_tariff(tariff, currency));
}

#[derive(Tabled)]
struct ChargeRow {
    #[tabled(rename = "Slab")]
    range: String,
    #[tabled(rename = "Units")]
    units: u64,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

pub fn render_breakdown(units: i64, breakdown: &TariffBreakdown, currency: &str) -> String {
    if breakdown.charges.is_empty() {
        return format!(
            "{units} units: nothing to bill, total {}",
            format_amount(breakdown.total, currency)
        );
    }

    let rows: Vec<ChargeRow> = breakdown
        .charges
        .iter()
        .map(|charge| ChargeRow {
            range: format!("{}-{}", charge.first_unit, charge.last_unit),
            units: charge.units,
            rate: format!("{currency}{}", charge.rate),
            subtotal: format_amount(charge.subtotal, currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!(
        "{table}\nFixed charge: {}\nTotal for {units} units: {}",
        format_amount(breakdown.fixed_charge, currency),
        format_amount(breakdown.total, currency)
    )
}

pub fn display_breakdown(units: i64, breakdown: &TariffBreakdown, currency: &str) {
    println!("{}", render_breakdown(units, breakdown, currency));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use powerbill_billing::domain::{Amount, BillStatus, CustomerId};
    use std::str::FromStr;

    fn record(id: u32, name: &str, paid_on: Option<NaiveDate>) -> CustomerRecord {
        CustomerRecord::restore(
            CustomerId::new(id).unwrap(),
            name.to_string(),
            "Somewhere".to_string(),
            120,
            Amount::from_str("250").unwrap(),
            paid_on,
        )
    }

    #[test]
    fn test_customer_table_columns() {
        let paid_on = NaiveDate::from_ymd_opt(2024, 3, 1);
        let table = render_customers(
            &[
                record(1, "Ram Kumar", None),
                record(2, "Sita Devi", paid_on),
            ],
            "₹",
        );

        for header in ["ID", "Name", "Units", "Amount", "Paid", "Pay Date"] {
            assert!(table.contains(header), "missing {header} in\n{table}");
        }
        assert!(table.contains("₹250.00"));
        assert!(table.contains("2024-03-01"));
        assert!(table.contains("Yes"));
        assert!(table.contains("No"));
    }

    #[test]
    fn test_long_names_truncated_to_nineteen_chars() {
        let table = render_customers(
            &[record(1, "Bartholomew Fitzgerald-Smythe", None)],
            "₹",
        );
        assert!(table.contains("Bartholomew Fitzger"));
        assert!(!table.contains("Bartholomew Fitzgera"));
    }

    #[test]
    fn test_bill_shows_status() {
        let unpaid = record(1, "Ram Kumar", None).summary();
        assert!(render_bill(&unpaid, "₹").contains("Status      : UNPAID"));

        let on = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let mut paid = unpaid.clone();
        paid.status = BillStatus::Paid { on };
        let rendered = render_bill(&paid, "₹");
        assert!(rendered.contains("PAID on 2024-06-30"));
        assert!(rendered.contains("Amount Due  : ₹250.00"));
    }

    #[test]
    fn test_tariff_ranges() {
        let rendered = render_tariff(&SlabTariff::standard(), "₹");
        assert!(rendered.contains("1-100"));
        assert!(rendered.contains("101-200"));
        assert!(rendered.contains("201+"));
        assert!(rendered.contains("Fixed charge: ₹50.00"));
    }

    #[test]
    fn test_breakdown_totals() {
        let tariff = SlabTariff::standard();
        let rendered = render_breakdown(150, &tariff.breakdown(150), "₹");
        assert!(rendered.contains("101-150"));
        assert!(rendered.contains("Total for 150 units: ₹325.00"));

        let nothing = render_breakdown(0, &tariff.breakdown(0), "₹");
        assert!(nothing.contains("nothing to bill"));
        assert!(nothing.contains("₹0.00"));
    }
}
