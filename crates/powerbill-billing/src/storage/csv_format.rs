//! Text format of the customer file.
//!
//! One header row followed by one row per record:
//!
//! ```text
//! id,name,address,units,amount,paid,paymentDate
//! 1,"Ram Kumar","Village Road 12",120,250.00,1,"2024-03-01"
//! ```
//!
//! Text fields are quoted and embedded quotes are doubled, so any name or
//! address survives a save/load cycle. Reading is strict: the first bad row
//! rejects the whole file.

use crate::domain::types::{Amount, CustomerId, CustomerRecord};
use crate::error::{BillingError, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::io::{Read, Write};
use std::str::FromStr;

pub const HEADER: [&str; 7] = ["id", "name", "address", "units", "amount", "paid", "paymentDate"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Write the header and every record, in order.
pub fn write_records<W: Write>(writer: W, records: &[CustomerRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for record in records {
        let id = record.id().to_string();
        let units = record.units_consumed().to_string();
        let amount = record.amount_due().to_string();
        let paid = if record.is_paid() { "1" } else { "0" };
        let payment_date = record
            .payment_date()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();

        writer.write_record([
            id.as_str(),
            record.name(),
            record.address(),
            units.as_str(),
            amount.as_str(),
            paid,
            payment_date.as_str(),
        ])?;
    }

    writer
        .flush()
        .map_err(|e| BillingError::storage("flush records", e))?;
    Ok(())
}

/// Parse a whole file. An empty input is an empty collection.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<CustomerRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = reader.records();
    let header = match rows.next() {
        None => return Ok(Vec::new()),
        Some(row) => row?,
    };
    check_header(&header)?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for row in rows {
        let row = row?;
        let record = parse_row(&row)?;
        if !seen.insert(record.id()) {
            return Err(BillingError::malformed(
                line_of(&row),
                format!("duplicate customer id {}", record.id()),
            ));
        }
        records.push(record);
    }

    Ok(records)
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or_default()
}

fn check_header(header: &StringRecord) -> Result<()> {
    if header.iter().eq(HEADER.iter().copied()) {
        Ok(())
    } else {
        Err(BillingError::malformed(
            line_of(header),
            format!(
                "unexpected header '{}', expected '{}'",
                header.iter().collect::<Vec<_>>().join(","),
                HEADER.join(",")
            ),
        ))
    }
}

fn parse_row(row: &StringRecord) -> Result<CustomerRecord> {
    let line = line_of(row);
    let bad = |reason: String| BillingError::malformed(line, reason);

    if row.len() != HEADER.len() {
        return Err(bad(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            row.len()
        )));
    }
    let field = |index: usize| row.get(index).unwrap_or_default();

    let id = field(0)
        .parse::<u32>()
        .ok()
        .and_then(CustomerId::new)
        .ok_or_else(|| bad(format!("invalid customer id '{}'", field(0))))?;

    let name = field(1);
    if name.trim().is_empty() {
        return Err(bad("customer name is empty".to_string()));
    }
    let address = field(2);

    let units = field(3)
        .parse::<u64>()
        .map_err(|_| bad(format!("invalid units '{}'", field(3))))?;

    let amount = Decimal::from_str(field(4))
        .map(Amount::from_decimal)
        .map_err(|_| bad(format!("invalid amount '{}'", field(4))))?;
    if amount.is_negative() {
        return Err(bad(format!("negative amount '{}'", field(4))));
    }

    let paid = match field(5) {
        "0" => false,
        "1" => true,
        other => return Err(bad(format!("paid flag must be 0 or 1, found '{other}'"))),
    };

    let payment_date = match field(6) {
        "" => None,
        raw => Some(
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| bad(format!("invalid payment date '{raw}'")))?,
        ),
    };

    match (paid, payment_date) {
        (true, None) => return Err(bad("paid record has no payment date".to_string())),
        (false, Some(_)) => return Err(bad("unpaid record has a payment date".to_string())),
        _ => {}
    }

    Ok(CustomerRecord::restore(
        id,
        name.to_string(),
        address.to_string(),
        units,
        amount,
        payment_date,
    ))
}
