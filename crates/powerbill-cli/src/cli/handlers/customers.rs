//! Customer and bill handlers shared by the subcommands and the menu

use super::Session;
use crate::cli::commands::NewCustomerArgs;
use crate::error::Result;
use crate::interactive::MenuInput;
use crate::output::{
    format_amount, json_output, print_info, print_success, print_warning,
    table_output::{display_bill, display_customers},
};
use powerbill_billing::domain::{CustomerId, PaymentOutcome, PersistenceStatus};
use powerbill_billing::storage::RecordRepository;
use powerbill_billing::BillingError;

pub fn handle_add<R: RecordRepository>(
    session: &mut Session<R>,
    customer: NewCustomerArgs,
) -> Result<()> {
    let added = session
        .service
        .add_customer(&customer.name, &customer.address, customer.units)?;
    report_persistence(&added.persistence);

    if session.json {
        return json_output(&added);
    }
    print_success(&format!("Customer added with ID {}", added.value.id()));
    print_info(&format!(
        "Amount due: {}",
        format_amount(added.value.amount_due(), session.currency())
    ));
    Ok(())
}

pub fn handle_bill<R: RecordRepository>(session: &Session<R>, id: CustomerId) -> Result<()> {
    let bill = session.service.get_bill(id)?;
    if session.json {
        return json_output(&bill);
    }
    display_bill(&bill, session.currency());
    Ok(())
}

/// Pay a bill, asking first unless `yes` is set or there is nothing to confirm.
pub fn handle_pay<R: RecordRepository, I: MenuInput + ?Sized>(
    session: &mut Session<R>,
    id: CustomerId,
    yes: bool,
    input: &mut I,
) -> Result<()> {
    let confirmed = match session.service.find_by_id(id) {
        Some(record) if !yes && !record.is_paid() => {
            input.confirm_payment(&record.summary(), session.currency())?
        }
        _ => true,
    };

    let outcome = session.service.pay_bill(id, confirmed);
    report_payment(session, &outcome)
}

fn report_payment<R: RecordRepository>(
    session: &Session<R>,
    outcome: &PaymentOutcome,
) -> Result<()> {
    match outcome {
        PaymentOutcome::NotFound { id } => {
            return Err(BillingError::CustomerNotFound { id: *id }.into())
        }
        PaymentOutcome::Paid { persistence, .. } => report_persistence(persistence),
        _ => {}
    }

    if session.json {
        return json_output(outcome);
    }
    match outcome {
        PaymentOutcome::Paid { record, .. } => print_success(&format!(
            "Payment of {} recorded for customer {} on {}",
            format_amount(record.amount_due(), session.currency()),
            record.id(),
            record.payment_date().map(|d| d.to_string()).unwrap_or_default()
        )),
        PaymentOutcome::AlreadyPaid { id, paid_on } => {
            print_info(&format!("Bill for customer {id} was already paid on {paid_on}"))
        }
        PaymentOutcome::Declined { id } => {
            print_info(&format!("Payment for customer {id} cancelled"))
        }
        PaymentOutcome::NotFound { .. } => {}
    }
    Ok(())
}

pub fn handle_ls<R: RecordRepository>(session: &Session<R>) -> Result<()> {
    let records = session.service.list_all();
    if session.json {
        return json_output(&records);
    }
    if records.is_empty() {
        print_info("No customers found.");
    } else {
        display_customers(records, session.currency());
    }
    Ok(())
}

pub fn handle_sample<R: RecordRepository>(session: &mut Session<R>) -> Result<()> {
    let added = session.service.add_sample_data()?;
    report_persistence(&added.persistence);

    if session.json {
        return json_output(&added);
    }
    print_success(&format!("Added {} sample customers", added.value.len()));
    display_customers(&added.value, session.currency());
    Ok(())
}

/// Warn when a change only reached memory.
pub fn report_persistence(status: &PersistenceStatus) {
    if let PersistenceStatus::Degraded { reason } = status {
        print_warning(&format!(
            "Changes are kept for this session but could not be saved: {reason}"
        ));
    }
}
