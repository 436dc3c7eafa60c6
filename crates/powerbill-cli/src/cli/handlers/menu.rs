use super::{customers, Session};
use crate::error::{CliError, Result};
use crate::interactive::{MenuAction, MenuInput};
use crate::output::{print_error, print_info};
use powerbill_billing::storage::RecordRepository;
use tracing::{info, warn};

/// Run the numbered menu until the user exits, then save.
///
/// Failed actions are reported and the loop continues. Only a prompt failure
/// ends the session early, and the records are still saved in that case.
pub fn handle_menu<R: RecordRepository, I: MenuInput>(
    session: &mut Session<R>,
    input: &mut I,
) -> Result<()> {
    let result = run_menu(session, input);

    let status = session.service.flush();
    customers::report_persistence(&status);
    if !status.is_degraded() {
        print_info("Data saved. Goodbye!");
    }
    result
}

fn run_menu<R: RecordRepository, I: MenuInput>(
    session: &mut Session<R>,
    input: &mut I,
) -> Result<()> {
    loop {
        let action = input.choose_action()?;
        let result = match action {
            MenuAction::Exit => {
                info!("Menu exit requested");
                return Ok(());
            }
            MenuAction::AddCustomer => {
                let customer = input.new_customer()?;
                customers::handle_add(session, customer)
            }
            MenuAction::ViewBill => {
                let id = input.customer_id()?;
                customers::handle_bill(session, id)
            }
            MenuAction::PayBill => {
                let id = input.customer_id()?;
                customers::handle_pay(session, id, false, input)
            }
            MenuAction::ListAll => customers::handle_ls(session),
            MenuAction::AddSampleData => customers::handle_sample(session),
        };

        match result {
            Ok(()) => {}
            Err(e @ CliError::Interactive(_)) => return Err(e),
            Err(e) if e.is_user_error() => print_error(&e.to_string()),
            Err(e) => {
                warn!("Menu action {:?} failed: {}", action, e);
                print_error(&format!("Operation failed: {e}"));
            }
        }
    }
}
