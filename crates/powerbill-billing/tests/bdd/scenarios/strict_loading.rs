use crate::bdd::TestContext;
use powerbill_billing::domain::{CustomerService, SlabTariff};
use powerbill_billing::BillingError;

const HEADER: &str = "id,name,address,units,amount,paid,paymentDate\n";

fn open_error(context: &TestContext) -> BillingError {
    match CustomerService::open(context.repository(), SlabTariff::standard()) {
        Ok(_) => panic!("Opening a malformed file should fail"),
        Err(e) => e,
    }
}

#[test]
fn test_empty_file_is_an_empty_collection() {
    let context = TestContext::new();
    context.write_data_file("");

    let service = context.open_service();
    assert!(service.list_all().is_empty());
    assert_eq!(service.next_id().as_u32(), 1);
}

#[test]
fn test_header_only_file_is_an_empty_collection() {
    let context = TestContext::new();
    context.write_data_file(HEADER);
    assert_eq!(context.stored_count(), 0);
}

#[test]
fn test_bad_row_rejects_whole_file_with_line() {
    let context = TestContext::new();
    context.write_data_file(&format!(
        "{HEADER}1,\"Ram Kumar\",\"Village Road 12\",120,250.00,0,\"\"\n\
         2,\"Sita Devi\",\"Green Street\",lots,600.00,0,\"\"\n"
    ));

    match open_error(&context) {
        BillingError::MalformedRecord { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("units"), "reason was {reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
    // The file is left untouched for the operator to repair.
    assert!(context.read_data_file().contains("lots"));
}

#[test]
fn test_inconsistent_payment_fields_rejected() {
    let context = TestContext::new();
    context.write_data_file(&format!(
        "{HEADER}1,\"Ram Kumar\",\"Village Road 12\",120,250.00,1,\"\"\n"
    ));

    assert!(matches!(
        open_error(&context),
        BillingError::MalformedRecord { line: 2, .. }
    ));
}

#[test]
fn test_duplicate_ids_rejected() {
    let context = TestContext::new();
    context.write_data_file(&format!(
        "{HEADER}4,\"A\",\"x\",1,51.50,0,\"\"\n4,\"B\",\"y\",2,53.00,0,\"\"\n"
    ));

    match open_error(&context) {
        BillingError::MalformedRecord { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("duplicate"), "reason was {reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_quoted_multiline_fields_load() {
    let context = TestContext::new();
    context.write_data_file(&format!(
        "{HEADER}7,\"O\"\"Brien, Pat\",\"Flat 2\nMain Road\",0,0.00,1,\"2024-03-01\"\n"
    ));

    let service = context.open_service();
    let record = &service.list_all()[0];
    assert_eq!(record.name(), "O\"Brien, Pat");
    assert_eq!(record.address(), "Flat 2\nMain Road");
    assert!(record.is_paid());
    assert_eq!(service.next_id().as_u32(), 8);
}
