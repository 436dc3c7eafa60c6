use crate::bdd::TestContext;
use powerbill_billing::domain::{
    BillStatus, CustomerId, FixedClock, PaymentOutcome, PersistenceStatus,
};
use powerbill_billing::BillingError;

#[test]
fn test_add_then_pay_end_to_end() {
    let context = TestContext::new();
    let mut service = context.open_service();

    let added = service
        .add_customer("Ram Kumar", "Village Road 12", 120)
        .expect("Failed to add customer");
    assert_eq!(added.persistence, PersistenceStatus::Saved);
    assert_eq!(added.value.id(), CustomerId::FIRST);
    assert_eq!(
        added.value.amount_due().to_string(),
        "250.00",
        "100 * 1.50 + 20 * 2.50 + 50"
    );

    let outcome = service.pay_bill(added.value.id(), true);
    let PaymentOutcome::Paid { record, persistence } = outcome else {
        panic!("Payment should succeed, got {outcome:?}");
    };
    assert!(record.is_paid());
    assert_eq!(record.payment_date(), Some(context.today));
    assert_eq!(persistence, PersistenceStatus::Saved);

    let reopened = context.open_service();
    let bill = reopened.get_bill(CustomerId::FIRST).expect("Bill should exist");
    assert_eq!(bill.status, BillStatus::Paid { on: context.today });
    assert_eq!(bill.amount_due.to_string(), "250.00");
}

#[test]
fn test_ids_continue_after_reload() {
    let context = TestContext::new();
    {
        let mut service = context.open_service();
        for (name, units) in [("A", 10), ("B", 20), ("C", 30)] {
            service
                .add_customer(name, "Street", units)
                .expect("Failed to add customer");
        }
    }

    let mut service = context.open_service();
    assert_eq!(service.next_id().as_u32(), 4);
    let added = service
        .add_customer("D", "Street", 40)
        .expect("Failed to add customer");
    assert_eq!(added.value.id().as_u32(), 4);
    assert_eq!(context.stored_count(), 4);
}

#[test]
fn test_second_payment_is_reported_not_applied() {
    let context = TestContext::new();
    let mut service = context.open_service();
    let id = service
        .add_customer("Sita Devi", "Green Street", 250)
        .expect("Failed to add customer")
        .value
        .id();
    assert!(matches!(service.pay_bill(id, true), PaymentOutcome::Paid { .. }));
    let after_first = context.read_data_file();

    let next_day = context.today.succ_opt().expect("valid date");
    let mut service = context.open_service().with_clock(FixedClock(next_day));
    assert_eq!(
        service.pay_bill(id, true),
        PaymentOutcome::AlreadyPaid {
            id,
            paid_on: context.today
        }
    );
    assert_eq!(context.read_data_file(), after_first);
}

#[test]
fn test_unknown_and_declined_payments_change_nothing() {
    let context = TestContext::new();
    let mut service = context.open_service();
    service
        .add_sample_data()
        .expect("Failed to add sample data");
    let before = context.read_data_file();

    let unknown = CustomerId::new(99).expect("valid id");
    assert_eq!(
        service.pay_bill(unknown, true),
        PaymentOutcome::NotFound { id: unknown }
    );
    assert_eq!(
        service.pay_bill(CustomerId::FIRST, false),
        PaymentOutcome::Declined {
            id: CustomerId::FIRST
        }
    );

    assert_eq!(service.list_all().len(), 2);
    assert!(service.list_all().iter().all(|r| !r.is_paid()));
    assert_eq!(context.read_data_file(), before);
}

#[test]
fn test_rejected_input_is_not_persisted() {
    let context = TestContext::new();
    let mut service = context.open_service();

    let err = service
        .add_customer("", "Village Road 12", 120)
        .expect_err("Empty name must be rejected");
    assert!(err.is_user_error());
    assert!(matches!(
        service.add_customer("Ram Kumar", "Village Road 12", -3),
        Err(BillingError::Validation { .. })
    ));

    assert!(!context.data_file.exists());
    assert_eq!(service.next_id(), CustomerId::FIRST);
}
