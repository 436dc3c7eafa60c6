use crate::bdd::TestContext;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use powerbill_billing::domain::{Amount, CustomerId, CustomerRecord, PersistenceStatus};
use powerbill_billing::storage::RecordRepository;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn text_field() -> impl Strategy<Value = String> {
    // Delimiters, quotes and line breaks are the interesting characters.
    proptest::collection::vec(
        prop_oneof![
            Just(",".to_string()),
            Just("\"".to_string()),
            Just("\"\"".to_string()),
            Just("\n".to_string()),
            Just(" ".to_string()),
            "[a-zA-Z0-9 .'-]{1,8}",
            "\\PC{1,4}",
        ],
        1..6,
    )
    .prop_map(|parts| parts.concat())
}

fn name_field() -> impl Strategy<Value = String> {
    text_field().prop_filter("names are never blank", |s| !s.trim().is_empty())
}

fn records() -> impl Strategy<Value = Vec<CustomerRecord>> {
    proptest::collection::vec(
        (
            name_field(),
            text_field(),
            0u64..100_000,
            0i64..10_000_000,
            proptest::option::of(0u32..20_000),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (name, address, units, cents, paid_offset))| {
                let id = CustomerId::new(index as u32 * 3 + 1).expect("positive id");
                let amount = Amount::from_decimal(Decimal::new(cents, 2));
                let paid_on = paid_offset.map(|days| {
                    NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date")
                        + chrono::Duration::days(i64::from(days))
                });
                CustomerRecord::restore(id, name, address, units, amount, paid_on)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn saved_records_load_back_identically(records in records()) {
        let context = TestContext::new();
        let repo = context.repository();

        repo.save_all(&records).expect("Failed to save");
        let loaded = repo.load_all().expect("Failed to load");
        prop_assert_eq!(&loaded, &records);

        repo.save_all(&loaded).expect("Failed to save again");
        prop_assert_eq!(repo.load_all().expect("Failed to reload"), records);
    }
}

#[test]
fn test_insertion_order_survives_reload() {
    let context = TestContext::new();
    let mut service = context.open_service();
    service
        .add_customer("Zed \"Z\" Zulu", "Last, Lane", 5)
        .expect("Failed to add customer");
    service
        .add_customer("Abel", "First \"Street\"", 500)
        .expect("Failed to add customer");

    let names: Vec<String> = context
        .open_service()
        .list_all()
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    assert_eq!(names, vec!["Zed \"Z\" Zulu", "Abel"]);
}

#[test]
fn test_saving_leaves_no_temporary_files() {
    let context = TestContext::new();
    let mut service = context.open_service();
    service
        .add_sample_data()
        .expect("Failed to add sample data");
    assert_eq!(service.flush(), PersistenceStatus::Saved);

    let entries: Vec<_> = std::fs::read_dir(context.dir.path())
        .expect("Failed to list temp dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("customers.csv")]);
}

#[test]
fn test_unwritable_location_degrades_without_losing_state() {
    let context = TestContext::new();
    let mut service = context.open_service();
    // A directory where the data file should be makes every save fail.
    std::fs::create_dir(&context.data_file).expect("Failed to create blocking dir");

    let added = service
        .add_customer("Ram Kumar", "Village Road 12", 120)
        .expect("Validation should pass");
    assert!(added.persistence.is_degraded());
    assert_eq!(service.list_all().len(), 1);
    assert_eq!(
        service
            .get_bill(CustomerId::FIRST)
            .expect("Bill should exist in memory")
            .amount_due
            .to_string(),
        "250.00"
    );
    assert!(service.flush().is_degraded());
}
