pub mod clock;
pub mod customers;
pub mod ledger;
pub mod tariff;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use customers::{CustomerService, PaymentOutcome, PersistenceStatus, Persisted};
pub use ledger::CustomerLedger;
pub use tariff::{BillCalculator, Slab, SlabCharge, SlabTariff, TariffBreakdown};
pub use types::{Amount, BillStatus, BillSummary, CustomerId, CustomerRecord};
