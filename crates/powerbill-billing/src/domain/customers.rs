use crate::domain::clock::{Clock, SystemClock};
use crate::domain::ledger::CustomerLedger;
use crate::domain::tariff::BillCalculator;
use crate::domain::types::{BillSummary, CustomerId, CustomerRecord};
use crate::error::{BillingError, Result};
use crate::storage::RecordRepository;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Demo customers added by [`CustomerService::add_sample_data`]
pub const SAMPLE_CUSTOMERS: [(&str, &str, i64); 2] = [
    ("Ram Kumar", "Village Road 12", 120),
    ("Sita Devi", "Green Street", 250),
];

/// Whether the collection reached storage after a mutation.
///
/// A failed save does not undo the mutation: the session keeps working from
/// memory and the caller is expected to surface the warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistenceStatus {
    Saved,
    Degraded { reason: String },
}

impl PersistenceStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, PersistenceStatus::Degraded { .. })
    }
}

/// Result of a mutation together with its persistence status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Persisted<T> {
    pub value: T,
    pub persistence: PersistenceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PaymentOutcome {
    Paid {
        record: CustomerRecord,
        persistence: PersistenceStatus,
    },
    AlreadyPaid {
        id: CustomerId,
        paid_on: NaiveDate,
    },
    NotFound {
        id: CustomerId,
    },
    Declined {
        id: CustomerId,
    },
}

/// Registers customers, prices their consumption and records payments.
///
/// Owns the in-memory ledger; every mutation is followed by a full save
/// through the repository.
pub struct CustomerService<R: RecordRepository> {
    ledger: CustomerLedger,
    repository: R,
    calculator: Box<dyn BillCalculator>,
    clock: Box<dyn Clock>,
}

impl<R: RecordRepository> CustomerService<R> {
    /// Load the stored collection and build a service over it.
    pub fn open(repository: R, calculator: impl BillCalculator + 'static) -> Result<Self> {
        let records = repository.load_all()?;
        let ledger = CustomerLedger::from_records(records)?;
        info!(
            "Loaded {} customers from {} (next id {})",
            ledger.len(),
            repository.location(),
            ledger.next_id()
        );

        Ok(Self {
            ledger,
            repository,
            calculator: Box::new(calculator),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn next_id(&self) -> CustomerId {
        self.ledger.next_id()
    }

    /// Register a customer and bill their consumption.
    ///
    /// Rejects an empty name or negative units before any id is assigned.
    pub fn add_customer(
        &mut self,
        name: &str,
        address: &str,
        units: i64,
    ) -> Result<Persisted<CustomerRecord>> {
        let record = self.insert_customer(name, address, units)?;
        let persistence = self.persist("add customer");
        Ok(Persisted {
            value: record,
            persistence,
        })
    }

    /// Add the two demo customers and save once. Adds neither if both
    /// cannot get an id.
    pub fn add_sample_data(&mut self) -> Result<Persisted<Vec<CustomerRecord>>> {
        if !self.ledger.has_room_for(SAMPLE_CUSTOMERS.len()) {
            return Err(BillingError::validation(
                "customer id",
                "no customer ids left for the sample data",
            ));
        }
        let mut added = Vec::with_capacity(SAMPLE_CUSTOMERS.len());
        for (name, address, units) in SAMPLE_CUSTOMERS {
            added.push(self.insert_customer(name, address, units)?);
        }
        let persistence = self.persist("add sample data");
        Ok(Persisted {
            value: added,
            persistence,
        })
    }

    fn insert_customer(&mut self, name: &str, address: &str, units: i64) -> Result<CustomerRecord> {
        if name.trim().is_empty() {
            return Err(BillingError::validation("name", "name cannot be empty"));
        }
        if units < 0 {
            return Err(BillingError::validation(
                "units",
                format!("units must be a non-negative integer, got {units}"),
            ));
        }

        let amount = self.calculator.compute_amount(units);
        let units = units.unsigned_abs();
        let record = self
            .ledger
            .append_with(|id| {
                CustomerRecord::new(id, name.to_string(), address.to_string(), units, amount)
            })?
            .clone();

        info!(
            "Added customer {} ({} units, amount due {})",
            record.id(),
            record.units_consumed(),
            record.amount_due()
        );
        Ok(record)
    }

    pub fn find_by_id(&self, id: CustomerId) -> Option<&CustomerRecord> {
        self.ledger.find(id)
    }

    pub fn get_bill(&self, id: CustomerId) -> Result<BillSummary> {
        self.find_by_id(id)
            .map(CustomerRecord::summary)
            .ok_or(BillingError::CustomerNotFound { id })
    }

    /// Mark a bill paid as of today.
    ///
    /// Unknown ids, already-paid bills and unconfirmed payments change nothing.
    pub fn pay_bill(&mut self, id: CustomerId, confirmed: bool) -> PaymentOutcome {
        let today = self.clock.today();
        let record = match self.ledger.find_mut(id) {
            None => return PaymentOutcome::NotFound { id },
            Some(record) => record,
        };

        if let Some(paid_on) = record.payment_date() {
            debug!("Customer {} already paid on {}", id, paid_on);
            return PaymentOutcome::AlreadyPaid { id, paid_on };
        }
        if !confirmed {
            debug!("Payment for customer {} declined", id);
            return PaymentOutcome::Declined { id };
        }

        record.mark_paid(today);
        let record = record.clone();
        info!(
            "Customer {} paid {} on {}",
            id,
            record.amount_due(),
            today
        );

        let persistence = self.persist("pay bill");
        PaymentOutcome::Paid {
            record,
            persistence,
        }
    }

    /// Records in insertion order.
    pub fn list_all(&self) -> &[CustomerRecord] {
        self.ledger.records()
    }

    /// Save the collection without mutating it, e.g. when the session ends.
    pub fn flush(&self) -> PersistenceStatus {
        self.persist("flush")
    }

    fn persist(&self, operation: &str) -> PersistenceStatus {
        match self.repository.save_all(self.ledger.records()) {
            Ok(()) => PersistenceStatus::Saved,
            Err(e) => {
                warn!(
                    "Could not save customers to {} after {}: {}",
                    self.repository.location(),
                    operation,
                    e
                );
                PersistenceStatus::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }
}
