use crate::domain::types::{CustomerId, CustomerRecord};
use crate::error::{BillingError, Result};
use std::collections::HashSet;

/// Ordered in-memory collection of customer records.
///
/// Records keep insertion order and are never removed. Ids are unique and the
/// next id is always one past the largest id ever held.
#[derive(Debug, Clone)]
pub struct CustomerLedger {
    records: Vec<CustomerRecord>,
    next_id: CustomerId,
}

impl CustomerLedger {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: CustomerId::FIRST,
        }
    }

    /// Adopt previously stored records, rejecting duplicate ids.
    pub fn from_records(records: Vec<CustomerRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(BillingError::validation(
                    "customer id",
                    format!("duplicate id {}", record.id()),
                ));
            }
        }
        let next_id = next_customer_id(&records)?;
        Ok(Self { records, next_id })
    }

    pub fn next_id(&self) -> CustomerId {
        self.next_id
    }

    /// Whether `count` more records can be appended before ids run out.
    pub fn has_room_for(&self, count: usize) -> bool {
        u64::from(self.next_id.as_u32()) + count as u64 <= u64::from(u32::MAX)
    }

    /// Append a new record under the next free id.
    pub fn append_with(&mut self, build: impl FnOnce(CustomerId) -> CustomerRecord) -> Result<&CustomerRecord> {
        let id = self.next_id;
        let following = id.next().ok_or_else(|| {
            BillingError::validation("customer id", "no customer ids left to assign")
        })?;
        let record = build(id);
        debug_assert_eq!(record.id(), id);
        self.records.push(record);
        self.next_id = following;
        Ok(&self.records[self.records.len() - 1])
    }

    /// First record with `id`.
    pub fn find(&self, id: CustomerId) -> Option<&CustomerRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: CustomerId) -> Option<&mut CustomerRecord> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for CustomerLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// `max(existing ids) + 1`, or the first id for an empty collection.
pub fn next_customer_id(records: &[CustomerRecord]) -> Result<CustomerId> {
    match records.iter().map(CustomerRecord::id).max() {
        None => Ok(CustomerId::FIRST),
        Some(max) => max.next().ok_or_else(|| {
            BillingError::validation("customer id", "no customer ids left to assign")
        }),
    }
}
