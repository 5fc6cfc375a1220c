//! The in-memory record store: the single source of truth for the session.

use crate::error::ValidationError;
use crate::model::{Expense, NewExpense, RecordId};
use chrono::Utc;
use std::collections::HashSet;
use tracing::warn;

/// Holds every expense in insertion order. All ids are unique.
///
/// The store itself does no I/O. The caller is responsible for persisting and refreshing the views
/// after each successful `add` or `remove`, see `App`.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct RecordStore {
    records: Vec<Expense>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously persisted records. A record whose id was already seen is
    /// dropped so that the unique id invariant holds.
    pub fn from_records(records: impl IntoIterator<Item = Expense>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| {
                let fresh = seen.insert(r.id());
                if !fresh {
                    warn!("Dropping expense with duplicate id {}", r.id());
                }
                fresh
            })
            .collect();
        Self { records }
    }

    /// Validates `draft` and appends it with a new id based on the current time.
    pub fn add(&mut self, draft: NewExpense) -> Result<Expense, ValidationError> {
        self.add_at(draft, Utc::now().timestamp_millis())
    }

    /// Same as `add`, with the clock reading supplied by the caller.
    pub(crate) fn add_at(
        &mut self,
        draft: NewExpense,
        now_millis: i64,
    ) -> Result<Expense, ValidationError> {
        let expense = draft.into_expense(self.next_id(now_millis))?;
        self.records.push(expense.clone());
        Ok(expense)
    }

    /// Removes and returns the expense with `id`, or `None` if there is no such expense.
    pub fn remove(&mut self, id: RecordId) -> Option<Expense> {
        let ix = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(ix))
    }

    pub fn get(&self, id: RecordId) -> Option<&Expense> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// All expenses in insertion order.
    pub fn all(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The clock reading, unless an existing id is equal or later, in which case one past the
    /// largest id. Two additions in the same millisecond therefore still get distinct ids.
    ///
    /// If the largest id is `i64::MAX` there is nothing past it, and the first unused id from the
    /// clock reading onwards (wrapping around) is taken instead.
    fn next_id(&self, now_millis: i64) -> RecordId {
        let next = match self.records.iter().map(|r| r.id().value()).max() {
            Some(max) if max >= now_millis => match max.checked_add(1) {
                Some(next) => next,
                None => self.first_unused_id(now_millis),
            },
            _ => now_millis,
        };
        RecordId::new(next)
    }

    fn first_unused_id(&self, from: i64) -> i64 {
        let used: HashSet<i64> = self.records.iter().map(|r| r.id().value()).collect();
        (from..=i64::MAX)
            .chain(i64::MIN..from)
            .find(|id| !used.contains(id))
            .unwrap_or(from)
    }
}
