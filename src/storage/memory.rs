//! Implements `Storage` in memory. Useful for running the app without touching the disk.

use crate::model::Expense;
use crate::storage::{Saved, Storage};
use crate::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// An in-memory `Storage`. Clones share the same data, so a caller can keep a handle to inspect
/// what was saved after giving the storage away.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    saved: Saved,
    saves: usize,
}

impl MemoryStorage {
    /// Create a `MemoryStorage` seeded with `saved`.
    pub fn new(saved: Saved) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner { saved, saves: 0 })),
        }
    }

    /// The data as of the last save (or the seed data).
    pub fn saved(&self) -> Saved {
        self.inner.borrow().saved.clone()
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl Storage for MemoryStorage {
    fn load(&mut self) -> Result<Saved> {
        Ok(self.saved())
    }

    fn save(&mut self, expenses: &[Expense], username: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.saved = Saved {
            expenses: expenses.to_vec(),
            username: username.to_string(),
        };
        inner.saves += 1;
        Ok(())
    }
}

#[test]
fn test_memory_storage_shares_state() {
    let handle = MemoryStorage::default();
    let mut storage = handle.clone();
    assert_eq!(storage.load().unwrap(), Saved::default());
    let expenses = vec![Expense::for_test(5, "1", "Food", "2024-01-01")];
    storage.save(&expenses, "me").unwrap();
    assert_eq!(handle.saves(), 1);
    assert_eq!(handle.saved().expenses, expenses);
    assert_eq!(handle.saved().username, "me");
}
