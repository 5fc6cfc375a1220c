//! The application controller. It owns the whole application state (the record store, the chosen
//! granularity and the display name) and runs every user event through the same sequence:
//! mutate the store, persist, refresh the views.

use crate::model::{Expense, Granularity, NewExpense, RecordId};
use crate::storage::Storage;
use crate::store::RecordStore;
use crate::view::{Screen, ViewSync};
use crate::Result;
use tracing::{debug, info};

/// A user action. Delete controls identify their row by record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Submit(NewExpense),
    Delete(RecordId),
    SelectGranularity(Granularity),
    Rename(String),
}

pub struct App {
    storage: Box<dyn Storage>,
    view: ViewSync,
    store: RecordStore,
    granularity: Granularity,
    username: String,
}

impl App {
    /// Loads the saved data and draws everything for the first time.
    pub fn start(
        mut storage: Box<dyn Storage>,
        view: ViewSync,
        granularity: Granularity,
    ) -> Result<Self> {
        let saved = storage.load()?;
        let mut app = Self {
            storage,
            view,
            store: RecordStore::from_records(saved.expenses),
            granularity,
            username: saved.username,
        };
        debug!(
            "Started with {} expenses at {granularity} granularity",
            app.store.len()
        );
        app.refresh_all()?;
        Ok(app)
    }

    /// Handles one user event to completion.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Submit(draft) => self.submit(draft).map(|_| ()),
            Event::Delete(id) => self.delete(id).map(|_| ()),
            Event::SelectGranularity(granularity) => self.set_granularity(granularity),
            Event::Rename(name) => self.rename(name),
        }
    }

    /// Adds an expense, saves, and redraws. A `ValidationError` leaves everything untouched.
    pub fn submit(&mut self, draft: NewExpense) -> Result<Expense> {
        let expense = self.store.add(draft)?;
        info!(
            "Added expense {} of {} ({})",
            expense.id(),
            expense.amount(),
            expense.category()
        );
        self.save()?;
        self.refresh_all()?;
        Ok(expense)
    }

    /// Deletes the expense with `id`, saves, and redraws. An unknown `id` deletes nothing but is
    /// not an error; the save and redraw still happen.
    pub fn delete(&mut self, id: RecordId) -> Result<Option<Expense>> {
        let removed = self.store.remove(id);
        match &removed {
            Some(_) => info!("Deleted expense {id}"),
            None => debug!("No expense with id {id} to delete"),
        }
        self.save()?;
        self.refresh_all()?;
        Ok(removed)
    }

    /// Changes the time chart granularity. Only the time chart is redrawn.
    pub fn set_granularity(&mut self, granularity: Granularity) -> Result<()> {
        self.granularity = granularity;
        self.view
            .refresh_time_chart(self.store.all(), self.granularity)
    }

    /// Changes the display name and saves. Nothing is redrawn.
    pub fn rename(&mut self, username: impl Into<String>) -> Result<()> {
        self.username = username.into();
        self.save()
    }

    pub fn records(&self) -> &[Expense] {
        self.store.all()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn screen(&self) -> &Screen {
        self.view.screen()
    }

    fn save(&mut self) -> Result<()> {
        self.storage.save(self.store.all(), &self.username)
    }

    fn refresh_all(&mut self) -> Result<()> {
        self.view.refresh_all(self.store.all(), self.granularity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::recording::RecordingCharts;
    use crate::chart::ChartKind;
    use crate::error::{Field, ValidationError};
    use crate::storage::{MemoryStorage, Saved};

    struct Harness {
        app: App,
        storage: MemoryStorage,
        charts: RecordingCharts,
    }

    fn harness(saved: Saved) -> Harness {
        let storage = MemoryStorage::new(saved);
        let charts = RecordingCharts::default();
        let view = ViewSync::new(Box::new(charts.clone()), "PKR");
        let app = App::start(Box::new(storage.clone()), view, Granularity::Month).unwrap();
        Harness {
            app,
            storage,
            charts,
        }
    }

    fn draft(amount: &str, category: &str, date: &str) -> NewExpense {
        NewExpense::new("something", amount, category, date)
    }

    #[test]
    fn test_first_run_is_empty() {
        let h = harness(Saved::default());
        assert!(h.app.records().is_empty());
        assert_eq!(h.app.username(), "");
        assert_eq!(h.app.screen().total(), "0.00");
        assert_eq!(h.storage.saves(), 0);
        assert_eq!(h.charts.creates(ChartKind::Bar), 1);
        assert_eq!(h.charts.creates(ChartKind::Doughnut), 1);
    }

    #[test]
    fn test_example_scenario() {
        let mut h = harness(Saved::default());
        h.app.submit(draft("100", "Food", "2024-01-05")).unwrap();
        h.app.submit(draft("50", "Food", "2024-01-20")).unwrap();
        h.app.submit(draft("75", "Travel", "2024-02-01")).unwrap();

        assert_eq!(h.app.screen().total(), "225.00");
        assert_eq!(h.app.screen().rows().len(), 3);
        let bar = h.charts.last(ChartKind::Bar).unwrap();
        assert_eq!(bar.labels, vec!["2024-01", "2024-02"]);
        assert_eq!(bar.values, vec![150.0, 75.0]);
        let doughnut = h.charts.last(ChartKind::Doughnut).unwrap();
        assert_eq!(doughnut.labels, vec!["Food", "Travel"]);
        assert_eq!(doughnut.values, vec![150.0, 75.0]);

        assert_eq!(h.storage.saves(), 3);
        assert_eq!(h.storage.saved().expenses, h.app.records());
        assert_eq!(h.charts.creates(ChartKind::Bar), 1);
    }

    #[test]
    fn test_invalid_submit_touches_nothing() {
        let mut h = harness(Saved::default());
        h.app.submit(draft("10", "Food", "2024-01-05")).unwrap();
        let calls = h.charts.calls().len();
        let screen = h.app.screen().clone();

        let err = h.app.submit(draft("-1", "", "2024-01-05")).unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(validation.fields(), &[Field::Amount, Field::Category]);

        assert_eq!(h.app.records().len(), 1);
        assert_eq!(h.storage.saves(), 1);
        assert_eq!(h.charts.calls().len(), calls);
        assert_eq!(h.app.screen(), &screen);
    }

    #[test]
    fn test_huge_amounts_are_rejected_before_saving() {
        let mut h = harness(Saved::default());
        h.app
            .submit(draft("1,000,000,000,000,000", "Food", "2024-01-05"))
            .unwrap();
        let err = h
            .app
            .submit(draft("79228162514264337593543950335", "Food", "2024-01-06"))
            .unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert_eq!(validation.fields(), &[Field::Amount]);
        assert_eq!(h.app.records().len(), 1);
        assert_eq!(h.storage.saves(), 1);
        assert_eq!(h.app.screen().total(), "1,000,000,000,000,000.00");
    }

    #[test]
    fn test_start_with_overflowing_saved_amounts() {
        let saved = Saved {
            expenses: vec![
                Expense::for_test(1, "79228162514264337593543950335", "Food", "2024-01-05"),
                Expense::for_test(2, "1", "Food", "2024-01-06"),
            ],
            username: String::new(),
        };
        let h = harness(saved);
        assert_eq!(h.app.records().len(), 2);
        assert_eq!(
            h.app.screen().total(),
            "79,228,162,514,264,337,593,543,950,335.00"
        );
    }

    #[test]
    fn test_delete_by_row_id() {
        let mut h = harness(Saved::default());
        h.app.submit(draft("10", "Food", "2024-01-05")).unwrap();
        h.app.submit(draft("20", "Rent", "2024-01-06")).unwrap();

        let id = h.app.screen().rows()[0].id;
        h.app.dispatch(Event::Delete(id)).unwrap();
        assert_eq!(h.app.records().len(), 1);
        assert_eq!(h.app.screen().total(), "20.00");
        assert_eq!(h.storage.saved().expenses.len(), 1);
        let doughnut = h.charts.last(ChartKind::Doughnut).unwrap();
        assert_eq!(doughnut.labels, vec!["Rent"]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut h = harness(Saved::default());
        h.app.submit(draft("10", "Food", "2024-01-05")).unwrap();
        let removed = h.app.delete(RecordId::new(-1)).unwrap();
        assert!(removed.is_none());
        assert_eq!(h.app.records().len(), 1);
        assert_eq!(h.app.screen().total(), "10.00");
    }

    #[test]
    fn test_granularity_change_only_touches_time_chart() {
        let mut h = harness(Saved::default());
        h.app.submit(draft("10", "Food", "2023-12-31")).unwrap();
        h.app.submit(draft("20", "Rent", "2024-01-01")).unwrap();
        let screen = h.app.screen().clone();
        let saves = h.storage.saves();
        h.charts.clear();

        h.app
            .dispatch(Event::SelectGranularity(Granularity::Year))
            .unwrap();
        assert_eq!(h.app.granularity(), Granularity::Year);
        assert_eq!(h.app.screen(), &screen);
        assert_eq!(h.storage.saves(), saves);
        assert!(h.charts.last(ChartKind::Doughnut).is_none());
        let bar = h.charts.last(ChartKind::Bar).unwrap();
        assert_eq!(bar.labels, vec!["2023", "2024"]);
        assert_eq!(bar.title.as_deref(), Some("Expenses Over Time (Year View)"));

        // Later refreshes keep the new granularity
        h.app.submit(draft("5", "Food", "2024-06-01")).unwrap();
        let bar = h.charts.last(ChartKind::Bar).unwrap();
        assert_eq!(bar.labels, vec!["2023", "2024"]);
        assert_eq!(bar.values, vec![10.0, 25.0]);
    }

    #[test]
    fn test_rename_saves_without_redraw() {
        let mut h = harness(Saved::default());
        h.app.dispatch(Event::Rename("Ayesha".into())).unwrap();
        assert_eq!(h.app.username(), "Ayesha");
        assert_eq!(h.storage.saved().username, "Ayesha");
        assert_eq!(h.charts.calls().len(), 2);
    }

    #[test]
    fn test_start_from_saved_data() {
        let saved = Saved {
            expenses: vec![
                Expense::for_test(1, "100", "Food", "2024-01-05"),
                Expense::for_test(2, "75", "Travel", "2024-02-01"),
            ],
            username: "Bilal".to_string(),
        };
        let mut h = harness(saved);
        assert_eq!(h.app.username(), "Bilal");
        assert_eq!(h.app.screen().total(), "175.00");

        // New ids never collide with loaded ones
        let added = h.app.submit(draft("1", "Food", "2024-03-01")).unwrap();
        assert!(added.id() > RecordId::new(2));
        assert_eq!(h.storage.saved().username, "Bilal");
    }
}
