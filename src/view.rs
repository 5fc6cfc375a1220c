//! Keeps the summary total, the expense table and both charts consistent with the records.

use crate::aggregate;
use crate::chart::{ChartFactory, ChartKind, ChartSlot, ChartStyle, Series};
use crate::model::{Expense, Granularity, RecordId};
use crate::Result;
use serde::Serialize;
use tracing::debug;

/// One line of the expense table. `id` is what the row's delete control acts on.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Row {
    pub id: RecordId,
    pub description: String,
    /// The amount with exactly two fractional digits, e.g. `1,234.50`.
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl From<&Expense> for Row {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id(),
            description: expense.description().to_string(),
            amount: expense.amount().to_string(),
            category: expense.category().to_string(),
            date: expense.date().to_string(),
        }
    }
}

/// What the user currently sees besides the charts: the formatted total and the table rows.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Screen {
    total: String,
    rows: Vec<Row>,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            total: "0.00".to_string(),
            rows: Vec::new(),
        }
    }
}

impl Screen {
    pub fn total(&self) -> &str {
        &self.total
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Owns the screen and the two chart widgets, and is the only thing that writes to them.
pub struct ViewSync {
    charts: Box<dyn ChartFactory>,
    screen: Screen,
    time_style: ChartStyle,
    category_style: ChartStyle,
    time_chart: ChartSlot,
    category_chart: ChartSlot,
}

impl ViewSync {
    /// `currency` is the label used in the chart legends and axis.
    pub fn new(charts: Box<dyn ChartFactory>, currency: &str) -> Self {
        Self {
            charts,
            screen: Screen::default(),
            time_style: ChartStyle::time_bar(currency),
            category_style: ChartStyle::category_doughnut(currency),
            time_chart: ChartSlot::Uninitialized,
            category_chart: ChartSlot::Uninitialized,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Rebuilds everything: total, table, the time chart at `granularity`, and the category chart.
    pub fn refresh_all(&mut self, records: &[Expense], granularity: Granularity) -> Result<()> {
        self.screen.total = aggregate::total(records).to_string();
        self.screen.rows = records.iter().map(Row::from).collect();
        debug!(
            "Refreshed screen: {} rows, total {}",
            self.screen.rows.len(),
            self.screen.total
        );
        self.refresh_time_chart(records, granularity)?;
        self.refresh_category_chart(records)
    }

    /// Rebuilds only the time chart. Used when the granularity changes.
    pub fn refresh_time_chart(
        &mut self,
        records: &[Expense],
        granularity: Granularity,
    ) -> Result<()> {
        let view = aggregate::time_series(records, granularity);
        self.time_chart.show(
            self.charts.as_mut(),
            ChartKind::Bar,
            &Series::from(&view),
            &self.time_style,
        )
    }

    fn refresh_category_chart(&mut self, records: &[Expense]) -> Result<()> {
        let view = aggregate::category_breakdown(records);
        self.category_chart.show(
            self.charts.as_mut(),
            ChartKind::Doughnut,
            &Series::from(&view),
            &self.category_style,
        )
    }
}
