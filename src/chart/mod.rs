//! Chart widgets. The rendering itself is behind the `ChartFactory` and `Chart` traits; this
//! module only decides what series a widget shows and makes sure each widget is created once.

mod svg_chart;

pub use svg_chart::SvgCharts;

use crate::aggregate::{CategoryView, TimeSeriesView};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The kinds of chart that the views are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
}

serde_plain::derive_display_from_serialize!(ChartKind);

/// Where a chart places its legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Legend {
    Top,
    Right,
}

/// The labels, values and (optionally) title that a chart displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub title: Option<String>,
}

impl From<&TimeSeriesView> for Series {
    fn from(view: &TimeSeriesView) -> Self {
        Self {
            labels: view.labels().to_vec(),
            values: view.values().iter().map(|v| v.to_f64()).collect(),
            title: Some(view.title().to_string()),
        }
    }
}

impl From<&CategoryView> for Series {
    fn from(view: &CategoryView) -> Self {
        Self {
            labels: view.labels().to_vec(),
            values: view.values().iter().map(|v| v.to_f64()).collect(),
            title: None,
        }
    }
}

/// Fixed presentation settings, supplied once when a chart is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub dataset_label: String,
    /// Fill colors. A bar chart uses the first one; a doughnut cycles through them per slice.
    pub colors: Vec<String>,
    pub border_color: Option<String>,
    pub axis_title: Option<String>,
    pub legend: Legend,
    pub show_title: bool,
}

const PALETTE: &[&str] = &[
    "#007bff", "#28a745", "#ffc107", "#dc3545", "#17a2b8", "#6610f2", "#fd7e14",
];

impl ChartStyle {
    /// The style of the expenses-over-time bar chart.
    pub fn time_bar(currency: &str) -> Self {
        Self {
            dataset_label: format!("Total Expenses ({currency})"),
            colors: vec!["rgba(0, 123, 255, 0.7)".to_string()],
            border_color: Some("rgba(0, 123, 255, 1)".to_string()),
            axis_title: Some(format!("Amount ({currency})")),
            legend: Legend::Top,
            show_title: true,
        }
    }

    /// The style of the category breakdown doughnut chart.
    pub fn category_doughnut(currency: &str) -> Self {
        Self {
            dataset_label: format!("Expense Breakdown ({currency})"),
            colors: PALETTE.iter().map(|c| c.to_string()).collect(),
            border_color: None,
            axis_title: None,
            legend: Legend::Right,
            show_title: false,
        }
    }
}

/// A live chart widget. `update` replaces what the chart shows and redraws it in place.
pub trait Chart {
    fn update(&mut self, series: &Series) -> Result<()>;
}

/// Constructs chart widgets.
pub trait ChartFactory {
    fn create(
        &mut self,
        kind: ChartKind,
        series: &Series,
        style: &ChartStyle,
    ) -> Result<Box<dyn Chart>>;
}

/// One chart widget over its lifetime. The first `show` constructs the widget; every later call
/// updates that same widget. An active widget is never rebuilt.
#[derive(Default)]
pub(crate) enum ChartSlot {
    #[default]
    Uninitialized,
    Active(Box<dyn Chart>),
}

impl ChartSlot {
    pub(crate) fn show(
        &mut self,
        factory: &mut dyn ChartFactory,
        kind: ChartKind,
        series: &Series,
        style: &ChartStyle,
    ) -> Result<()> {
        match self {
            ChartSlot::Active(chart) => {
                trace!("Updating {kind} chart with {} points", series.values.len());
                chart.update(series)
            }
            ChartSlot::Uninitialized => {
                trace!("Creating {kind} chart with {} points", series.values.len());
                *self = ChartSlot::Active(factory.create(kind, series, style)?);
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        matches!(self, ChartSlot::Active(_))
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingCharts};
    use super::*;

    fn series(n: usize) -> Series {
        Series {
            labels: (0..n).map(|i| i.to_string()).collect(),
            values: (0..n).map(|i| i as f64).collect(),
            title: None,
        }
    }

    #[test]
    fn test_slot_creates_once_then_updates() {
        let mut factory = RecordingCharts::default();
        let style = ChartStyle::time_bar("PKR");
        let mut slot = ChartSlot::default();
        assert!(!slot.is_active());

        slot.show(&mut factory, ChartKind::Bar, &series(1), &style)
            .unwrap();
        assert!(slot.is_active());
        slot.show(&mut factory, ChartKind::Bar, &series(2), &style)
            .unwrap();
        slot.show(&mut factory, ChartKind::Bar, &series(0), &style)
            .unwrap();

        assert_eq!(
            factory.calls(),
            vec![
                Call::Create(ChartKind::Bar, series(1)),
                Call::Update(ChartKind::Bar, series(2)),
                Call::Update(ChartKind::Bar, series(0)),
            ]
        );
    }

    #[test]
    fn test_styles() {
        let bar = ChartStyle::time_bar("PKR");
        assert_eq!(bar.dataset_label, "Total Expenses (PKR)");
        assert_eq!(bar.axis_title.as_deref(), Some("Amount (PKR)"));
        assert!(bar.show_title);
        let doughnut = ChartStyle::category_doughnut("PKR");
        assert_eq!(doughnut.dataset_label, "Expense Breakdown (PKR)");
        assert_eq!(doughnut.colors.len(), 7);
        assert_eq!(doughnut.legend, Legend::Right);
    }
}
