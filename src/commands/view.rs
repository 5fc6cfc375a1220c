use crate::app::Event;
use crate::args::ViewArgs;
use crate::chart::{ChartKind, SvgCharts};
use crate::commands::{plural, start, Out};
use crate::{Config, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Where the charts were drawn.
#[derive(Debug, Clone, Serialize)]
pub struct Drawn {
    pub time_chart: PathBuf,
    pub category_chart: PathBuf,
}

/// Redraws both charts. With `--by`, the time chart is switched to that granularity for this
/// session; the configured default is left unchanged.
pub fn view(config: Config, args: ViewArgs) -> Result<Out<Drawn>> {
    let charts = SvgCharts::new(config.charts_dir())?;
    let drawn = Drawn {
        time_chart: charts.path(ChartKind::Bar),
        category_chart: charts.path(ChartKind::Doughnut),
    };

    let mut app = start(&config, charts)?;
    if let Some(granularity) = args.by() {
        app.dispatch(Event::SelectGranularity(granularity))?;
    }

    let count = app.records().len();
    let message = format!(
        "Charted {count} expense{} by {} to {}",
        plural(count),
        app.granularity(),
        config.charts_dir().display()
    );
    Ok(Out::new(message, drawn))
}
