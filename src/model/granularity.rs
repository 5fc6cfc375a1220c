use serde::{Deserialize, Serialize};

/// The time bucket size used by the bar chart.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    #[default]
    Month,
    Year,
}

serde_plain::derive_display_from_serialize!(Granularity);
serde_plain::derive_fromstr_from_deserialize!(Granularity);

impl Granularity {
    /// The grouping key for an ISO `YYYY-MM-DD` date: the full date, `YYYY-MM` or `YYYY`. Dates
    /// shorter than the prefix length are used whole.
    pub fn key<'a>(&self, date: &'a str) -> &'a str {
        let len = match self {
            Granularity::Day => 10,
            Granularity::Month => 7,
            Granularity::Year => 4,
        };
        date.get(..len).unwrap_or(date)
    }

    /// The bar chart title, e.g. `Expenses Over Time (Month View)`.
    pub fn title(&self) -> String {
        let name = self.to_string();
        let mut chars = name.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("Expenses Over Time ({capitalized} View)")
    }
}
