//! Rent statistics and the chart series derived from them.

use std::fmt;

use serde::Serialize;

use super::apartment::Apartment;

/// Total, minimum and maximum rent over a set of apartments.
///
/// An empty set yields zero for every figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RentStatistics {
    /// Sum of all rents.
    pub total: f64,
    /// Lowest rent.
    pub min: f64,
    /// Highest rent.
    pub max: f64,
}

/// Labels shared by both chart series, in display order.
pub const SERIES_LABELS: [&str; 3] = ["Total", "Min", "Max"];

const PIE_COLORS: [&str; 3] = ["#FF5733", "#33FF57", "#3357FF"];

impl RentStatistics {
    /// Reduce the given apartments to their rent statistics.
    ///
    /// # Examples
    /// ```
    /// use apartments::domain::{Apartment, RentStatistics};
    ///
    /// let stats = RentStatistics::aggregate(&Vec::<Apartment>::new());
    /// assert_eq!(stats, RentStatistics { total: 0.0, min: 0.0, max: 0.0 });
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "rent totals are floating-point sums by definition"
    )]
    pub fn aggregate<'a>(apartments: impl IntoIterator<Item = &'a Apartment>) -> Self {
        let mut rents = apartments.into_iter().map(|apartment| apartment.loyer().value());
        let Some(first) = rents.next() else {
            return Self::default();
        };

        rents.fold(
            Self {
                total: first,
                min: first,
                max: first,
            },
            |stats, rent| Self {
                total: stats.total + rent,
                min: stats.min.min(rent),
                max: stats.max.max(rent),
            },
        )
    }

    /// Figures in [`SERIES_LABELS`] order.
    pub fn values(&self) -> [f64; 3] {
        [self.total, self.min, self.max]
    }

    /// Bar chart input: one bar per figure.
    pub fn bar_series(&self) -> BarSeries {
        BarSeries {
            labels: SERIES_LABELS,
            values: self.values(),
        }
    }

    /// Pie chart input: one slice per figure, with fixed colours.
    pub fn pie_series(&self) -> Vec<PieSlice> {
        SERIES_LABELS
            .into_iter()
            .zip(self.values())
            .zip(PIE_COLORS)
            .map(|((name, value), color)| PieSlice { name, value, color })
            .collect()
    }
}

/// Labelled values for a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    /// Bar labels.
    pub labels: [&'static str; 3],
    /// Bar heights, aligned with `labels`.
    pub values: [f64; 3],
}

/// One slice of the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    /// Legend label.
    pub name: &'static str,
    /// Slice value.
    pub value: f64,
    /// Fill colour as a hex string.
    pub color: &'static str,
}

/// Chart shown by the statistics view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Bar chart.
    #[default]
    Bar,
    /// Pie chart.
    Pie,
}

impl ChartKind {
    /// The other chart kind.
    pub fn toggled(self) -> Self {
        match self {
            Self::Bar => Self::Pie,
            Self::Pie => Self::Bar,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
        })
    }
}
