//! Port for whatever draws the rent statistics chart.

use crate::domain::{BarSeries, PieSlice};

/// Consumer of the precomputed chart series.
///
/// Rendering is entirely the implementor's concern.
#[cfg_attr(test, mockall::automock)]
pub trait ChartPresenter {
    /// Draw the bar chart.
    fn present_bar(&self, series: &BarSeries);

    /// Draw the pie chart.
    fn present_pie(&self, slices: &[PieSlice]);
}
