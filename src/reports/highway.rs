//! Charts over the PRF highway-accident table.

use crate::normalize::highway::HighwayAccident;
use crate::reports::chart::{Chart, ChartKind};
use crate::reports::series::{Aggregate, Series};

pub fn highway_charts(rows: &[HighwayAccident]) -> Vec<Chart> {
    vec![
        accidents_per_year(rows),
        deaths_per_year(rows),
        percentages_per_city(rows),
        percentages_per_month(rows),
        percentages_per_cause(rows),
    ]
}

pub fn accidents_per_year(rows: &[HighwayAccident]) -> Chart {
    let series = Series::group_by(
        rows.iter()
            .filter_map(|r| Some((r.year?, f64::from(r.accident_occurred)))),
        Aggregate::Sum,
    );

    Chart::new(
        "Traffic accidents per year",
        "Year",
        "Accidents",
        "traffic_accidents_per_year.svg",
        ChartKind::Bar(series),
    )
}

pub fn deaths_per_year(rows: &[HighwayAccident]) -> Chart {
    let series = Series::group_by(
        rows.iter()
            .filter_map(|r| Some((r.year?, f64::from(r.dead.unwrap_or(0))))),
        Aggregate::Sum,
    );

    Chart::new(
        "Traffic accident deaths per year",
        "Year",
        "Deaths",
        "traffic_deaths_per_year.svg",
        ChartKind::Bar(series),
    )
}

pub fn percentages_per_city(rows: &[HighwayAccident]) -> Chart {
    let series = Series::value_counts(rows.iter().filter_map(|r| r.city.as_deref()))
        .proportions()
        .head(10)
        .sort_by_value();

    Chart::new(
        "Percentages of accidents per city",
        "Percentage (%)",
        "City",
        "percentages_of_traffic_accidents_per_city.svg",
        ChartKind::HorizontalBar(series),
    )
    .with_size(1200, 800)
}

pub fn percentages_per_month(rows: &[HighwayAccident]) -> Chart {
    let series = Series::value_counts(rows.iter().filter_map(|r| r.month.as_deref()))
        .proportions()
        .sort_by_value();

    Chart::new(
        "Traffic accidents by month",
        "Month",
        "Percentage (%)",
        "traffic_accidents_by_month_plot.svg",
        ChartKind::Bar(series),
    )
    .with_size(1100, 600)
}

/// Ten most frequent causes; untranslated causes are shown with their raw label.
pub fn percentages_per_cause(rows: &[HighwayAccident]) -> Chart {
    let causes = rows
        .iter()
        .filter_map(|r| r.translated_cause.as_deref().or(r.cause.as_deref()));
    let series = Series::value_counts(causes)
        .proportions()
        .head(10)
        .sort_by_value();

    Chart::new(
        "Percentages of accidents per cause",
        "Percentage (%)",
        "Cause",
        "percentages_of_traffic_accidents_per_cause.svg",
        ChartKind::HorizontalBar(series),
    )
    .with_size(1400, 800)
}
