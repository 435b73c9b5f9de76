//! Charts over the fatal-accident table joined with city locations.

use crate::enrich::LocatedFatalAccident;
use crate::reports::chart::{Chart, ChartKind};
use crate::reports::series::{Aggregate, Series};

const CAPITAL: &str = "Belo Horizonte";

pub fn fatal_charts(rows: &[LocatedFatalAccident]) -> Vec<Chart> {
    vec![
        mean_age_per_year_in_capital(rows),
        percentages_per_city(rows),
        percentages_per_month(rows),
        age_box_plot(rows),
    ]
}

/// Mean age of the dead per year, Belo Horizonte only.
pub fn mean_age_per_year_in_capital(rows: &[LocatedFatalAccident]) -> Chart {
    let series = Series::group_by(
        rows.iter()
            .filter(|r| r.city == CAPITAL)
            .filter_map(|r| Some((r.year?, f64::from(r.age?)))),
        Aggregate::Mean,
    );

    Chart::new(
        "Average age of people who died in traffic accidents in Belo Horizonte",
        "Year",
        "Age",
        "fatal-mean_age_per_year_in_bh.svg",
        ChartKind::Bar(series),
    )
}

/// Share of deaths for the ten cities with most deaths.
pub fn percentages_per_city(rows: &[LocatedFatalAccident]) -> Chart {
    let series = Series::value_counts(rows.iter().map(|r| r.city.as_str()))
        .proportions()
        .head(10)
        .sort_by_value();

    Chart::new(
        "Percentages of fatal accidents per city",
        "Percentage (%)",
        "City",
        "fatal-percentages_of_traffic_accidents_per_city.svg",
        ChartKind::HorizontalBar(series),
    )
    .with_size(1200, 800)
}

pub fn percentages_per_month(rows: &[LocatedFatalAccident]) -> Chart {
    let series = Series::value_counts(rows.iter().filter_map(|r| r.month.as_deref()))
        .proportions()
        .sort_by_value();

    Chart::new(
        "Traffic fatal accidents by month",
        "Month",
        "Percentage (%)",
        "fatal-traffic_accidents_by_month_plot.svg",
        ChartKind::Bar(series),
    )
    .with_size(1100, 600)
}

pub fn age_box_plot(rows: &[LocatedFatalAccident]) -> Chart {
    let ages = rows.iter().filter_map(|r| r.age).map(f64::from).collect();

    Chart::new("Age Box plot", "", "Age", "fatal-age_box_plot.svg", ChartKind::BoxPlot(ages))
}
