use crate::config::{FatalConfig, TARGET_STATE};
use crate::enrich::{city_year_summary, join_cities};
use crate::fetch::{HttpClient, load_bytes};
use crate::filter::{dedup_rows, drop_incomplete, restrict, within_bounds};
use crate::normalize::city::{CityLocation, RawCityLocation, normalize_cities};
use crate::normalize::fatal::{FatalAccident, RawDeathRecord, normalize_deaths};
use crate::output::{log_preview, write_table};
use crate::parser::{SourceFormat, read_records};
use crate::pipeline::RunSummary;
use crate::reports::fatal::fatal_charts;
use crate::reports::render_all;
use anyhow::{Context, Result};
use tracing::info;

pub const ACCIDENTS_TABLE: &str = "fatal-traffic-accidents-mg.csv";
pub const CITY_YEAR_TABLE: &str = "fatal-traffic-accidents-per-city-and-year-mg.csv";

/// Runs the fatal-accident pipeline against `config`.
#[tracing::instrument(skip_all, fields(source = %config.source, cities = %config.cities))]
pub async fn run_fatal<C: HttpClient>(client: &C, config: &FatalConfig) -> Result<RunSummary> {
    let accidents = load_accidents(client, &config.source).await?;
    let cities = load_cities(client, &config.cities).await?;

    let joined = join_cities(&accidents, &cities)?;
    let summary = city_year_summary(&joined)?;
    log_preview("city_year_summary", &summary, 5)?;

    let charts = render_all(&fatal_charts(&joined), &config.output.img_dir())?;

    let accidents_path = config.output.csv(ACCIDENTS_TABLE);
    let summary_path = config.output.csv(CITY_YEAR_TABLE);
    write_table(&accidents_path, &joined)?;
    write_table(&summary_path, &summary)?;

    info!(rows = joined.len(), summary_rows = summary.len(), "Fatal pipeline finished");
    Ok(RunSummary {
        rows: joined.len(),
        summary_rows: summary.len(),
        tables: vec![accidents_path, summary_path],
        charts,
    })
}

async fn load_accidents<C: HttpClient>(client: &C, source: &str) -> Result<Vec<FatalAccident>> {
    let bytes = load_bytes(client, source).await?;
    let raw: Vec<RawDeathRecord> = read_records(&bytes, SourceFormat::semicolon_utf8(), source)?;
    let accidents = normalize_deaths(&raw).with_context(|| format!("{source}: normalization failed"))?;
    info!(rows = accidents.len(), "Fatal accidents normalized");

    dedup_rows(drop_incomplete(accidents))
}

async fn load_cities<C: HttpClient>(client: &C, source: &str) -> Result<Vec<CityLocation>> {
    let bytes = load_bytes(client, source).await?;
    let raw: Vec<RawCityLocation> = read_records(&bytes, SourceFormat::semicolon_utf8(), source)?;
    let cities = normalize_cities(&raw).with_context(|| format!("{source}: normalization failed"))?;

    let cities = restrict(cities, "state", |c| c.state.as_deref() == Some(TARGET_STATE));
    let cities = within_bounds(cities);
    let cities = dedup_rows(cities)?;
    info!(rows = cities.len(), state = TARGET_STATE, "City locations loaded");
    Ok(cities)
}
