use crate::config::{HighwayConfig, TARGET_STATE};
use crate::enrich::{highway_city_year_summary, translate_causes};
use crate::fetch::{HttpClient, load_bytes};
use crate::filter::{dedup_rows, drop_incomplete, restrict, within_bounds};
use crate::normalize::cause::{CauseTranslation, RawCauseTranslation, normalize_causes};
use crate::normalize::highway::{HighwayAccident, RawHighwayRecord, normalize_highway};
use crate::output::{log_preview, write_table};
use crate::parser::{SourceFormat, read_records};
use crate::pipeline::RunSummary;
use crate::reports::highway::highway_charts;
use crate::reports::render_all;
use anyhow::{Context, Result};
use tracing::info;

pub const ACCIDENTS_TABLE: &str = "traffic-accidents-mg.csv";
pub const CITY_YEAR_TABLE: &str = "traffic-accidents-per-city-and-year-mg.csv";

/// Runs the PRF highway-accident pipeline against `config`.
#[tracing::instrument(skip_all, fields(data_dir = %config.data_dir.display(), years = ?config.years))]
pub async fn run_highway<C: HttpClient>(client: &C, config: &HighwayConfig) -> Result<RunSummary> {
    let accidents = load_accidents(client, config).await?;
    let accidents = drop_incomplete(accidents);
    let accidents = restrict(accidents, "state", |a| a.state.as_deref() == Some(TARGET_STATE));
    let accidents = within_bounds(accidents);
    let accidents = dedup_rows(accidents)?;

    let causes = load_causes(client, &config.causes).await?;
    let accidents = translate_causes(accidents, &causes)?;

    let summary = highway_city_year_summary(&accidents)?;
    log_preview("city_year_summary", &summary, 5)?;

    let charts = render_all(&highway_charts(&accidents), &config.output.img_dir())?;

    let accidents_path = config.output.csv(ACCIDENTS_TABLE);
    let summary_path = config.output.csv(CITY_YEAR_TABLE);
    write_table(&accidents_path, &accidents)?;
    write_table(&summary_path, &summary)?;

    info!(rows = accidents.len(), summary_rows = summary.len(), "Highway pipeline finished");
    Ok(RunSummary {
        rows: accidents.len(),
        summary_rows: summary.len(),
        tables: vec![accidents_path, summary_path],
        charts,
    })
}

/// Reads every yearly file and concatenates the normalized rows in year order.
async fn load_accidents<C: HttpClient>(client: &C, config: &HighwayConfig) -> Result<Vec<HighwayAccident>> {
    let mut accidents = Vec::new();

    for path in config.year_files() {
        let name = path.display().to_string();
        let bytes = load_bytes(client, &name).await?;
        let raw: Vec<RawHighwayRecord> = read_records(&bytes, SourceFormat::semicolon_latin1(), &name)?;
        let rows = normalize_highway(&raw).with_context(|| format!("{name}: normalization failed"))?;

        info!(file = %name, rows = rows.len(), "Yearly file normalized");
        accidents.extend(rows);
    }

    info!(rows = accidents.len(), files = config.years.len(), "Yearly files concatenated");
    Ok(accidents)
}

async fn load_causes<C: HttpClient>(client: &C, source: &str) -> Result<Vec<CauseTranslation>> {
    let bytes = load_bytes(client, source).await?;
    let raw: Vec<RawCauseTranslation> = read_records(&bytes, SourceFormat::comma_utf8(), source)?;
    let causes = normalize_causes(&raw);
    info!(rows = causes.len(), "Cause translations loaded");
    Ok(causes)
}
