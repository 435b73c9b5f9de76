use mg_accidents::config::{FatalConfig, HighwayConfig, OutputLayout};
use mg_accidents::enrich::{CityYearSummary, LocatedFatalAccident};
use mg_accidents::fetch::BasicClient;
use mg_accidents::normalize::highway::HighwayAccident;
use mg_accidents::pipeline::{run_fatal, run_highway};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn fresh_output(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn read_back<T: serde::de::DeserializeOwned>(path: &Path) -> (Vec<String>, Vec<T>) {
    let mut rdr = csv::Reader::from_path(path).expect("Failed to open output table");
    let headers = rdr.headers().unwrap().iter().map(String::from).collect();
    let rows = rdr.deserialize().collect::<Result<_, _>>().unwrap();
    (headers, rows)
}

#[tokio::test]
async fn test_fatal_pipeline() {
    let out = fresh_output("mg_accidents_it_fatal");
    let config = FatalConfig {
        source: fixture("deaths.csv"),
        cities: fixture("cities.csv"),
        output: OutputLayout::new(&out),
    };

    let summary = run_fatal(&BasicClient::new(), &config)
        .await
        .expect("Fatal pipeline failed");

    assert_eq!(summary.rows, 4);
    assert_eq!(summary.summary_rows, 3);
    assert_eq!(summary.charts.len(), 4);
    assert!(summary.charts.iter().all(|p| p.exists()));

    let (headers, rows): (_, Vec<LocatedFatalAccident>) = read_back(&summary.tables[0]);
    assert_eq!(rows.len(), summary.rows);
    assert!(headers.contains(&"city_latitude".to_string()));
    assert!(!headers.iter().any(|h| h.is_empty() || h == "index"));

    // no row lost a required column, and no unknown city survived the join
    let cities: HashSet<_> = ["Belo Horizonte", "Contagem", "Uberlândia", "Betim"].into();
    for row in &rows {
        assert!(row.date_birth.is_some());
        assert!(row.sex.is_some());
        assert!(cities.contains(row.city.as_str()));
    }
    let unknown = rows.iter().find(|r| r.sex.as_deref() == Some("Ignorado"));
    assert!(unknown.is_some());

    let (_, per_city_year): (_, Vec<CityYearSummary>) = read_back(&summary.tables[1]);
    for entry in &per_city_year {
        let expected = rows
            .iter()
            .filter(|r| r.city == entry.city && r.year == Some(entry.year))
            .count();
        assert_eq!(entry.total_traffic_accidents, expected);
    }
    let bh = per_city_year
        .iter()
        .find(|e| e.city == "Belo Horizonte")
        .unwrap();
    assert_eq!(bh.year, 2019);
    assert_eq!(bh.total_traffic_accidents, 2);
    assert_eq!(bh.city_code, Some(3106200));
    assert_eq!(bh.city_latitude, Some(-19.92));

    fs::remove_dir_all(&out).unwrap();
}

#[tokio::test]
async fn test_highway_pipeline() {
    let out = fresh_output("mg_accidents_it_highway");
    let config = HighwayConfig {
        data_dir: PathBuf::from(fixture("")),
        years: vec![2017, 2018],
        causes: fixture("causes.csv"),
        output: OutputLayout::new(&out),
    };

    let summary = run_highway(&BasicClient::new(), &config)
        .await
        .expect("Highway pipeline failed");

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.summary_rows, 3);
    assert_eq!(summary.charts.len(), 5);

    let (headers, rows): (_, Vec<HighwayAccident>) = read_back(&summary.tables[0]);
    assert_eq!(rows.len(), 3);
    assert!(headers.contains(&"type".to_string()));
    assert!(headers.contains(&"translated_cause".to_string()));

    for row in &rows {
        assert_eq!(row.state.as_deref(), Some("MG"));
        let (lat, lon) = (row.latitude.unwrap(), row.longitude.unwrap());
        assert!(lat > -34.0 && lat < 6.0);
        assert!(lon > -74.0 && lon < -34.0);
    }

    let inattention = rows.iter().find(|r| r.year == Some(2017)).unwrap();
    assert_eq!(inattention.translated_cause.as_deref(), Some("Driver inattention"));
    assert_eq!(inattention.km, Some(532.8));
    assert_eq!(inattention.victim_type.as_deref(), Some("Injured victims"));

    let other = rows.iter().find(|r| r.cause.as_deref() == Some("Outras")).unwrap();
    assert_eq!(other.translated_cause, None);

    fs::remove_dir_all(&out).unwrap();
}

#[tokio::test]
async fn test_malformed_date_aborts_run() {
    let dir = fresh_output("mg_accidents_it_bad_date");
    fs::create_dir_all(&dir).unwrap();
    let source = dir.join("deaths.csv");
    fs::write(
        &source,
        "dt_obito;dt_nascimento;nu_idade;sg_sexo;co_municipio_ibge_ocorrencia;co_cid_causa_basica;desc_cid_causa_basica\n\
         14/07/2019;02/01/1980;39;Masculino;Contagem;V892;x\n\
         2019-13-45;02/01/1980;39;Masculino;Contagem;V892;x\n",
    )
    .unwrap();

    let config = FatalConfig {
        source: source.display().to_string(),
        cities: fixture("cities.csv"),
        output: OutputLayout::new(dir.join("out")),
    };

    let err = run_fatal(&BasicClient::new(), &config).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("dt_obito"));
    assert!(message.contains("row 2"));
    assert!(!dir.join("out").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_missing_yearly_file_aborts_run() {
    let out = fresh_output("mg_accidents_it_missing_year");
    let config = HighwayConfig {
        data_dir: PathBuf::from(fixture("")),
        years: vec![2017, 1999],
        causes: fixture("causes.csv"),
        output: OutputLayout::new(&out),
    };

    let err = run_highway(&BasicClient::new(), &config).await.unwrap_err();
    assert!(format!("{err:#}").contains("datatran1999.csv"));
}
