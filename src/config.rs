//! Source locations and output layout for the two pipelines.
//!
//! Defaults reproduce the fixed locations the datasets are published at;
//! the CLI can override each of them.

use std::path::PathBuf;

/// Deaths in land-transport accidents, MG open-data portal.
pub const FATAL_SOURCE_URL: &str = "https://dados.mg.gov.br/dataset\
/89a808ae-aa89-4e3c-a804-db58e822a72a/resource\
/51c9d227-5ac8-44d5-9b8b-fc894df8032a/download\
/dados_acidentes_terrestres.csv";

/// City names, IBGE codes and coordinates for every Brazilian city.
pub const CITY_LOCATIONS_URL: &str =
    "https://raw.githubusercontent.com/alanwillms/geoinfo/master/latitude-longitude-cidades.csv";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_CAUSES_FILE: &str = "data/cause-translations.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_YEARS: &[u16] = &[2017, 2018, 2019, 2020, 2021, 2022];

/// State every table is restricted to.
pub const TARGET_STATE: &str = "MG";

/// Where tables and charts are written: `<root>/csv` and `<root>/img`.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.root.join("csv")
    }

    pub fn img_dir(&self) -> PathBuf {
        self.root.join("img")
    }

    pub fn csv(&self, file_name: &str) -> PathBuf {
        self.csv_dir().join(file_name)
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

#[derive(Debug, Clone)]
pub struct FatalConfig {
    /// URL or path of the deaths table.
    pub source: String,
    /// URL or path of the city location table.
    pub cities: String,
    pub output: OutputLayout,
}

impl Default for FatalConfig {
    fn default() -> Self {
        Self {
            source: FATAL_SOURCE_URL.to_string(),
            cities: CITY_LOCATIONS_URL.to_string(),
            output: OutputLayout::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HighwayConfig {
    /// Directory holding the `datatran<YEAR>.csv` files.
    pub data_dir: PathBuf,
    pub years: Vec<u16>,
    /// URL or path of the cause translation table.
    pub causes: String,
    pub output: OutputLayout,
}

impl HighwayConfig {
    /// Yearly source files, in year order as given.
    pub fn year_files(&self) -> Vec<PathBuf> {
        self.years
            .iter()
            .map(|year| self.data_dir.join(format!("datatran{year}.csv")))
            .collect()
    }
}

impl Default for HighwayConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            years: DEFAULT_YEARS.to_vec(),
            causes: DEFAULT_CAUSES_FILE.to_string(),
            output: OutputLayout::default(),
        }
    }
}
