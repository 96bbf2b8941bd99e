use serde::{Deserialize, Serialize};
use tabled::Tabled;

pub const COL_COUNTRY: &str = "country_long";
pub const COL_COUNTRY_CODE: &str = "country code";
pub const COL_NAME: &str = "name of powerplant";
pub const COL_FUEL: &str = "primary_fuel";
pub const COL_CAPACITY: &str = "capacity in MW";
pub const COL_START_YEAR: &str = "start_year";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_COUNTRY,
    COL_COUNTRY_CODE,
    COL_NAME,
    COL_FUEL,
    COL_CAPACITY,
    COL_START_YEAR,
];

#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "country_long")]
    pub country: Option<String>,
    #[serde(rename = "country code")]
    pub country_code: Option<String>,
    #[serde(rename = "name of powerplant")]
    pub name: Option<String>,
    #[serde(rename = "primary_fuel")]
    pub primary_fuel: Option<String>,
    #[serde(rename = "capacity in MW")]
    pub capacity_mw: Option<String>,
    #[serde(rename = "start_year")]
    pub start_year: Option<String>,
}

/// One power plant, as loaded from the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantRecord {
    pub country: String,
    pub country_code: String,
    pub name: String,
    pub primary_fuel: String,
    pub capacity_mw: f64,
    pub start_year: Option<i32>,
}

/// The loaded dataset. Row order is the file order and is never changed.
#[derive(Debug, Clone, Default)]
pub struct PlantTable {
    rows: Vec<PlantRecord>,
}

impl PlantTable {
    pub fn new(rows: Vec<PlantRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PlantRecord] {
        &self.rows
    }

    /// Rows belonging to `country`, in file order.
    pub fn for_country<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a PlantRecord> {
        self.rows.iter().filter(move |r| r.country == country)
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ChoroplethRow {
    #[serde(rename = "country code")]
    #[tabled(rename = "country code")]
    pub country_code: String,
    #[serde(rename = "start_year")]
    #[tabled(rename = "start_year")]
    pub start_year: i32,
    #[serde(rename = "No of Power Plant")]
    #[tabled(rename = "No of Power Plant")]
    pub plant_count: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct RankedPlant {
    #[serde(rename = "name of powerplant")]
    #[tabled(rename = "Power Plant")]
    pub name: String,
    #[serde(rename = "primary_fuel")]
    #[tabled(rename = "Fuel")]
    pub primary_fuel: String,
    #[serde(rename = "capacity in MW")]
    #[tabled(rename = "Capacity (MW)")]
    pub capacity_mw: f64,
}

/// Every capacity value recorded for one fuel type, in row order.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FuelDistribution {
    pub primary_fuel: String,
    pub capacities_mw: Vec<f64>,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct FuelShareRow {
    #[serde(rename = "primary_fuel")]
    #[tabled(rename = "Type of Fuel")]
    pub primary_fuel: String,
    #[serde(rename = "No of Power Plant")]
    #[tabled(rename = "No of Power Plant")]
    pub plant_count: usize,
}

/// The three views recomputed on every country selection.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CountryViews {
    pub country: String,
    pub ranking: Vec<RankedPlant>,
    pub distribution: Vec<FuelDistribution>,
    pub fuel_share: Vec<FuelShareRow>,
}

impl CountryViews {
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty() && self.distribution.is_empty() && self.fuel_share.is_empty()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MostUsedFuel {
    pub primary_fuel: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_countries: usize,
    pub total_plants: usize,
    pub most_used_fuel: Option<MostUsedFuel>,
}
