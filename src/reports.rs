use crate::types::{
    ChoroplethRow, CountryViews, FuelDistribution, FuelShareRow, MostUsedFuel, PlantTable,
    RankedPlant, SummaryStats,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

pub const RANKING_SIZE: usize = 10;

/// Plant counts per (country code, start year), ordered by year and then
/// by country code. Plants with an unknown start year or a blank country
/// code are left out.
pub fn choropleth_feed(data: &PlantTable) -> Vec<ChoroplethRow> {
    let mut counts: BTreeMap<(&str, i32), usize> = BTreeMap::new();
    for r in data.rows().iter().filter(|r| !r.country_code.is_empty()) {
        if let Some(year) = r.start_year {
            *counts.entry((r.country_code.as_str(), year)).or_default() += 1;
        }
    }
    let mut rows: Vec<ChoroplethRow> = counts
        .into_iter()
        .map(|((code, year), plant_count)| ChoroplethRow {
            country_code: code.to_string(),
            start_year: year,
            plant_count,
        })
        .collect();
    // Stable, so codes stay ascending inside each year.
    rows.sort_by_key(|r| r.start_year);
    rows
}

/// The largest plants of `country`, smallest first so the biggest bar ends
/// up on top of a horizontal bar chart.
pub fn capacity_ranking(data: &PlantTable, country: &str) -> Vec<RankedPlant> {
    let mut plants: Vec<_> = data.for_country(country).collect();
    plants.sort_by(|a, b| {
        a.capacity_mw
            .partial_cmp(&b.capacity_mw)
            .unwrap_or(Ordering::Equal)
    });
    let skip = plants.len().saturating_sub(RANKING_SIZE);
    plants
        .into_iter()
        .skip(skip)
        .map(|r| RankedPlant {
            name: r.name.clone(),
            primary_fuel: r.primary_fuel.clone(),
            capacity_mw: r.capacity_mw,
        })
        .collect()
}

/// All capacities of `country`, grouped by fuel in first-appearance order.
pub fn capacity_by_fuel(data: &PlantTable, country: &str) -> Vec<FuelDistribution> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<FuelDistribution> = Vec::new();
    for r in data.for_country(country) {
        let slot = *index.entry(r.primary_fuel.as_str()).or_insert_with(|| {
            groups.push(FuelDistribution {
                primary_fuel: r.primary_fuel.clone(),
                capacities_mw: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].capacities_mw.push(r.capacity_mw);
    }
    groups
}

/// Plant count per fuel for `country`, by fuel name. Fuels without plants
/// never appear.
pub fn fuel_share(data: &PlantTable, country: &str) -> Vec<FuelShareRow> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in data.for_country(country) {
        *counts.entry(r.primary_fuel.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(fuel, plant_count)| FuelShareRow {
            primary_fuel: fuel.to_string(),
            plant_count,
        })
        .collect()
}

/// Recompute the three per-country views. They share nothing but the
/// read-only table, so they run in parallel.
pub fn country_views(data: &PlantTable, country: &str) -> CountryViews {
    let (ranking, (distribution, fuel_share)) = rayon::join(
        || capacity_ranking(data, country),
        || {
            rayon::join(
                || capacity_by_fuel(data, country),
                || fuel_share(data, country),
            )
        },
    );
    CountryViews {
        country: country.to_string(),
        ranking,
        distribution,
        fuel_share,
    }
}

/// The most common fuel. Ties go to whichever fuel shows up first in the
/// table. Blank fuels are not counted.
pub fn most_used_fuel(data: &PlantTable) -> Option<MostUsedFuel> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for r in data.rows().iter().filter(|r| !r.primary_fuel.is_empty()) {
        let c = counts.entry(r.primary_fuel.as_str()).or_insert_with(|| {
            order.push(r.primary_fuel.as_str());
            0
        });
        *c += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for fuel in order {
        let count = counts[fuel];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((fuel, count));
        }
    }
    best.map(|(fuel, count)| MostUsedFuel {
        primary_fuel: fuel.to_string(),
        count,
    })
}

pub fn generate_summary(data: &PlantTable) -> SummaryStats {
    let countries: HashSet<&str> = data
        .rows()
        .iter()
        .map(|r| r.country.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    let plants: HashSet<&str> = data
        .rows()
        .iter()
        .map(|r| r.name.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    SummaryStats {
        total_countries: countries.len(),
        total_plants: plants.len(),
        most_used_fuel: most_used_fuel(data),
    }
}

/// Distinct country names in first-appearance order, as offered for
/// selection.
pub fn country_options(data: &PlantTable) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    data.rows()
        .iter()
        .map(|r| r.country.as_str())
        .filter(|c| !c.is_empty() && seen.insert(*c))
        .map(str::to_string)
        .collect()
}
