// Chart and card descriptions handed to whatever draws the dashboard.
//
// Everything here is built from the aggregates alone; nothing in this module
// feeds back into `reports`.
use crate::types::{ChoroplethRow, CountryViews, FuelDistribution, SummaryStats};
use crate::util::{format_int, quantile_sorted};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use tabled::Tabled;

pub const DASHBOARD_TITLE: &str = "Global Power Plant Dashboard Analytics";
pub const TEMPLATE: &str = "ggplot2";
pub const NO_DATA: &str = "no data";

const BAR_COLOR: &str = "#003F5C";
const BOX_PALETTE: [&str; 5] = ["#003f5c", "#ff6361", "#bc5090", "#ffa600", "#58508d"];
const PIE_PALETTE: [&str; 5] = ["#003f5c", "#58508d", "#bc5090", "#ff6361", "#ffa600"];

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Card {
    pub header: String,
    pub value: String,
    pub color: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapFrame {
    pub start_year: i32,
    pub locations: Vec<String>,
    pub values: Vec<usize>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct BoxSummary {
    #[tabled(rename = "Type of Fuel")]
    pub primary_fuel: String,
    #[tabled(rename = "n")]
    pub count: usize,
    #[tabled(rename = "min")]
    pub min: f64,
    #[tabled(rename = "q1")]
    pub q1: f64,
    #[tabled(rename = "median")]
    pub median: f64,
    #[tabled(rename = "q3")]
    pub q3: f64,
    #[tabled(rename = "max")]
    pub max: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BoxSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub summary: BoxSummary,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Choropleth {
        color_label: String,
        color_scale: String,
        frames: Vec<MapFrame>,
    },
    Bar {
        title: String,
        orientation: String,
        x_label: String,
        y_label: String,
        color: String,
        bars: Vec<Bar>,
    },
    #[serde(rename = "box")]
    BoxPlot {
        title: String,
        y_label: String,
        legend_label: String,
        palette: Vec<String>,
        series: Vec<BoxSeries>,
    },
    Pie {
        title: String,
        hole: f64,
        legend_label: String,
        palette: Vec<String>,
        slices: Vec<Slice>,
    },
}

/// Charts with no data carry a placeholder instead of an empty series.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Figure {
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub chart: Chart,
}

impl Figure {
    fn new(chart: Chart, empty: bool) -> Self {
        Self {
            template: TEMPLATE.to_string(),
            placeholder: empty.then(|| NO_DATA.to_string()),
            chart,
        }
    }
}

/// Static part of the dashboard, built once at startup.
#[derive(Debug, Serialize, Clone)]
pub struct Dashboard {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub cards: Vec<Card>,
    pub country_options: Vec<String>,
    pub default_country: String,
    pub map: Figure,
}

/// Figures for one country selection.
#[derive(Debug, Serialize, Clone)]
pub struct CountryFigures {
    pub country: String,
    pub ranking: Figure,
    pub distribution: Figure,
    pub fuel_share: Figure,
}

pub fn summary_cards(summary: &SummaryStats) -> Vec<Card> {
    let most_used = match &summary.most_used_fuel {
        Some(m) => format!("{} = {}", m.primary_fuel, format_int(m.count)),
        None => NO_DATA.to_string(),
    };
    vec![
        Card {
            header: "Number of Country".to_string(),
            value: format_int(summary.total_countries),
            color: "#D8F1D4".to_string(),
        },
        Card {
            header: "Total Power Plant".to_string(),
            value: format_int(summary.total_plants),
            color: "#D6EBFE".to_string(),
        },
        Card {
            header: "Most Used Fuel".to_string(),
            value: most_used,
            color: "#F5CBCC".to_string(),
        },
    ]
}

/// One animation frame per year. The feed is already ordered by year, so
/// frames come out in increasing year order.
pub fn choropleth_chart(feed: &[ChoroplethRow]) -> Figure {
    let mut frames: Vec<MapFrame> = Vec::new();
    for row in feed {
        match frames.last_mut() {
            Some(frame) if frame.start_year == row.start_year => {
                frame.locations.push(row.country_code.clone());
                frame.values.push(row.plant_count);
            }
            _ => frames.push(MapFrame {
                start_year: row.start_year,
                locations: vec![row.country_code.clone()],
                values: vec![row.plant_count],
            }),
        }
    }
    let empty = frames.is_empty();
    Figure::new(
        Chart::Choropleth {
            color_label: "No of Power Plant".to_string(),
            color_scale: "tealgrn".to_string(),
            frames,
        },
        empty,
    )
}

pub fn box_summary(dist: &FuelDistribution) -> BoxSummary {
    let mut sorted = dist.capacities_mw.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    BoxSummary {
        primary_fuel: dist.primary_fuel.clone(),
        count: sorted.len(),
        min: sorted.first().copied().unwrap_or(0.0),
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(0.0),
    }
}

pub fn country_figures(views: &CountryViews) -> CountryFigures {
    let country = &views.country;

    let ranking = Figure::new(
        Chart::Bar {
            title: format!("Ranking of Overall Power Plants in {country}"),
            orientation: "h".to_string(),
            x_label: "capacity in MW".to_string(),
            y_label: "name of powerplant".to_string(),
            color: BAR_COLOR.to_string(),
            bars: views
                .ranking
                .iter()
                .map(|r| Bar {
                    label: r.name.clone(),
                    value: r.capacity_mw,
                })
                .collect(),
        },
        views.ranking.is_empty(),
    );

    let distribution = Figure::new(
        Chart::BoxPlot {
            title: "Distribution of capacity in MW in each fuel".to_string(),
            y_label: "capacity in MW".to_string(),
            legend_label: "Type of Fuel".to_string(),
            palette: BOX_PALETTE.iter().map(|c| c.to_string()).collect(),
            series: views
                .distribution
                .iter()
                .map(|d| BoxSeries {
                    name: d.primary_fuel.clone(),
                    values: d.capacities_mw.clone(),
                    summary: box_summary(d),
                })
                .collect(),
        },
        views.distribution.is_empty(),
    );

    let fuel_share = Figure::new(
        Chart::Pie {
            title: format!("Distribution of Fuel Type in {country}"),
            hole: 0.4,
            legend_label: "Type of Fuel".to_string(),
            palette: PIE_PALETTE.iter().map(|c| c.to_string()).collect(),
            slices: views
                .fuel_share
                .iter()
                .map(|r| Slice {
                    label: r.primary_fuel.clone(),
                    value: r.plant_count,
                })
                .collect(),
        },
        views.fuel_share.is_empty(),
    );

    CountryFigures {
        country: country.clone(),
        ranking,
        distribution,
        fuel_share,
    }
}

pub fn build_dashboard(
    summary: &SummaryStats,
    feed: &[ChoroplethRow],
    country_options: Vec<String>,
    default_country: &str,
) -> Dashboard {
    Dashboard {
        title: DASHBOARD_TITLE.to_string(),
        generated_at: Utc::now(),
        cards: summary_cards(summary),
        country_options,
        default_country: default_country.to_string(),
        map: choropleth_chart(feed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FuelShareRow, MostUsedFuel, RankedPlant};

    fn row(code: &str, year: i32, n: usize) -> ChoroplethRow {
        ChoroplethRow {
            country_code: code.into(),
            start_year: year,
            plant_count: n,
        }
    }

    #[test]
    fn cards_follow_summary() {
        let summary = SummaryStats {
            total_countries: 167,
            total_plants: 34_936,
            most_used_fuel: Some(MostUsedFuel {
                primary_fuel: "Solar".into(),
                count: 10_665,
            }),
        };
        let cards = summary_cards(&summary);
        let values: Vec<_> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["167", "34,936", "Solar = 10,665"]);
        assert_eq!(cards[2].header, "Most Used Fuel");
    }

    #[test]
    fn map_frames_group_by_year() {
        let feed = vec![row("AFG", 1975, 2), row("IDN", 1975, 1), row("IDN", 1984, 3)];
        let Figure { chart, placeholder, .. } = choropleth_chart(&feed);
        assert_eq!(placeholder, None);
        let Chart::Choropleth { frames, .. } = chart else {
            panic!("expected a choropleth");
        };
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].locations, ["AFG", "IDN"]);
        assert_eq!(frames[0].values, [2, 1]);
        assert_eq!(frames[1].start_year, 1984);
    }

    #[test]
    fn box_summary_uses_linear_quartiles() {
        let dist = FuelDistribution {
            primary_fuel: "Coal".into(),
            capacities_mw: vec![40.0, 10.0, 30.0, 20.0],
        };
        let s = box_summary(&dist);
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (10.0, 17.5, 25.0, 32.5, 40.0));
        assert_eq!(s.count, 4);
    }

    #[test]
    fn empty_views_render_placeholders() {
        let views = CountryViews {
            country: "Atlantis".into(),
            ranking: Vec::new(),
            distribution: Vec::new(),
            fuel_share: Vec::new(),
        };
        let figs = country_figures(&views);
        for fig in [&figs.ranking, &figs.distribution, &figs.fuel_share] {
            assert_eq!(fig.placeholder.as_deref(), Some(NO_DATA));
        }
    }

    #[test]
    fn country_figures_carry_titles_and_data() {
        let views = CountryViews {
            country: "Indonesia".into(),
            ranking: vec![RankedPlant {
                name: "Paiton".into(),
                primary_fuel: "Coal".into(),
                capacity_mw: 4710.0,
            }],
            distribution: vec![FuelDistribution {
                primary_fuel: "Coal".into(),
                capacities_mw: vec![4710.0],
            }],
            fuel_share: vec![FuelShareRow {
                primary_fuel: "Coal".into(),
                plant_count: 1,
            }],
        };
        let figs = country_figures(&views);
        let json = serde_json::to_value(&figs).unwrap();
        assert_eq!(json["ranking"]["chart"]["kind"], "bar");
        assert_eq!(
            json["ranking"]["chart"]["title"],
            "Ranking of Overall Power Plants in Indonesia"
        );
        assert_eq!(json["fuel_share"]["chart"]["hole"], 0.4);
        assert_eq!(json["distribution"]["chart"]["series"][0]["summary"]["median"], 4710.0);
        assert!(json["ranking"].get("placeholder").is_none());
    }
}
