use crate::charts::{box_summary, Card};
use crate::types::{ChoroplethRow, CountryViews};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no data)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}", table_str);
    if rows.len() > max_rows {
        println!("... {} more rows", format_int(rows.len() - max_rows));
    }
    println!();
}

pub fn print_cards(cards: &[Card]) {
    for card in cards {
        println!("{:<20} {}", format!("{}:", card.header), card.value);
    }
    println!();
}

pub fn print_choropleth(feed: &[ChoroplethRow], max_rows: usize) {
    let years = match (feed.first(), feed.last()) {
        (Some(first), Some(last)) => format!("{}–{}", first.start_year, last.start_year),
        _ => "no years".to_string(),
    };
    println!("Power Plants by Country and Start Year ({})\n", years);
    preview_table_rows(feed, max_rows);
}

pub fn print_country_views(views: &CountryViews, max_rows: usize) {
    let country = &views.country;

    println!("Ranking of Overall Power Plants in {}\n", country);
    // Largest first reads better in a terminal.
    let ranked: Vec<_> = views.ranking.iter().rev().cloned().collect();
    preview_table_rows(&ranked, max_rows);

    println!("Distribution of capacity in MW in each fuel\n");
    let summaries: Vec<_> = views.distribution.iter().map(box_summary).collect();
    preview_table_rows(&summaries, max_rows);

    println!("Distribution of Fuel Type in {}\n", country);
    let total: usize = views.fuel_share.iter().map(|r| r.plant_count).sum();
    if total > 0 {
        for r in &views.fuel_share {
            let pct = r.plant_count as f64 / total as f64 * 100.0;
            println!(
                "  {:<16} {:>8}  {:>6}%",
                r.primary_fuel,
                format_int(r.plant_count),
                format_number(pct, 1)
            );
        }
        println!();
    } else {
        println!("(no data)\n");
    }
}
