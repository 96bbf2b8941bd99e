// Entry point and console flow.
//
// - The CSV is loaded once and published as a process-wide read-only table.
// - The static dashboard (cards, choropleth feed) is built and written once.
// - Every country selection recomputes the three country views and
//   overwrites `country_views.json`, so the file always holds the latest
//   selection.
mod charts;
mod cli;
mod error;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use clap::Parser;
use cli::Args;
use log::{debug, error, info, warn};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;
use types::PlantTable;

const FEED_FILE: &str = "choropleth_feed.csv";
const DASHBOARD_FILE: &str = "dashboard.json";
const COUNTRY_FILE: &str = "country_views.json";

// Set exactly once in `run`; never written again.
static PLANTS: OnceCell<PlantTable> = OnceCell::new();

/// Print `prompt` and read one trimmed line. `None` on end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Build and write the static part of the dashboard.
fn handle_startup(data: &PlantTable, args: &Args) -> Result<(), Box<dyn Error>> {
    let feed = reports::choropleth_feed(data);
    let summary = reports::generate_summary(data);
    let options = reports::country_options(data);
    if !options.iter().any(|c| *c == args.country) {
        warn!("default country {:?} is not in the dataset", args.country);
    }

    let dashboard = charts::build_dashboard(&summary, &feed, options, &args.country);

    let feed_path = args.out_dir.join(FEED_FILE);
    output::write_csv(&feed_path, &feed)?;
    info!("wrote {} choropleth rows to {}", feed.len(), feed_path.display());

    let dashboard_path = args.out_dir.join(DASHBOARD_FILE);
    output::write_json(&dashboard_path, &dashboard)?;
    info!("wrote {}", dashboard_path.display());

    println!("{}\n", dashboard.title);
    output::print_cards(&dashboard.cards);
    output::print_choropleth(&feed, args.preview_rows);
    Ok(())
}

/// One selection event: recompute, write, preview.
///
/// A failed write is reported but does not end the session.
fn handle_selection(data: &PlantTable, country: &str, args: &Args) {
    debug!("selection: {:?}", country);
    let views = reports::country_views(data, country);
    if views.is_empty() {
        warn!("no plants recorded for {:?}", country);
    }

    let figures = charts::country_figures(&views);
    let path = args.out_dir.join(COUNTRY_FILE);
    match output::write_json(&path, &figures) {
        Ok(()) => info!("wrote {} for {}", path.display(), country),
        Err(e) => error!("write error for {}: {}", path.display(), e),
    }

    println!("Analysis by Country: {}\n", country);
    output::print_country_views(&views, args.preview_rows);
}

fn list_countries(data: &PlantTable) {
    let options = reports::country_options(data);
    println!("{} countries:", util::format_int(options.len()));
    for chunk in options.chunks(4) {
        let line: Vec<String> = chunk.iter().map(|c| format!("{:<28}", c)).collect();
        println!("  {}", line.join("").trim_end());
    }
    println!();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    info!("loading {}", args.data.display());
    let (table, report) = loader::load_plants(&args.data)?;
    info!(
        "loaded {} plants ({} without a start year)",
        util::format_int(report.total_rows),
        util::format_int(report.unknown_start_year)
    );
    let data = PLANTS.get_or_init(|| table);

    handle_startup(data, &args)?;
    handle_selection(data, &args.country, &args);
    if args.once {
        return Ok(());
    }

    loop {
        println!("[1] Select country");
        println!("[2] List countries");
        println!("[3] Exit\n");
        let Some(choice) = read_line("Enter choice: ") else {
            break;
        };
        match choice.as_str() {
            "1" => {
                let Some(country) = read_line("Country: ") else {
                    break;
                };
                println!();
                if country.is_empty() {
                    println!("No country entered.\n");
                } else {
                    handle_selection(data, &country, &args);
                }
            }
            "2" => list_countries(data),
            "3" => break,
            _ => println!("Invalid choice. Please enter 1, 2 or 3.\n"),
        }
    }
    println!("Exiting the program.");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
