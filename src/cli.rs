use clap::Parser;
use std::path::PathBuf;

/// Power plant dashboard: summary cards, a year-animated choropleth feed,
/// and per-country ranking, distribution and fuel-share views.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Args {
    /// CSV file with one row per power plant
    #[arg(long, value_name = "PATH", default_value = "power_plant.csv")]
    pub data: PathBuf,

    /// Directory the chart documents are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Country selected when the dashboard opens
    #[arg(long, value_name = "NAME", default_value = "Indonesia")]
    pub country: String,

    /// Render the initial selection and exit instead of prompting
    #[arg(long)]
    pub once: bool,

    /// Rows shown in each terminal preview table
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["power_plant_dashboard"]);
        assert_eq!(args.data, PathBuf::from("power_plant.csv"));
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert_eq!(args.country, "Indonesia");
        assert!(!args.once);
        assert_eq!(args.preview_rows, 5);
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "power_plant_dashboard",
            "--data",
            "plants.csv",
            "--country",
            "Chile",
            "--once",
            "--preview-rows",
            "10",
        ]);
        assert_eq!(args.data, PathBuf::from("plants.csv"));
        assert_eq!(args.country, "Chile");
        assert!(args.once);
        assert_eq!(args.preview_rows, 10);
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }
}
