use crate::error::LoadError;
use crate::types::{
    PlantRecord, PlantTable, RawRow, COL_CAPACITY, COL_START_YEAR, REQUIRED_COLUMNS,
};
use crate::util::{parse_f64_safe, parse_year_safe};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub unknown_start_year: usize,
}

pub fn load_plants(path: &Path) -> Result<(PlantTable, LoadReport), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_plants(file)
}

pub fn read_plants<R: Read>(input: R) -> Result<(PlantTable, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col));
        }
    }

    let mut rows = Vec::new();
    let mut unknown_start_year = 0usize;

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row = result?;
        let row_no = idx + 1;

        let capacity_mw = match parse_f64_safe(row.capacity_mw.as_deref()) {
            Some(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                return Err(LoadError::InvalidField {
                    row: row_no,
                    column: COL_CAPACITY,
                    value: row.capacity_mw.unwrap_or_default(),
                })
            }
        };
        // Blank means unknown; anything else has to read as a year.
        let year_cell = row.start_year.as_deref().map(str::trim).unwrap_or("");
        let start_year = if year_cell.is_empty() {
            unknown_start_year += 1;
            None
        } else {
            let year = parse_year_safe(Some(year_cell)).ok_or_else(|| LoadError::InvalidField {
                row: row_no,
                column: COL_START_YEAR,
                value: year_cell.to_string(),
            })?;
            Some(year)
        };

        rows.push(PlantRecord {
            country: row.country.unwrap_or_default(),
            country_code: row.country_code.unwrap_or_default(),
            name: row.name.unwrap_or_default(),
            primary_fuel: row.primary_fuel.unwrap_or_default(),
            capacity_mw,
            start_year,
        });
    }

    let report = LoadReport {
        total_rows: rows.len(),
        unknown_start_year,
    };
    Ok((PlantTable::new(rows), report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "country code,country_long,name of powerplant,capacity in MW,primary_fuel,start_year\n";

    fn fixture(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_rows_in_file_order() {
        let file = fixture(
            "IDN,Indonesia,Suralaya,3400,Coal,1984.0\n\
             IDN,Indonesia,Muara Karang, 1208.5 ,Gas,\n\
             AFG,Afghanistan,Kajaki,33,Hydro,1975\n",
        );
        let (table, report) = load_plants(file.path()).unwrap();

        assert_eq!(table.rows().len(), 3);
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.unknown_start_year, 1);

        let rows = table.rows();
        assert_eq!(rows[0].name, "Suralaya");
        assert_eq!(rows[0].start_year, Some(1984));
        assert_eq!(rows[1].capacity_mw, 1208.5);
        assert_eq!(rows[1].start_year, None);
        assert_eq!(rows[2].country_code, "AFG");
    }

    #[test]
    fn ignores_extra_columns() {
        let csv = "gppd_idnr,country code,country_long,name of powerplant,capacity in MW,primary_fuel,start_year,owner\n\
                   X1,AFG,Afghanistan,Kajaki,33,Hydro,1975,Gov\n";
        let (table, _) = read_plants(csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].primary_fuel, "Hydro");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_plants(Path::new("/nonexistent/power_plant.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "country code,country_long,name of powerplant,primary_fuel,start_year\n\
                   AFG,Afghanistan,Kajaki,Hydro,1975\n";
        let err = read_plants(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("capacity in MW")));
    }

    #[test]
    fn rejects_bad_capacity() {
        for bad in ["", "lots", "-5"] {
            let file = fixture(&format!("AFG,Afghanistan,Kajaki,{bad},Hydro,1975\n"));
            let err = load_plants(file.path()).unwrap_err();
            assert!(
                matches!(err, LoadError::InvalidField { row: 1, column: COL_CAPACITY, .. }),
                "{bad:?} -> {err}"
            );
        }
    }

    #[test]
    fn rejects_bad_year() {
        let file = fixture("AFG,Afghanistan,Kajaki,33,Hydro,someday\n");
        let err = load_plants(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidField { column: COL_START_YEAR, .. }
        ));
    }

    #[test]
    fn header_only_file_loads_empty_table() {
        let file = fixture("");
        let (table, report) = load_plants(file.path()).unwrap();
        assert!(table.rows().is_empty());
        assert_eq!(report, LoadReport { total_rows: 0, unknown_start_year: 0 });
    }

    #[test]
    fn zero_byte_file_has_no_columns() {
        let file = NamedTempFile::new().unwrap();
        let err = load_plants(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("country_long")));
    }

    #[test]
    fn ragged_row_is_malformed() {
        let file = fixture("AFG,Afghanistan,Kajaki,33\n");
        let err = load_plants(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
