use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use once_cell::sync::OnceCell;
use thiserror::Error;

use super::model::{HousingDataset, ObservationRow};

/// Where the survey lives. A single public CSV, refreshed upstream.
pub const DATASET_URL: &str = "https://raw.githubusercontent.com/Andrea2002-06/Andrea2002-06.github.io/refs/heads/main/europai_lakhatasi_adatbazis.csv";

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Every way the dataset can fail to materialise: the source is unreachable
/// or its content is malformed. Propagated to the caller, never swallowed.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    /// The HTTP fetch failed (connection, TLS, non-2xx status).
    #[error("downloading the dataset failed")]
    Fetch(#[from] reqwest::Error),
    /// A local snapshot could not be read.
    #[error("reading the dataset file failed")]
    Io(#[from] io::Error),
    /// The payload does not parse against the expected CSV schema.
    #[error("the dataset is malformed")]
    Parse(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse observation rows out of CSV text.
///
/// Strict: a single record that fails to deserialize fails the whole load.
/// Columns are matched by header name, so order is free and extra columns
/// are skipped.
pub fn parse_csv(input: impl io::Read) -> Result<Vec<ObservationRow>, DataUnavailable> {
    let mut reader = csv::Reader::from_reader(input);
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: ObservationRow = record?;
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Remote fetch + process-wide cache
// ---------------------------------------------------------------------------

/// Download and parse the dataset from `url`.
pub fn fetch_dataset(url: &str) -> Result<HousingDataset, DataUnavailable> {
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    let rows = parse_csv(body.as_bytes())?;
    log::info!("downloaded {} rows from {url}", rows.len());
    Ok(HousingDataset::from_rows(rows))
}

static DATASET: OnceCell<HousingDataset> = OnceCell::new();

/// The process-wide dataset, downloaded on first access.
///
/// A successful download is memoized for the lifetime of the process, so
/// repeated calls cost no further network traffic. A failure leaves the cell
/// empty and the next call downloads again; retry policy belongs to the
/// caller. Initialisation is thread-safe.
pub fn shared_dataset() -> Result<&'static HousingDataset, DataUnavailable> {
    DATASET.get_or_try_init(|| fetch_dataset(DATASET_URL))
}

// ---------------------------------------------------------------------------
// Local snapshots
// ---------------------------------------------------------------------------

/// Load a local CSV snapshot of the survey (same schema as the remote file).
pub fn load_file(path: &Path) -> Result<HousingDataset, DataUnavailable> {
    let file = File::open(path)?;
    let rows = parse_csv(BufReader::new(file))?;
    Ok(HousingDataset::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
Város,Év,Korosztály,Ingatlantípus,Jövedelem (€/hó),Bérleti díj (€/hó),Lakásméret (m²),Lakhatási arány (%)
Budapest,2023,18-25,Albérlet,1000,400,45,40.0
Bécs,2023,26-35,Társasházi lakás,2000,900,60,45.0
Prága,2022,18-25,Garzon,0,350,,999
";

    #[test]
    fn parses_fixture_with_native_headers() {
        let rows = parse_csv(FIXTURE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].city, "Budapest");
        assert_eq!(rows[0].year, 2023);
        assert_eq!(rows[0].age_group, "18-25");
        assert_eq!(rows[0].income, 1000.0);
        assert_eq!(rows[0].rent, 400.0);
        assert_eq!(rows[1].size_m2, Some(60.0));
    }

    #[test]
    fn tolerates_empty_size_and_ignores_stored_ratio() {
        let rows = parse_csv(FIXTURE.as_bytes()).unwrap();
        // Prága row: empty size cell, zero income, bogus stored ratio.
        assert_eq!(rows[2].size_m2, None);
        assert_eq!(rows[2].housing_cost_ratio(), None);
    }

    #[test]
    fn column_order_does_not_matter() {
        let shuffled = "\
Bérleti díj (€/hó),Város,Korosztály,Év,Ingatlantípus,Jövedelem (€/hó)
400,Budapest,18-25,2023,Albérlet,1000
";
        let rows = parse_csv(shuffled.as_bytes()).unwrap();
        assert_eq!(rows[0].rent, 400.0);
        assert_eq!(rows[0].year, 2023);
        // Size column absent entirely: defaults to None.
        assert_eq!(rows[0].size_m2, None);
    }

    #[test]
    fn malformed_numeric_fails_the_load() {
        let bad = "\
Város,Év,Korosztály,Ingatlantípus,Jövedelem (€/hó),Bérleti díj (€/hó)
Budapest,sometime,18-25,Albérlet,1000,400
";
        let err = parse_csv(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, DataUnavailable::Parse(_)));
    }

    #[test]
    fn missing_required_column_fails_the_load() {
        let bad = "\
Város,Év,Korosztály,Jövedelem (€/hó),Bérleti díj (€/hó)
Budapest,2023,18-25,1000,400
";
        let err = parse_csv(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, DataUnavailable::Parse(_)));
    }

    #[test]
    fn loads_a_local_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.csv");
        std::fs::write(&path, FIXTURE).unwrap();
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(ds.cities.contains("Bécs"));
        assert!(ds.years.contains(&2022));
    }

    #[test]
    fn missing_file_reports_io() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataUnavailable::Io(_)));
    }

    #[test]
    #[ignore = "hits the live dataset URL"]
    fn fetches_the_live_dataset() {
        let ds = shared_dataset().expect("live dataset should be reachable");
        assert!(!ds.is_empty());
        assert!(!ds.cities.is_empty());
    }
}
