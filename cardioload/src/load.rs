//! CSV-to-SQLite load step.
//!
//! Parses every row of the input file up front, then hands the whole
//! batch to the store so the table is replaced in a single
//! transaction. Any read, parse, or write error propagates to the
//! caller; there is no partial load.
//!
use std::fs;
use std::path::Path;

use anyhow::Context;
use cardiodata::{record::HeartRecord, store};
use tracing::info;

/// Read `csv_path` and replace the contents of the database at
/// `db_path` with its rows, creating the parent directory if needed.
pub fn run(csv_path: &Path, db_path: &Path) -> anyhow::Result<()> {
    let records = read_records(csv_path)?;

    if let Some(dir) = db_path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("create database directory {}", dir.display()))?;
    }

    let mut conn = store::open_or_create(db_path)?;
    let rows = store::replace_all(&mut conn, &records)?;
    info!(db = %db_path.display(), rows, "database loaded");
    Ok(())
}

/// Deserialize the whole CSV into records, header-driven.
fn read_records(path: &Path) -> anyhow::Result<Vec<HeartRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open csv {}", path.display()))?;
    let mut records = Vec::new();
    for (line, row) in reader.deserialize().enumerate() {
        let record: HeartRecord =
            row.with_context(|| format!("parse csv record {}", line + 1))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardiodata::store;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
age,anaemia,creatinine_phosphokinase,diabetes,ejection_fraction,high_blood_pressure,platelets,serum_creatinine,serum_sodium,sex,smoking,time,DEATH_EVENT
75,0,582,0,20,1,265000,1.9,130,1,0,4,1
55,0,7861,0,38,0,263358.03,1.1,136,1,0,6,1
60.667,1,151,1,40,0,201000,1,136,0,0,172,0
";

    fn write_sample(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("heart_failure.csv");
        fs::write(&path, SAMPLE_CSV).unwrap();
        path
    }

    #[test]
    fn load_creates_directory_and_table() {
        let dir = TempDir::new().unwrap();
        let csv = write_sample(&dir);
        let db = dir.path().join("nested").join("heart.db");

        run(&csv, &db).unwrap();

        let conn = store::open_read_only(&db).unwrap();
        assert_eq!(store::count(&conn).unwrap(), 3);
        let records = store::fetch(&conn, 10).unwrap();
        assert_eq!(records[0].age, 75.0);
        assert_eq!(records[2].age, 60.667);
        assert_eq!(records[2].death_event, 0);
    }

    #[test]
    fn reload_replaces_instead_of_appending() {
        let dir = TempDir::new().unwrap();
        let csv = write_sample(&dir);
        let db = dir.path().join("heart.db");

        run(&csv, &db).unwrap();
        let first = {
            let conn = store::open_read_only(&db).unwrap();
            store::fetch(&conn, 100).unwrap()
        };
        run(&csv, &db).unwrap();
        let conn = store::open_read_only(&db).unwrap();
        assert_eq!(store::count(&conn).unwrap(), 3);
        assert_eq!(store::fetch(&conn, 100).unwrap(), first);
    }

    #[test]
    fn malformed_rows_abort_the_load() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("bad.csv");
        fs::write(
            &csv,
            "age,anaemia,creatinine_phosphokinase,diabetes,ejection_fraction,\
             high_blood_pressure,platelets,serum_creatinine,serum_sodium,sex,\
             smoking,time,DEATH_EVENT\nnot-a-number,0,1,0,1,0,1,1,1,1,0,1,0\n",
        )
        .unwrap();
        let db = dir.path().join("heart.db");

        assert!(run(&csv, &db).is_err());
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = run(&dir.path().join("absent.csv"), &dir.path().join("heart.db"));
        assert!(err.is_err());
    }
}
