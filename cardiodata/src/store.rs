use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, params};
use thiserror::Error;

use crate::record::HeartRecord;

/// Errors from the SQLite layer.
#[derive(Error, Debug)]
pub enum DataError {
    /// A read was attempted against a database file that does not
    /// exist. Reads must never create an empty database as a side
    /// effect, so the path is checked before opening.
    #[error("database file not found at: {}", .0.display())]
    MissingDatabase(PathBuf),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const CREATE_TABLE_SQL: &str = "CREATE TABLE heart_data (
    age REAL,
    anaemia INTEGER,
    creatinine_phosphokinase INTEGER,
    diabetes INTEGER,
    ejection_fraction INTEGER,
    high_blood_pressure INTEGER,
    platelets REAL,
    serum_creatinine REAL,
    serum_sodium INTEGER,
    sex INTEGER,
    smoking INTEGER,
    time INTEGER,
    death_event INTEGER
)";

const COLUMNS: &str = "age, anaemia, creatinine_phosphokinase, diabetes, \
    ejection_fraction, high_blood_pressure, platelets, serum_creatinine, \
    serum_sodium, sex, smoking, time, death_event";

/// Open (or create) the database for writing. Used by the loader.
pub fn open_or_create(path: &Path) -> Result<Connection, DataError> {
    Ok(Connection::open(path)?)
}

/// Open an existing database read-only, failing if the file is absent.
pub fn open_read_only(path: &Path) -> Result<Connection, DataError> {
    if !path.exists() {
        return Err(DataError::MissingDatabase(path.to_path_buf()));
    }
    Ok(Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?)
}

/// In-memory connection for tests.
pub fn open_memory() -> Result<Connection, DataError> {
    Ok(Connection::open_in_memory()?)
}

/// Wholesale-replace the `heart_data` table with the given records.
///
/// The table is dropped and recreated with the fixed schema, then all
/// rows are inserted in one transaction, so a rerun with the same
/// input leaves the database byte-for-byte equivalent. Returns the
/// number of rows written.
pub fn replace_all(
    conn: &mut Connection,
    records: &[HeartRecord],
) -> Result<usize, DataError> {
    let tx = conn.transaction()?;
    tx.execute_batch("DROP TABLE IF EXISTS heart_data")?;
    tx.execute_batch(CREATE_TABLE_SQL)?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO heart_data ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ))?;
        for record in records {
            stmt.execute(params![
                record.age,
                record.anaemia,
                record.creatinine_phosphokinase,
                record.diabetes,
                record.ejection_fraction,
                record.high_blood_pressure,
                record.platelets,
                record.serum_creatinine,
                record.serum_sodium,
                record.sex,
                record.smoking,
                record.time,
                record.death_event,
            ])?;
        }
    }
    tx.commit()?;
    Ok(records.len())
}

/// Read up to `limit` records in insertion order.
pub fn fetch(conn: &Connection, limit: usize) -> Result<Vec<HeartRecord>, DataError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM heart_data LIMIT ?1"
    ))?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(HeartRecord {
                age: row.get(0)?,
                anaemia: row.get(1)?,
                creatinine_phosphokinase: row.get(2)?,
                diabetes: row.get(3)?,
                ejection_fraction: row.get(4)?,
                high_blood_pressure: row.get(5)?,
                platelets: row.get(6)?,
                serum_creatinine: row.get(7)?,
                serum_sodium: row.get(8)?,
                sex: row.get(9)?,
                smoking: row.get(10)?,
                time: row.get(11)?,
                death_event: row.get(12)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Total number of records in the table.
pub fn count(conn: &Connection) -> Result<i64, DataError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM heart_data", [], |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<HeartRecord> {
        vec![
            HeartRecord {
                age: 75.0,
                anaemia: 0,
                creatinine_phosphokinase: 582,
                diabetes: 0,
                ejection_fraction: 20,
                high_blood_pressure: 1,
                platelets: 265000.0,
                serum_creatinine: 1.9,
                serum_sodium: 130,
                sex: 1,
                smoking: 0,
                time: 4,
                death_event: 1,
            },
            HeartRecord {
                age: 60.667,
                anaemia: 1,
                creatinine_phosphokinase: 151,
                diabetes: 1,
                ejection_fraction: 40,
                high_blood_pressure: 0,
                platelets: 201000.0,
                serum_creatinine: 1.0,
                serum_sodium: 136,
                sex: 0,
                smoking: 0,
                time: 172,
                death_event: 0,
            },
        ]
    }

    #[test]
    fn replace_is_idempotent() {
        let mut conn = open_memory().unwrap();
        let records = records();
        replace_all(&mut conn, &records).unwrap();
        let first = fetch(&conn, 100).unwrap();
        replace_all(&mut conn, &records).unwrap();
        let second = fetch(&conn, 100).unwrap();
        assert_eq!(first, second);
        assert_eq!(count(&conn).unwrap(), 2);
    }

    #[test]
    fn fetch_respects_the_limit() {
        let mut conn = open_memory().unwrap();
        replace_all(&mut conn, &records()).unwrap();
        assert_eq!(fetch(&conn, 1).unwrap().len(), 1);
        assert_eq!(fetch(&conn, 100).unwrap().len(), 2);
    }

    #[test]
    fn records_round_trip_unchanged() {
        let mut conn = open_memory().unwrap();
        let records = records();
        replace_all(&mut conn, &records).unwrap();
        assert_eq!(fetch(&conn, 100).unwrap(), records);
    }

    #[test]
    fn read_only_open_fails_on_missing_file() {
        let dir = std::env::temp_dir().join("cardiodata-no-such-db");
        let err = open_read_only(&dir.join("missing.db")).unwrap_err();
        assert!(matches!(err, DataError::MissingDatabase(_)));
    }
}
