//! SQLite caching layer for FDIC data.

use crate::error::{DataError, Result};
use crate::fdic::{Institution, RawPeriodRecord};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Reporting periods are quarterly; used by the coverage heuristic below.
const DAYS_PER_QUARTER: i64 = 92;

/// SQLite cache for FDIC institution and financials data.
#[derive(Debug)]
pub struct SqliteCache {
    conn: Connection,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Total cached reporting periods across all institutions.
    pub total_periods: usize,
    /// Number of distinct institutions with cached data.
    pub unique_certs: usize,
}

impl SqliteCache {
    /// Create a new SQLite cache.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory cache (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        // Raw reporting periods, one row per (cert, reporting date).
        // Field codes are stored as the original JSON map.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS financials (
                cert TEXT NOT NULL,
                repdte TEXT NOT NULL,
                fields TEXT NOT NULL,
                cached_at TEXT NOT NULL,
                PRIMARY KEY (cert, repdte)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_financials_cert_repdte ON financials(cert, repdte)",
            [],
        )?;

        // Institution name lookups
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS institutions (
                cert TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Check if financials are cached for an institution and date range.
    ///
    /// Coverage is judged against the number of quarters the range spans:
    /// at least three quarters of the expected reporting periods must be
    /// present. Banks occasionally skip a filing, so exact counts would
    /// force needless refetches.
    pub fn has_financials(&self, cert: &str, start: NaiveDate, end: NaiveDate) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM financials
             WHERE cert = ?1 AND repdte >= ?2 AND repdte <= ?3",
            params![cert, start.to_string(), end.to_string()],
            |row| row.get(0),
        )?;

        let expected = (end - start).num_days() / DAYS_PER_QUARTER;
        let required = (expected * 3) / 4;

        Ok(count > 0 && count >= required)
    }

    /// Get cached reporting periods for an institution and date range.
    ///
    /// Results are sorted ascending by reporting date.
    pub fn get_financials(
        &self,
        cert: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawPeriodRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT cert, repdte, fields FROM financials
             WHERE cert = ?1 AND repdte >= ?2 AND repdte <= ?3
             ORDER BY repdte ASC",
        )?;

        let rows = stmt.query_map(params![cert, start.to_string(), end.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (cert, repdte, fields_json) = row?;
            let report_date = NaiveDate::parse_from_str(&repdte, "%Y-%m-%d")
                .map_err(|e| DataError::Parse(format!("Bad cached repdte {}: {}", repdte, e)))?;
            let fields: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&fields_json)?;

            records.push(RawPeriodRecord {
                cert,
                report_date,
                fields,
            });
        }

        if records.is_empty() {
            return Err(DataError::MissingData {
                cert: cert.to_string(),
                reason: "No cached data found".to_string(),
            });
        }

        Ok(records)
    }

    /// Store reporting periods in the cache.
    pub fn put_financials(&self, records: &[RawPeriodRecord]) -> Result<()> {
        let cached_at = Utc::now().to_rfc3339();

        let tx = self.conn.unchecked_transaction()?;

        for record in records {
            let fields_json = serde_json::to_string(&record.fields)?;
            tx.execute(
                "INSERT OR REPLACE INTO financials (cert, repdte, fields, cached_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.cert,
                    record.report_date.to_string(),
                    fields_json,
                    cached_at
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Store an institution name mapping.
    pub fn put_institution(&self, institution: &Institution) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT OR REPLACE INTO institutions (cert, name, updated_at)
             VALUES (?1, ?2, ?3)",
            params![institution.cert, institution.name, updated_at],
        )?;

        Ok(())
    }

    /// Get a cached institution by cert number.
    pub fn get_institution(&self, cert: &str) -> Result<Option<Institution>> {
        let result = self
            .conn
            .query_row(
                "SELECT cert, name FROM institutions WHERE cert = ?1",
                params![cert],
                |row| {
                    Ok(Institution {
                        cert: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(result)
    }

    /// Get cache statistics.
    pub fn get_stats(&self) -> Result<CacheStats> {
        let total_periods: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM financials", [], |row| row.get(0))?;
        let unique_certs: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT cert) FROM financials",
            [],
            |row| row.get(0),
        )?;

        Ok(CacheStats {
            total_periods: total_periods as usize,
            unique_certs: unique_certs as usize,
        })
    }

    /// Delete all cached data.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM financials", [])?;
        self.conn.execute("DELETE FROM institutions", [])?;
        Ok(())
    }
}
