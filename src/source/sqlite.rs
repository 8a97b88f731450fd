//! SQLite relational source
//!
//! Reads the four-table philosopher layout and assembles raw records in the
//! same shape the HTTP API serves:
//!
//! - `philosophers`: one row per philosopher, genome axes as columns
//! - `philosopher_domains(philosopher_id, domain, strength)`
//! - `influences(source_philosopher_id, target_philosopher_id, strength)`
//! - `critiques(critic_philosopher_id, target_philosopher_id, strength)`
//!
//! The schema itself is owned by whatever writes the database.

use super::traits::{RecordSource, SourceResult};
use crate::record::GenomeAxis;
use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row, RowIndex};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

const PHILOSOPHER_COLUMNS: &str = "id, name, birth_year, death_year, birth_city, birth_region, \
     birth_country, birth_latitude, birth_longitude, primary_domain, era, era_position, \
     spiral_dynamics_stage, spiral_justification, being_vs_becoming, one_vs_many, \
     mind_vs_matter, freedom_vs_determinism, transcendent_vs_immanent, realism_vs_antirealism, \
     reason_vs_experience, absolute_vs_relative, comprehensive_biography, \
     intellectual_journey, historical_context";

/// Per-philosopher score maps keyed by philosopher id.
type ScoreIndex = HashMap<String, Map<String, Value>>;

/// SQLite-backed record source
///
/// An explicitly opened handle: open it at startup, pass it where it is
/// needed, and `close()` it at shutdown. Queries run on tokio's blocking
/// pool.
pub struct SqliteSource {
    conn: Arc<Mutex<Connection>>,
    name: String,
}

impl SqliteSource {
    /// Open an existing database read-only.
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            name: format!("sqlite:{}", path.display()),
        })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            name: "sqlite:connection".to_string(),
        }
    }

    /// Close the underlying connection, surfacing any close error.
    ///
    /// A fetch still running on the blocking pool keeps the connection
    /// alive; it closes when that fetch finishes.
    pub fn close(self) -> SourceResult<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(conn) => {
                let conn = conn.into_inner().unwrap_or_else(PoisonError::into_inner);
                conn.close().map_err(|(_, e)| e.into())
            }
            Err(_) => Ok(()),
        }
    }
}

#[async_trait]
impl RecordSource for SqliteSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> SourceResult<Vec<Value>> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || read_records(&conn)).await?
    }
}

fn read_records(conn: &Mutex<Connection>) -> SourceResult<Vec<Value>> {
    let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);

    let domains = score_index(
        &conn,
        "SELECT philosopher_id, domain, strength FROM philosopher_domains",
    )?;
    // Influence maps belong to the philosopher who was influenced
    let influences = score_index(
        &conn,
        "SELECT target_philosopher_id, source_philosopher_id, strength FROM influences",
    )?;
    let critiques = score_index(
        &conn,
        "SELECT critic_philosopher_id, target_philosopher_id, strength FROM critiques",
    )?;

    let sql = format!(
        "SELECT {} FROM philosophers ORDER BY birth_year ASC",
        PHILOSOPHER_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;

    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = philosopher_row(row)?;
        let id = record["id"].as_str().unwrap_or_default().to_string();

        let domain_strengths = domains.get(&id).cloned().unwrap_or_default();
        let all_domains: Vec<Value> = domain_strengths.keys().cloned().map(Value::String).collect();
        record["domainStrengths"] = Value::Object(domain_strengths);
        record["allDomains"] = Value::Array(all_domains);
        record["influenceMap"] = Value::Object(influences.get(&id).cloned().unwrap_or_default());
        record["critiqueMap"] = Value::Object(critiques.get(&id).cloned().unwrap_or_default());
        records.push(record);
    }

    debug!(count = records.len(), "read philosopher rows");
    Ok(records)
}

/// Group `(owner, key, strength)` rows into per-owner maps.
fn score_index(conn: &Connection, sql: &str) -> SourceResult<ScoreIndex> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut index = ScoreIndex::new();
    while let Some(row) = rows.next()? {
        let owner = column_json(row, 0)?;
        let key = column_json(row, 1)?;
        let (Some(owner), Some(key)) = (as_key(owner), as_key(key)) else {
            continue;
        };
        index.entry(owner).or_default().insert(key, column_json(row, 2)?);
    }
    Ok(index)
}

fn as_key(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One `philosophers` row in API record shape.
fn philosopher_row(row: &Row<'_>) -> SourceResult<Value> {
    let col = |name: &str| column_json(row, name);
    let or_zero = |v: Value| if v.is_null() { json!(0) } else { v };

    let mut genome = Map::new();
    for axis in GenomeAxis::ALL {
        genome.insert(axis.camel_name().to_string(), col(axis.snake_name())?);
    }

    Ok(json!({
        "id": col("id")?,
        "name": col("name")?,
        "birthYear": col("birth_year")?,
        "deathYear": col("death_year")?,
        "birthLocation": {
            "city": col("birth_city")?,
            "region": col("birth_region")?,
            "modernCountry": col("birth_country")?,
            "coordinates": [or_zero(col("birth_latitude")?), or_zero(col("birth_longitude")?)],
        },
        "primaryDomain": col("primary_domain")?,
        "era": col("era")?,
        "eraPosition": col("era_position")?,
        "spiralDynamicsStage": col("spiral_dynamics_stage")?,
        "spiralJustification": col("spiral_justification")?,
        "philosophicalGenome": Value::Object(genome),
        "comprehensiveBiography": col("comprehensive_biography")?,
        "intellectualJourney": col("intellectual_journey")?,
        "historicalContext": col("historical_context")?,
    }))
}

fn column_json<I: RowIndex>(row: &Row<'_>, idx: I) -> SourceResult<Value> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null | ValueRef::Blob(_) => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
    })
}
