//! Row mapping for the `movies` table.

use marquee_core::movie::Movie;
use marquee_core::runtime::Runtime;
use marquee_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `movies` table.
///
/// `runtime` is stored as plain minutes; the `"<N> mins"` form only exists
/// on the wire.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: DbId,
    pub created_at: Timestamp,
    pub title: String,
    pub year: i32,
    pub runtime: i32,
    pub genres: Vec<String>,
    pub version: i32,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            created_at: row.created_at,
            title: row.title,
            year: row.year,
            runtime: Runtime::from_minutes(row.runtime),
            genres: row.genres,
            version: row.version,
        }
    }
}
