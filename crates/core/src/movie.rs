//! The movie record, its public JSON projection, and its validation rules.

use chrono::Datelike;
use serde::{Deserialize, Serialize, Serializer};
use validator::{ValidateLength, ValidateRange};

use crate::runtime::Runtime;
use crate::types::{DbId, Timestamp};
use crate::validation::{unique, Validator};

/// Earliest accepted release year.
pub const MIN_YEAR: i32 = 1888;

/// Longest accepted title, in bytes.
pub const MAX_TITLE_BYTES: usize = 500;

pub const MAX_GENRES: u64 = 5;

/// A catalog entry.
///
/// `year` and `runtime` use zero for "unset" and `genres` uses an empty list.
/// `version` starts at 1 and is bumped by every persisted update.
///
/// The JSON form is produced by [`MovieProjection`], never by serializing
/// these fields directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: DbId,
    pub created_at: Timestamp,
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
    pub version: i32,
}

/// Request body for creating a movie, and for patching one.
///
/// Every field is optional so the same shape serves partial updates; the
/// `runtime` field goes through the [`Runtime`] codec while the body is
/// decoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieInput {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

impl MovieInput {
    /// Build an unsaved movie from a create request.
    ///
    /// Missing fields become their "unset" values and are then caught by
    /// [`validate_movie`]. A missing genre list is recorded here because an
    /// absent list and an empty one look the same once converted.
    pub fn into_draft(self, v: &mut Validator) -> Movie {
        v.check(self.genres.is_some(), "genres", "must be provided");

        Movie {
            id: 0,
            created_at: chrono::Utc::now(),
            title: self.title.unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            runtime: self.runtime.unwrap_or_default(),
            genres: self.genres.unwrap_or_default(),
            version: 1,
        }
    }
}

impl Movie {
    /// Apply a partial update. Fields absent from `patch` keep their value.
    pub fn apply(&mut self, patch: MovieInput) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(runtime) = patch.runtime {
            self.runtime = runtime;
        }
        if let Some(genres) = patch.genres {
            self.genres = genres;
        }
    }
}

/// The public shape of a [`Movie`].
///
/// A plain struct with derived `Serialize`, so serializing it never calls
/// back into `Movie`'s own impl. `created_at` has no counterpart here, and
/// zero/empty values become `None` so their keys are left out.
#[derive(Debug, Serialize)]
pub struct MovieProjection<'a> {
    pub id: DbId,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Serialized through the runtime codec as `"<N> mins"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Runtime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<&'a [String]>,
    pub version: i32,
}

impl<'a> From<&'a Movie> for MovieProjection<'a> {
    fn from(movie: &'a Movie) -> Self {
        Self {
            id: movie.id,
            title: &movie.title,
            year: (movie.year != 0).then_some(movie.year),
            runtime: (!movie.runtime.is_zero()).then_some(movie.runtime),
            genres: (!movie.genres.is_empty()).then_some(movie.genres.as_slice()),
            version: movie.version,
        }
    }
}

impl Serialize for Movie {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        MovieProjection::from(self).serialize(serializer)
    }
}

/// Check a candidate movie against the catalog rules, using today's year
/// (UTC) as the upper bound for `year`.
pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    validate_movie_for_year(v, movie, chrono::Utc::now().year());
}

/// Same as [`validate_movie`] with an explicit current year.
pub fn validate_movie_for_year(v: &mut Validator, movie: &Movie, current_year: i32) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(movie.year != 0, "year", "must be provided");
    v.check(
        movie.year.validate_range(Some(MIN_YEAR), None, None, None),
        "year",
        "must be greater than 1888",
    );
    v.check(
        movie.year.validate_range(None, Some(current_year), None, None),
        "year",
        "must not be in the future",
    );

    v.check(!movie.runtime.is_zero(), "runtime", "must be provided");
    v.check(
        movie.runtime.minutes() > 0,
        "runtime",
        "must be a positive integer",
    );

    v.check(
        movie.genres.validate_length(Some(1u64), None, None),
        "genres",
        "must contain at least 1 genre",
    );
    v.check(
        movie.genres.validate_length(None, Some(MAX_GENRES), None),
        "genres",
        "must not contain more than 5 genres",
    );
    v.check(
        unique(&movie.genres),
        "genres",
        "must not contain duplicate values",
    );
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn movie(year: i32, runtime: i32, genres: &[&str]) -> Movie {
        Movie {
            id: 7,
            created_at: chrono::Utc::now(),
            title: "Casablanca".to_string(),
            year,
            runtime: Runtime::from_minutes(runtime),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            version: 3,
        }
    }

    fn errors_for(movie: &Movie) -> crate::validation::FieldErrors {
        let mut v = Validator::new();
        validate_movie_for_year(&mut v, movie, 2026);
        v.errors().clone()
    }

    // -- projection --

    #[test]
    fn projects_every_public_field() {
        let value = serde_json::to_value(movie(1942, 102, &["drama", "romance"])).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "title": "Casablanca",
                "year": 1942,
                "runtime": "102 mins",
                "genres": ["drama", "romance"],
                "version": 3,
            })
        );
    }

    #[test]
    fn never_exposes_created_at() {
        let value = serde_json::to_value(movie(1942, 102, &["drama"])).unwrap();
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn omits_zero_year() {
        let value = serde_json::to_value(movie(0, 102, &["drama"])).unwrap();
        assert!(value.get("year").is_none());
    }

    #[test]
    fn omits_empty_genres() {
        let value = serde_json::to_value(movie(1942, 102, &[])).unwrap();
        assert!(value.get("genres").is_none());
    }

    #[test]
    fn omits_zero_runtime() {
        let value = serde_json::to_value(movie(1942, 0, &["drama"])).unwrap();
        assert!(value.get("runtime").is_none());
    }

    #[test]
    fn renders_runtime_as_minutes_text() {
        let value = serde_json::to_value(movie(1942, 142, &["drama"])).unwrap();
        assert_eq!(value["runtime"], "142 mins");
    }

    #[test]
    fn keeps_genre_order() {
        let value = serde_json::to_value(movie(1942, 102, &["war", "drama", "romance"])).unwrap();
        assert_eq!(value["genres"], json!(["war", "drama", "romance"]));
    }

    // -- input --

    #[test]
    fn draft_starts_at_version_one() {
        let input: MovieInput = serde_json::from_value(json!({
            "title": "Moana",
            "year": 2016,
            "runtime": "107 mins",
            "genres": ["animation", "adventure"],
        }))
        .unwrap();

        let mut v = Validator::new();
        let draft = input.into_draft(&mut v);

        assert!(v.is_valid());
        assert_eq!(draft.version, 1);
        assert_eq!(draft.runtime, Runtime::from_minutes(107));
    }

    #[test]
    fn draft_without_genres_records_missing_list() {
        let mut v = Validator::new();
        MovieInput::default().into_draft(&mut v);
        assert_eq!(v.errors()["genres"], "must be provided");
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut m = movie(1942, 102, &["drama"]);
        m.apply(MovieInput {
            year: Some(1943),
            ..MovieInput::default()
        });

        assert_eq!(m.year, 1943);
        assert_eq!(m.title, "Casablanca");
        assert_eq!(m.runtime, Runtime::from_minutes(102));
        assert_eq!(m.genres, vec!["drama".to_string()]);
    }

    // -- validation --

    #[test]
    fn valid_movie_has_no_errors() {
        assert!(errors_for(&movie(1942, 102, &["drama", "romance"])).is_empty());
    }

    #[test]
    fn accumulates_every_failing_field() {
        let mut m = movie(0, 102, &[]);
        m.title.clear();

        let errors = errors_for(&m);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["title"], "must be provided");
        assert_eq!(errors["year"], "must be provided");
        assert_eq!(errors["genres"], "must contain at least 1 genre");
    }

    #[test]
    fn rejects_long_title() {
        let mut m = movie(1942, 102, &["drama"]);
        m.title = "x".repeat(MAX_TITLE_BYTES + 1);
        assert_eq!(
            errors_for(&m)["title"],
            "must not be more than 500 bytes long"
        );
    }

    #[test]
    fn title_limit_counts_bytes() {
        let mut m = movie(1942, 102, &["drama"]);
        // 250 two-byte characters is exactly the limit.
        m.title = "é".repeat(250);
        assert!(errors_for(&m).is_empty());
        m.title.push('é');
        assert!(errors_for(&m).contains_key("title"));
    }

    #[test]
    fn year_bounds() {
        assert_eq!(
            errors_for(&movie(1887, 102, &["drama"]))["year"],
            "must be greater than 1888"
        );
        assert!(errors_for(&movie(1888, 102, &["drama"])).is_empty());
        assert!(errors_for(&movie(2026, 102, &["drama"])).is_empty());
        assert_eq!(
            errors_for(&movie(2027, 102, &["drama"]))["year"],
            "must not be in the future"
        );
    }

    #[test]
    fn runtime_must_be_positive() {
        assert_eq!(
            errors_for(&movie(1942, 0, &["drama"]))["runtime"],
            "must be provided"
        );
        assert_eq!(
            errors_for(&movie(1942, -5, &["drama"]))["runtime"],
            "must be a positive integer"
        );
    }

    #[test]
    fn genre_count_and_duplicates() {
        assert_eq!(
            errors_for(&movie(1942, 102, &["a", "b", "c", "d", "e", "f"]))["genres"],
            "must not contain more than 5 genres"
        );
        assert!(errors_for(&movie(1942, 102, &["a", "b", "c", "d", "e"])).is_empty());
        assert_eq!(
            errors_for(&movie(1942, 102, &["drama", "drama"]))["genres"],
            "must not contain duplicate values"
        );
    }

    #[test]
    fn moana_validates_and_projects() {
        let input: MovieInput = serde_json::from_str(
            r#"{"title":"Moana","year":2016,"runtime":"107 mins","genres":["animation","adventure"]}"#,
        )
        .unwrap();

        let mut v = Validator::new();
        let mut draft = input.into_draft(&mut v);
        validate_movie_for_year(&mut v, &draft, 2026);
        assert!(v.is_valid());

        draft.id = 1;
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "id": 1,
                "title": "Moana",
                "year": 2016,
                "runtime": "107 mins",
                "genres": ["animation", "adventure"],
                "version": 1,
            })
        );
    }
}
