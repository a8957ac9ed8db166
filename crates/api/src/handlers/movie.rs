//! Handlers for the `/movies` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::movie::{validate_movie, Movie, MovieInput};
use marquee_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use marquee_core::types::DbId;
use marquee_core::validation::Validator;
use marquee_db::repositories::MovieRepo;
use marquee_db::DbPool;

use crate::error::{AppError, AppResult, EDIT_CONFLICT_MESSAGE};
use crate::query::PaginationParams;
use crate::response::Envelope;
use crate::state::AppState;

/// POST /v1/movies
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body?;

    let mut v = Validator::new();
    let draft = input.into_draft(&mut v);
    validate_movie(&mut v, &draft);
    v.into_result()?;

    let movie = MovieRepo::create(&state.pool, &draft).await?;
    tracing::info!(movie_id = movie.id, "Movie created");

    let location = format!("/v1/movies/{}", movie.id);
    let envelope = Envelope::new(StatusCode::CREATED).with("movie", &movie)?;
    Ok(([(LOCATION, location)], envelope))
}

/// GET /v1/movies
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Envelope> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let movies = MovieRepo::list(&state.pool, limit, offset).await?;
    Envelope::ok().with("movies", &movies)
}

/// GET /v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Envelope> {
    let id = parse_id(&raw_id)?;
    let movie = find_movie(&state.pool, id).await?;
    Envelope::ok().with("movie", &movie)
}

/// PATCH /v1/movies/{id}
///
/// Applies the fields present in the body, re-validates the whole record,
/// and writes it back only if nobody else updated it in the meantime.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> AppResult<Envelope> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = body?;

    let mut movie = find_movie(&state.pool, id).await?;
    movie.apply(patch);

    let mut v = Validator::new();
    validate_movie(&mut v, &movie);
    v.into_result()?;

    let updated = MovieRepo::update(&state.pool, &movie)
        .await?
        .ok_or_else(|| {
            tracing::warn!(movie_id = id, version = movie.version, "Edit conflict");
            AppError::Core(CoreError::Conflict(EDIT_CONFLICT_MESSAGE.to_string()))
        })?;
    tracing::info!(movie_id = id, version = updated.version, "Movie updated");

    Envelope::ok().with("movie", &updated)
}

/// DELETE /v1/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Envelope> {
    let id = parse_id(&raw_id)?;
    if !MovieRepo::delete(&state.pool, id).await? {
        return Err(movie_not_found(id));
    }
    tracing::info!(movie_id = id, "Movie deleted");

    Envelope::ok().with("message", "movie successfully deleted")
}

/// Movie IDs are positive integers; anything else cannot name a movie.
fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::NotFound("the requested resource could not be found".to_string()))
}

async fn find_movie(pool: &DbPool, id: DbId) -> AppResult<Movie> {
    MovieRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| movie_not_found(id))
}

fn movie_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}
