//! Application services over the repository.
//!
//! Each function takes the repository by reference and returns plain DTOs,
//! so front ends never hold domain entities across a request boundary.
//! Mirrors the browsing surface: movie-by-rank navigation, paginated
//! listings per actor/director/genre, reviews and watchlists.

use catalogue::{MemoryRepository, Movie, MovieId, Review};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors a front end has to handle: both are user-input conditions, not
/// repository faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("no movie with id {0} exists in the catalogue")]
    NonExistentMovie(MovieId),

    #[error("unknown user {0:?}")]
    UnknownUser(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDto {
    pub id: Option<MovieId>,
    pub title: String,
    pub release_year: Option<u16>,
    pub description: Option<String>,
    pub director: Option<String>,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
    pub runtime_minutes: Option<u32>,
    pub reviews: Vec<ReviewDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDto {
    pub user_name: String,
    pub movie_id: MovieId,
    pub review_text: String,
    pub timestamp: DateTime<Utc>,
}

pub fn movie_to_dto(movie: &Movie) -> MovieDto {
    MovieDto {
        id: movie.id(),
        title: movie.title().to_string(),
        release_year: movie.release_year(),
        description: movie.description().map(str::to_string),
        director: movie.director().map(|d| d.name().to_string()),
        actors: movie.actors().iter().map(|a| a.name().to_string()).collect(),
        genres: movie.genres().iter().map(|g| g.name().to_string()).collect(),
        runtime_minutes: movie.runtime_minutes(),
        reviews: movie.reviews().iter().map(|r| review_to_dto(r)).collect(),
    }
}

pub fn movies_to_dto(movies: &[&Movie]) -> Vec<MovieDto> {
    movies.iter().copied().map(movie_to_dto).collect()
}

pub fn review_to_dto(review: &Review) -> ReviewDto {
    ReviewDto {
        user_name: review.user_name().to_string(),
        movie_id: review.movie_id(),
        review_text: review.review_text().to_string(),
        timestamp: review.timestamp(),
    }
}

// =============================================================================
// Reviews and users
// =============================================================================

/// Store a new review for a movie on behalf of a user.
///
/// Both ends are checked first: reviewing a movie that does not exist or
/// reviewing as an unknown user is an error, and nothing is recorded.
#[instrument(skip(repo))]
pub fn add_review(
    movie_id: MovieId,
    review_text: &str,
    user_name: &str,
    repo: &mut MemoryRepository,
) -> Result<()> {
    if repo.get_movie(movie_id).is_none() {
        return Err(ServiceError::NonExistentMovie(movie_id));
    }
    let user_name = user_name.trim().to_lowercase();
    if repo.get_user(&user_name).is_none() {
        return Err(ServiceError::UnknownUser(user_name));
    }

    repo.add_review(Review::new(&user_name, movie_id, review_text));
    debug!("recorded review for movie {movie_id}");
    Ok(())
}

/// Reviews of one movie, oldest first.
pub fn get_reviews_for_movie(movie_id: MovieId, repo: &MemoryRepository) -> Result<Vec<ReviewDto>> {
    let movie = repo
        .get_movie(movie_id)
        .ok_or(ServiceError::NonExistentMovie(movie_id))?;
    Ok(movie.reviews().iter().map(|r| review_to_dto(r)).collect())
}

/// The movies a user has queued for watching, in queue order.
pub fn get_watchlist(user_name: &str, repo: &MemoryRepository) -> Result<Vec<MovieDto>> {
    let user_name = user_name.trim().to_lowercase();
    let user = repo
        .get_user(&user_name)
        .ok_or(ServiceError::UnknownUser(user_name))?;
    Ok(movies_to_dto(&repo.get_movies_by_id(user.watchlist())))
}

/// Queue a movie on a user's watchlist. Duplicates are suppressed.
pub fn add_to_watchlist(
    user_name: &str,
    movie_id: MovieId,
    repo: &mut MemoryRepository,
) -> Result<()> {
    if repo.get_movie(movie_id).is_none() {
        return Err(ServiceError::NonExistentMovie(movie_id));
    }
    let user_name = user_name.trim().to_lowercase();
    let user = repo
        .get_user_mut(&user_name)
        .ok_or(ServiceError::UnknownUser(user_name))?;
    user.add_to_watchlist(movie_id);
    Ok(())
}

/// Drop a movie from a user's watchlist. Removing an absent movie is fine.
pub fn remove_from_watchlist(
    user_name: &str,
    movie_id: MovieId,
    repo: &mut MemoryRepository,
) -> Result<()> {
    let user_name = user_name.trim().to_lowercase();
    let user = repo
        .get_user_mut(&user_name)
        .ok_or(ServiceError::UnknownUser(user_name))?;
    user.remove_from_watchlist(movie_id);
    Ok(())
}

// =============================================================================
// Movie queries
// =============================================================================

pub fn get_movie(movie_id: MovieId, repo: &MemoryRepository) -> Result<MovieDto> {
    repo.get_movie(movie_id)
        .map(movie_to_dto)
        .ok_or(ServiceError::NonExistentMovie(movie_id))
}

pub fn get_first_movie(repo: &MemoryRepository) -> Option<MovieDto> {
    repo.get_first_movie().map(movie_to_dto)
}

pub fn get_last_movie(repo: &MemoryRepository) -> Option<MovieDto> {
    repo.get_last_movie().map(movie_to_dto)
}

/// The movie at a rank, plus the ranks immediately before and after it for
/// navigation. An unknown rank yields an empty list and no neighbours.
pub fn get_movies_by_rank(
    id: MovieId,
    repo: &MemoryRepository,
) -> (Vec<MovieDto>, Option<MovieId>, Option<MovieId>) {
    let movies = repo.get_movies_by_id(&[id]);

    let mut previous_id = None;
    let mut next_id = None;
    if let Some(movie) = movies.first() {
        previous_id = repo.get_id_of_previous_movie(movie);
        next_id = repo.get_id_of_next_movie(movie);
    }

    (movies_to_dto(&movies), previous_id, next_id)
}

pub fn get_movies_by_id(ids: &[MovieId], repo: &MemoryRepository) -> Vec<MovieDto> {
    movies_to_dto(&repo.get_movies_by_id(ids))
}

pub fn get_movies_by_release_year(year: u16, repo: &MemoryRepository) -> Vec<MovieDto> {
    movies_to_dto(&repo.get_movies_by_release_year(year))
}

pub fn get_movie_ids_for_actor(actor_name: &str, repo: &MemoryRepository) -> Vec<MovieId> {
    repo.get_movie_ids_for_actor(actor_name)
}

pub fn get_movie_ids_for_director(director_name: &str, repo: &MemoryRepository) -> Vec<MovieId> {
    repo.get_movie_ids_for_director(director_name)
}

pub fn get_movie_ids_for_genre(genre_name: &str, repo: &MemoryRepository) -> Vec<MovieId> {
    repo.get_movie_ids_for_genre(genre_name)
}

// =============================================================================
// Paginated browsing
// =============================================================================

/// Cursors into a tag's movie listing. Each one is an offset into the id
/// list, present only when the corresponding page exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursors {
    pub first: Option<usize>,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub last: Option<usize>,
}

/// One page of the movies tagged with an actor.
#[instrument(skip(repo))]
pub fn browse_by_actor(
    actor_name: &str,
    cursor: usize,
    per_page: usize,
    repo: &MemoryRepository,
) -> (Vec<MovieDto>, PageCursors) {
    page_of(&repo.get_movie_ids_for_actor(actor_name), cursor, per_page, repo)
}

/// One page of the movies tagged with a director.
#[instrument(skip(repo))]
pub fn browse_by_director(
    director_name: &str,
    cursor: usize,
    per_page: usize,
    repo: &MemoryRepository,
) -> (Vec<MovieDto>, PageCursors) {
    page_of(
        &repo.get_movie_ids_for_director(director_name),
        cursor,
        per_page,
        repo,
    )
}

/// One page of the movies tagged with a genre.
#[instrument(skip(repo))]
pub fn browse_by_genre(
    genre_name: &str,
    cursor: usize,
    per_page: usize,
    repo: &MemoryRepository,
) -> (Vec<MovieDto>, PageCursors) {
    page_of(&repo.get_movie_ids_for_genre(genre_name), cursor, per_page, repo)
}

fn page_of(
    ids: &[MovieId],
    cursor: usize,
    per_page: usize,
    repo: &MemoryRepository,
) -> (Vec<MovieDto>, PageCursors) {
    let per_page = per_page.max(1);
    let end = (cursor + per_page).min(ids.len());
    let window = ids.get(cursor..end).unwrap_or(&[]);

    debug!("{} of {} tagged movies in page", window.len(), ids.len());
    (
        movies_to_dto(&repo.get_movies_by_id(window)),
        page_cursors(ids.len(), cursor, per_page),
    )
}

fn page_cursors(total: usize, cursor: usize, per_page: usize) -> PageCursors {
    let mut cursors = PageCursors::default();

    if cursor > 0 {
        cursors.prev = Some(cursor.saturating_sub(per_page));
        cursors.first = Some(0);
    }

    if cursor + per_page < total {
        cursors.next = Some(cursor + per_page);

        let mut last = per_page * (total / per_page);
        if total % per_page == 0 {
            last -= per_page;
        }
        cursors.last = Some(last);
    }

    cursors
}
