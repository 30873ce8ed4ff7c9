//! Core domain types for the movie catalogue.
//!
//! This module defines the entities the repository stores:
//! - Type alias for movie ids (`MovieId`)
//! - Tag entities (`Actor`, `Director`, `Genre`) that compare by name and
//!   carry the ids of the movies tagging them
//! - `Movie`, identified and ordered by `(title, release_year)`
//! - `User` and `Review` for the reviewing side of the catalogue
//!
//! Identity is value-based throughout: two `Actor`s with the same name are
//! the same actor, no matter where the values live.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, Utc};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie, assigned by the repository on insertion.
/// Ids are 1-based and dense: after N insertions the ids are exactly 1..=N.
pub type MovieId = u32;

// =============================================================================
// Tag Entities
// =============================================================================

/// A movie genre, e.g. "Action".
///
/// Equality, ordering and hashing use the normalized name only; the
/// tagged-movie list is bookkeeping the repository maintains on its
/// registered master copy.
#[derive(Debug, Clone)]
pub struct Genre {
    name: String,
    tagged_movies: Vec<MovieId>,
}

impl Genre {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            tagged_movies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the movies tagged with this genre, in insertion order.
    pub fn tagged_movies(&self) -> &[MovieId] {
        &self.tagged_movies
    }

    pub(crate) fn tag_movie(&mut self, id: MovieId) {
        if !self.tagged_movies.contains(&id) {
            self.tagged_movies.push(id);
        }
    }
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Genre {}

impl PartialOrd for Genre {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Genre {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Genre {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A movie director. Compares by full name.
#[derive(Debug, Clone)]
pub struct Director {
    name: String,
    tagged_movies: Vec<MovieId>,
}

impl Director {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            tagged_movies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the movies this director directed, in insertion order.
    pub fn tagged_movies(&self) -> &[MovieId] {
        &self.tagged_movies
    }

    pub(crate) fn tag_movie(&mut self, id: MovieId) {
        if !self.tagged_movies.contains(&id) {
            self.tagged_movies.push(id);
        }
    }
}

impl PartialEq for Director {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Director {}

impl PartialOrd for Director {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Director {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Director {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Director {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A movie actor. Compares by full name.
///
/// Besides the tagged-movie list, an actor tracks the set of colleagues it
/// has appeared with. The repository records the relation whenever a movie
/// with two or more actors is inserted; it is symmetric by construction.
#[derive(Debug, Clone)]
pub struct Actor {
    name: String,
    colleagues: BTreeSet<String>,
    tagged_movies: Vec<MovieId>,
}

impl Actor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            colleagues: BTreeSet::new(),
            tagged_movies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the movies this actor appears in, in insertion order.
    pub fn tagged_movies(&self) -> &[MovieId] {
        &self.tagged_movies
    }

    /// Names of actors this one has appeared with, in name order.
    pub fn colleagues(&self) -> impl Iterator<Item = &str> {
        self.colleagues.iter().map(String::as_str)
    }

    /// True if both actors appear in at least one common movie.
    pub fn worked_with(&self, colleague: &Actor) -> bool {
        self.colleagues.contains(colleague.name())
    }

    pub(crate) fn tag_movie(&mut self, id: MovieId) {
        if !self.tagged_movies.contains(&id) {
            self.tagged_movies.push(id);
        }
    }

    pub(crate) fn record_colleague(&mut self, name: &str) {
        if name != self.name {
            self.colleagues.insert(name.to_string());
        }
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Actor {}

impl PartialOrd for Actor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Actor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Movie
// =============================================================================

/// A catalogued movie.
///
/// Identity is `(title, release_year)`: equality, ordering and hashing all
/// derive from that pair, and the pair is fixed at construction because the
/// repository keeps its movie sequence sorted by it. Everything else
/// (description, tags, runtime, reviews) is mutable payload.
#[derive(Debug, Clone)]
pub struct Movie {
    title: String,
    release_year: Option<u16>,
    id: Option<MovieId>,
    description: Option<String>,
    director: Option<Director>,
    actors: Vec<Actor>,
    genres: Vec<Genre>,
    runtime_minutes: Option<u32>,
    reviews: Vec<Arc<Review>>,
}

impl Movie {
    /// Create a movie from its identity pair. The title is trimmed; years
    /// before 1900 are treated as unknown.
    pub fn new(title: &str, release_year: Option<u16>) -> Self {
        Self {
            title: title.trim().to_string(),
            release_year: release_year.filter(|&year| year >= 1900),
            id: None,
            description: None,
            director: None,
            actors: Vec::new(),
            genres: Vec::new(),
            runtime_minutes: None,
            reviews: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn release_year(&self) -> Option<u16> {
        self.release_year
    }

    /// Repository-assigned rank. `None` until the movie has been inserted.
    pub fn id(&self) -> Option<MovieId> {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn director(&self) -> Option<&Director> {
        self.director.as_ref()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime_minutes
    }

    pub fn reviews(&self) -> &[Arc<Review>] {
        &self.reviews
    }

    pub fn set_description(&mut self, description: &str) {
        let trimmed = description.trim();
        self.description = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn set_director(&mut self, director: Director) {
        self.director = Some(director);
    }

    pub fn set_runtime_minutes(&mut self, minutes: u32) {
        self.runtime_minutes = Some(minutes);
    }

    /// Append an actor unless an equal one is already credited.
    pub fn add_actor(&mut self, actor: Actor) {
        if !self.actors.contains(&actor) {
            self.actors.push(actor);
        }
    }

    /// Append a genre unless an equal one is already listed.
    pub fn add_genre(&mut self, genre: Genre) {
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
        }
    }

    /// Assign the repository rank. A no-op when an id is already present:
    /// once assigned, the id never changes.
    pub(crate) fn assign_id(&mut self, id: MovieId) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    pub(crate) fn add_review(&mut self, review: Arc<Review>) {
        self.reviews.push(review);
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.release_year == other.release_year
    }
}

impl Eq for Movie {}

impl PartialOrd for Movie {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Movie {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title
            .cmp(&other.title)
            .then(self.release_year.cmp(&other.release_year))
    }
}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.release_year.hash(state);
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.release_year {
            Some(year) => write!(f, "{} ({})", self.title, year),
            None => write!(f, "{} (????)", self.title),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered catalogue user.
///
/// User names are normalized (trimmed, lower-cased) so that lookups and
/// equality are case-insensitive. The password is opaque here; hashing
/// belongs to the authentication layer.
#[derive(Debug, Clone)]
pub struct User {
    user_name: String,
    password: String,
    watched_movies: Vec<MovieId>,
    watchlist: Vec<MovieId>,
    reviews: Vec<Arc<Review>>,
    time_spent_watching_movies_minutes: u32,
}

impl User {
    pub fn new(user_name: &str, password: &str) -> Self {
        Self {
            user_name: user_name.trim().to_lowercase(),
            password: password.to_string(),
            watched_movies: Vec::new(),
            watchlist: Vec::new(),
            reviews: Vec::new(),
            time_spent_watching_movies_minutes: 0,
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn watched_movies(&self) -> &[MovieId] {
        &self.watched_movies
    }

    pub fn watchlist(&self) -> &[MovieId] {
        &self.watchlist
    }

    pub fn reviews(&self) -> &[Arc<Review>] {
        &self.reviews
    }

    pub fn time_spent_watching_movies_minutes(&self) -> u32 {
        self.time_spent_watching_movies_minutes
    }

    /// Record a watched movie and add its runtime to the watch-time total.
    /// Movies that have not been inserted into a repository have no id and
    /// are ignored.
    pub fn watch_movie(&mut self, movie: &Movie) {
        if let Some(id) = movie.id() {
            self.watched_movies.push(id);
            self.time_spent_watching_movies_minutes += movie.runtime_minutes().unwrap_or(0);
        }
    }

    /// Queue a movie for watching. Duplicates are suppressed.
    pub fn add_to_watchlist(&mut self, movie_id: MovieId) {
        if !self.watchlist.contains(&movie_id) {
            self.watchlist.push(movie_id);
        }
    }

    /// Drop every occurrence of the movie from the watchlist.
    pub fn remove_from_watchlist(&mut self, movie_id: MovieId) {
        self.watchlist.retain(|&queued| queued != movie_id);
    }

    pub(crate) fn add_review(&mut self, review: Arc<Review>) {
        self.reviews.push(review);
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.user_name == other.user_name
    }
}

impl Eq for User {}

impl PartialOrd for User {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for User {
    fn cmp(&self, other: &Self) -> Ordering {
        self.user_name.cmp(&other.user_name)
    }
}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.user_name.hash(state);
    }
}

// =============================================================================
// Review
// =============================================================================

/// A user's review of a movie. Immutable once constructed; the same record
/// is shared (via `Arc`) between the movie's review list, the user's review
/// list and the repository's flat list.
#[derive(Debug, Clone)]
pub struct Review {
    user_name: String,
    movie_id: MovieId,
    review_text: String,
    timestamp: DateTime<Utc>,
}

impl Review {
    pub fn new(user_name: &str, movie_id: MovieId, review_text: &str) -> Self {
        Self {
            user_name: user_name.trim().to_lowercase(),
            movie_id,
            review_text: review_text.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl PartialEq for Review {
    fn eq(&self, other: &Self) -> bool {
        self.movie_id == other.movie_id
            && self.review_text == other.review_text
            && self.timestamp == other.timestamp
    }
}

impl Eq for Review {}
