//! The in-memory movie repository.
//!
//! `MemoryRepository` is the single store behind the catalogue. It keeps:
//! - a rank sequence `Vec<MovieId>` that is sorted by the movie ordering
//!   `(title, release_year)` at all times; insertion binary-searches the
//!   position instead of re-sorting;
//! - an id map `HashMap<MovieId, Movie>` owning the movies, for O(1) lookup;
//! - registered master copies of every distinct `Actor`/`Director`/`Genre`
//!   seen so far, each carrying the ids of the movies tagging it;
//! - the users and a flat list of all reviews.
//!
//! Ids are dense: the N-th inserted movie gets id N (unless the movie
//! arrived with one), so "previous/next movie" is plain id arithmetic.
//!
//! The repository is synchronous and unsynchronized. Callers that share it
//! across threads wrap the whole value in a single `Arc<RwLock<_>>`:
//! `add_movie` touches the rank sequence, the id map and three tag tables,
//! so mutations need the write half to stay atomic.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CatalogueError, Result};
use crate::types::{Actor, Director, Genre, Movie, MovieId, Review, User};

#[derive(Debug, Default)]
pub struct MemoryRepository {
    /// Movie ids ordered by the movie ordering relation.
    movie_order: Vec<MovieId>,
    /// Id → movie. Owns the movies.
    movies: HashMap<MovieId, Movie>,

    // Registered tag entities, each distinct value at most once.
    actors: Vec<Actor>,
    directors: Vec<Director>,
    genres: Vec<Genre>,

    users: Vec<User>,
    reviews: Vec<Arc<Review>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Movies
    // -------------------------------------------------------------------------

    /// Insert a movie.
    ///
    /// A movie without an id is assigned the next rank (current count + 1).
    /// The id goes into the rank sequence at its binary-searched position,
    /// before any equal-ranking entries, and the movie's genres, director
    /// and actors are registered (by value equality, never identity) with
    /// the new id appended to each one's tagged-movie list. Actors sharing
    /// the movie become mutual colleagues.
    pub fn add_movie(&mut self, mut movie: Movie) {
        let id = match movie.id() {
            Some(id) => id,
            None => {
                let next = self.movie_order.len() as MovieId + 1;
                movie.assign_id(next);
                next
            }
        };

        let position = self.insertion_point(&movie);
        self.movie_order.insert(position, id);

        for genre in movie.genres() {
            match self.genres.iter_mut().find(|known| known.name() == genre.name()) {
                Some(known) => known.tag_movie(id),
                None => {
                    let mut registered = genre.clone();
                    registered.tag_movie(id);
                    self.genres.push(registered);
                }
            }
        }

        if let Some(director) = movie.director() {
            match self
                .directors
                .iter_mut()
                .find(|known| known.name() == director.name())
            {
                Some(known) => known.tag_movie(id),
                None => {
                    let mut registered = director.clone();
                    registered.tag_movie(id);
                    self.directors.push(registered);
                }
            }
        }

        for actor in movie.actors() {
            match self.actors.iter_mut().find(|known| known.name() == actor.name()) {
                Some(known) => known.tag_movie(id),
                None => {
                    let mut registered = actor.clone();
                    registered.tag_movie(id);
                    self.actors.push(registered);
                }
            }
        }

        // Co-appearance: every actor of this movie is a colleague of every
        // other one, recorded on the registered master copies.
        let cast: Vec<String> = movie
            .actors()
            .iter()
            .map(|actor| actor.name().to_string())
            .collect();
        for name in &cast {
            if let Some(known) = self
                .actors
                .iter_mut()
                .find(|known| known.name() == name.as_str())
            {
                for colleague in &cast {
                    known.record_colleague(colleague);
                }
            }
        }

        self.movies.insert(id, movie);
    }

    /// O(1) lookup by id. Absence is `None`, never an error.
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn get_number_of_movies(&self) -> usize {
        self.movie_order.len()
    }

    /// Movies in rank-sequence (sorted) order.
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movie_order.iter().filter_map(|id| self.movies.get(id))
    }

    /// All movies released in exactly the given year, in sorted order.
    pub fn get_movies_by_release_year(&self, year: u16) -> Vec<&Movie> {
        self.movies()
            .filter(|movie| movie.release_year() == Some(year))
            .collect()
    }

    /// The movie with id 1, or `None` when the repository is empty.
    pub fn get_first_movie(&self) -> Option<&Movie> {
        self.movies.get(&1)
    }

    /// The movie with id N (the current count), or `None` when empty.
    pub fn get_last_movie(&self) -> Option<&Movie> {
        self.movies.get(&(self.movie_order.len() as MovieId))
    }

    /// Resolve a list of ids to movies, silently dropping unknown ids and
    /// preserving the order of the input list.
    pub fn get_movies_by_id(&self, ids: &[MovieId]) -> Vec<&Movie> {
        ids.iter().filter_map(|id| self.movies.get(id)).collect()
    }

    /// Id of the movie ranked immediately before, by id arithmetic.
    pub fn get_id_of_previous_movie(&self, movie: &Movie) -> Option<MovieId> {
        match movie.id() {
            Some(id) if id > 1 => Some(id - 1),
            _ => None,
        }
    }

    /// Id of the movie ranked immediately after, by id arithmetic.
    pub fn get_id_of_next_movie(&self, movie: &Movie) -> Option<MovieId> {
        let count = self.movie_order.len() as MovieId;
        match movie.id() {
            Some(id) if id != count => Some(id + 1),
            _ => None,
        }
    }

    /// Position of an equal movie in the rank sequence.
    ///
    /// Binary-searches the leftmost candidate position and then requires the
    /// occupant to equal the query on both title and release year; anything
    /// else is a contract violation reported as `MovieNotFound`.
    pub fn movie_index(&self, movie: &Movie) -> Result<usize> {
        let position = self.insertion_point(movie);
        match self
            .movie_order
            .get(position)
            .and_then(|id| self.movies.get(id))
        {
            Some(found) if found == movie => Ok(position),
            _ => Err(CatalogueError::MovieNotFound {
                title: movie.title().to_string(),
                release_year: movie.release_year(),
            }),
        }
    }

    /// First position in the rank sequence whose movie does not order before
    /// the given one (insertion before equals, like `bisect_left`).
    fn insertion_point(&self, movie: &Movie) -> usize {
        self.movie_order
            .partition_point(|id| self.movies.get(id).is_some_and(|known| known < movie))
    }

    // -------------------------------------------------------------------------
    // Tag entities
    // -------------------------------------------------------------------------

    /// Ids of all movies a given actor appears in; empty when the name is
    /// not registered.
    pub fn get_movie_ids_for_actor(&self, actor_name: &str) -> Vec<MovieId> {
        self.actors
            .iter()
            .find(|actor| actor.name() == actor_name)
            .map(|actor| actor.tagged_movies().to_vec())
            .unwrap_or_default()
    }

    /// Ids of all movies a given director directed; empty when unknown.
    pub fn get_movie_ids_for_director(&self, director_name: &str) -> Vec<MovieId> {
        self.directors
            .iter()
            .find(|director| director.name() == director_name)
            .map(|director| director.tagged_movies().to_vec())
            .unwrap_or_default()
    }

    /// Ids of all movies carrying a given genre; empty when unknown.
    pub fn get_movie_ids_for_genre(&self, genre_name: &str) -> Vec<MovieId> {
        self.genres
            .iter()
            .find(|genre| genre.name() == genre_name)
            .map(|genre| genre.tagged_movies().to_vec())
            .unwrap_or_default()
    }

    pub fn get_actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn get_directors(&self) -> &[Director] {
        &self.directors
    }

    pub fn get_genres(&self) -> &[Genre] {
        &self.genres
    }

    // -------------------------------------------------------------------------
    // Users and reviews
    // -------------------------------------------------------------------------

    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Look a user up by normalized user name. Absence is `None`.
    pub fn get_user(&self, user_name: &str) -> Option<&User> {
        self.users.iter().find(|user| user.user_name() == user_name)
    }

    /// Mutable access to a user, for watchlist and watch-history updates.
    pub fn get_user_mut(&mut self, user_name: &str) -> Option<&mut User> {
        self.users
            .iter_mut()
            .find(|user| user.user_name() == user_name)
    }

    /// Record a review.
    ///
    /// The review is attached to the reviewed movie's list and the reviewing
    /// user's list (when they exist) and retained in the flat review list;
    /// all three share the same record. The returned handle is that shared
    /// record.
    pub fn add_review(&mut self, review: Review) -> Arc<Review> {
        let review = Arc::new(review);
        if let Some(movie) = self.movies.get_mut(&review.movie_id()) {
            movie.add_review(Arc::clone(&review));
        }
        if let Some(user) = self
            .users
            .iter_mut()
            .find(|user| user.user_name() == review.user_name())
        {
            user.add_review(Arc::clone(&review));
        }
        self.reviews.push(Arc::clone(&review));
        review
    }

    pub fn get_reviews(&self) -> &[Arc<Review>] {
        &self.reviews
    }
}
