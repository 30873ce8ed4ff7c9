//! # Catalogue Crate
//!
//! In-memory movie catalogue: the entity model, the repository that indexes
//! it, and the loader that populates it from the movie data file.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Actor, Director, Genre, User, Review)
//! - **repository**: `MemoryRepository` with its sorted rank sequence,
//!   O(1) id lookup and tag reverse-lookup tables
//! - **loader**: Parse the CSV data file and populate a repository
//! - **error**: Error types for loading and repository queries
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalogue::{MemoryRepository, populate};
//! use std::path::Path;
//!
//! let mut repo = MemoryRepository::new();
//! populate(Path::new("data"), &mut repo)?;
//!
//! let movie = repo.get_movie(2).unwrap();
//! let action = repo.get_movie_ids_for_genre("Action");
//! println!("{} is one of {} movies", movie, repo.get_number_of_movies());
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod repository;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogueError, Result};
pub use loader::{load_movies, populate};
pub use repository::MemoryRepository;
pub use types::{Actor, Director, Genre, Movie, MovieId, Review, User};
