//! # Showcase Crate
//!
//! Application services over the movie catalogue. The web or CLI front end
//! talks to these functions, never to the repository directly.
//!
//! ## Components
//!
//! - **services**: browsing by rank and by tagged entity (with cursor
//!   pagination), review submission, watchlists, and DTO conversion
//! - **search**: resolving a free-text query to a registered
//!   actor/director/genre name

// Public modules
pub mod search;
pub mod services;

// Re-export commonly used types
pub use search::{resolve, search_exists, SearchCategory};
pub use services::{MovieDto, PageCursors, ReviewDto, ServiceError};
