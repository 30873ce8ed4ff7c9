//! Loader for the movie data file.
//!
//! The data file is a CSV with a header row and fixed column positions:
//!
//! ```text
//! Rank,Title,Genre,Description,Director,Actors,Year,Runtime (Minutes),...
//! ```
//!
//! `Genre` and `Actors` are comma-separated lists inside a single (quoted)
//! field. The rank column is ignored; the repository assigns its own ids.
//! Rows are parsed into plain records in parallel, then inserted
//! sequentially so id assignment stays deterministic.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::info;

use crate::error::{CatalogueError, Result};
use crate::repository::MemoryRepository;
use crate::types::{Actor, Director, Genre, Movie};

/// Canonical file name of the movie data set inside a data directory.
pub const MOVIE_DATA_FILE: &str = "Data1000Movies.csv";

/// One parsed row of the data file, before entity construction.
#[derive(Debug)]
struct MovieRow {
    title: String,
    genres: Vec<String>,
    description: String,
    director: String,
    actors: Vec<String>,
    release_year: Option<u16>,
    runtime_minutes: Option<u32>,
}

/// Load movies from a CSV file into the repository. Returns the number of
/// movies inserted.
pub fn load_movies(path: &Path, repo: &mut MemoryRepository) -> Result<usize> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let content = fs::read_to_string(path)?;
    // The file may start with a UTF-8 byte-order mark.
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    // The header is line 1, so data rows start at line 2.
    let rows = records
        .par_iter()
        .enumerate()
        .map(|(index, record)| parse_row(&file_name, index + 2, record))
        .collect::<Result<Vec<MovieRow>>>()?;

    let count = rows.len();
    for row in rows {
        repo.add_movie(build_movie(row));
    }

    info!("loaded {count} movies from {}", path.display());
    Ok(count)
}

/// Populate a repository from the canonical data file in `data_path`.
pub fn populate(data_path: &Path, repo: &mut MemoryRepository) -> Result<usize> {
    load_movies(&data_path.join(MOVIE_DATA_FILE), repo)
}

fn parse_row(file: &str, line: usize, record: &csv::StringRecord) -> Result<MovieRow> {
    let title = required(record, 1, "title", file, line)?;
    let genres = split_list(required(record, 2, "genre list", file, line)?);
    let description = required(record, 3, "description", file, line)?.to_string();
    let director = required(record, 4, "director", file, line)?.to_string();
    let actors = split_list(required(record, 5, "actor list", file, line)?);

    let year_field = required(record, 6, "release year", file, line)?;
    let release_year = if year_field.is_empty() {
        None
    } else {
        Some(year_field.parse::<u16>().map_err(|err| {
            CatalogueError::ParseError {
                file: file.to_string(),
                line,
                reason: format!("invalid release year {year_field:?}: {err}"),
            }
        })?)
    };

    // The runtime column is optional; some exports stop after the year.
    let runtime_minutes = match record.get(7) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<u32>().map_err(|err| {
            CatalogueError::ParseError {
                file: file.to_string(),
                line,
                reason: format!("invalid runtime {raw:?}: {err}"),
            }
        })?),
    };

    Ok(MovieRow {
        title: title.to_string(),
        genres,
        description,
        director,
        actors,
        release_year,
        runtime_minutes,
    })
}

fn required<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    what: &str,
    file: &str,
    line: usize,
) -> Result<&'r str> {
    record.get(index).ok_or_else(|| CatalogueError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("missing {what} column"),
    })
}

/// Split a comma-separated multi-value field, trimming each item and
/// dropping empties.
fn split_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_movie(row: MovieRow) -> Movie {
    let mut movie = Movie::new(&row.title, row.release_year);
    movie.set_description(&row.description);

    for genre in &row.genres {
        movie.add_genre(Genre::new(genre));
    }
    if !row.director.is_empty() {
        movie.set_director(Director::new(&row.director));
    }
    for actor in &row.actors {
        movie.add_actor(Actor::new(actor));
    }
    if let Some(minutes) = row.runtime_minutes {
        movie.set_runtime_minutes(minutes);
    }

    movie
}
