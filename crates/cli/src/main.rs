use anyhow::{Context, Result};
use catalogue::{populate, MemoryRepository, MovieId};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use showcase::services;
use showcase::{resolve, MovieDto, PageCursors, SearchCategory};
use std::path::PathBuf;
use std::time::Instant;

/// Cinelog - movie catalogue browser
#[derive(Parser)]
#[command(name = "cinelog")]
#[command(about = "Browse a movie catalogue from the command line", long_about = None)]
struct Cli {
    /// Path to the directory holding the movie data file
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Print results as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the movie at a rank, with previous/next navigation
    Rank {
        /// Rank to show; defaults to the first movie
        #[arg(long)]
        id: Option<MovieId>,
    },

    /// List the movies a given actor appears in
    Actor {
        /// Actor name, exactly as catalogued
        #[arg(long)]
        name: String,

        /// Offset into the listing
        #[arg(long, default_value = "0")]
        cursor: usize,

        /// Movies per page
        #[arg(long, default_value = "3")]
        per_page: usize,
    },

    /// List the movies a given director directed
    Director {
        /// Director name, exactly as catalogued
        #[arg(long)]
        name: String,

        /// Offset into the listing
        #[arg(long, default_value = "0")]
        cursor: usize,

        /// Movies per page
        #[arg(long, default_value = "3")]
        per_page: usize,
    },

    /// List the movies carrying a given genre
    Genre {
        /// Genre name, e.g. "Action"
        #[arg(long)]
        name: String,

        /// Offset into the listing
        #[arg(long, default_value = "0")]
        cursor: usize,

        /// Movies per page
        #[arg(long, default_value = "3")]
        per_page: usize,
    },

    /// List movies released in an exact year
    Year {
        #[arg(long)]
        year: u16,
    },

    /// Look a name up among the catalogue's actors, directors and genres
    Search {
        /// Query text (title-cased before matching)
        #[arg(long)]
        query: String,

        /// Category to search in
        #[arg(long, value_enum)]
        by: SearchBy,
    },

    /// Show catalogue counts
    Stats,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum SearchBy {
    Actor,
    Director,
    Genre,
}

impl From<SearchBy> for SearchCategory {
    fn from(by: SearchBy) -> Self {
        match by {
            SearchBy::Actor => SearchCategory::Actor,
            SearchBy::Director => SearchCategory::Director,
            SearchBy::Genre => SearchCategory::Genre,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalogue (this may take a moment)
    println!("Loading movie catalogue from {}...", cli.data_dir.display());
    let start = Instant::now();
    let mut repo = MemoryRepository::new();
    let count = populate(&cli.data_dir, &mut repo).with_context(|| {
        format!(
            "Failed to load catalogue data from {}",
            cli.data_dir.display()
        )
    })?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        count,
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Rank { id } => handle_rank(&repo, id, cli.json)?,
        Commands::Actor {
            name,
            cursor,
            per_page,
        } => {
            let (page, cursors) = services::browse_by_actor(&name, cursor, per_page, &repo);
            print_listing(&format!("Movies featuring {name}"), &page, cursors, cli.json)?;
        }
        Commands::Director {
            name,
            cursor,
            per_page,
        } => {
            let (page, cursors) = services::browse_by_director(&name, cursor, per_page, &repo);
            print_listing(&format!("Movies directed by {name}"), &page, cursors, cli.json)?;
        }
        Commands::Genre {
            name,
            cursor,
            per_page,
        } => {
            let (page, cursors) = services::browse_by_genre(&name, cursor, per_page, &repo);
            print_listing(&format!("{name} movies"), &page, cursors, cli.json)?;
        }
        Commands::Year { year } => handle_year(&repo, year, cli.json)?,
        Commands::Search { query, by } => handle_search(&repo, &query, by)?,
        Commands::Stats => handle_stats(&repo, cli.json)?,
    }

    Ok(())
}

/// Handle the 'rank' command
fn handle_rank(repo: &MemoryRepository, id: Option<MovieId>, json: bool) -> Result<()> {
    let target = match id {
        Some(id) => id,
        None => services::get_first_movie(repo)
            .and_then(|movie| movie.id)
            .context("The catalogue is empty")?,
    };

    let (movies, previous_id, next_id) = services::get_movies_by_rank(target, repo);
    if movies.is_empty() {
        println!("No movie ranked #{target}.");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
        return Ok(());
    }

    for movie in &movies {
        print_movie(movie);
    }

    let previous = previous_id
        .map(|id| format!("previous: #{id}"))
        .unwrap_or_else(|| "at the first rank".to_string());
    let next = next_id
        .map(|id| format!("next: #{id}"))
        .unwrap_or_else(|| "at the last rank".to_string());
    println!("{}", format!("{previous} | {next}").dimmed());

    Ok(())
}

/// Handle the 'year' command
fn handle_year(repo: &MemoryRepository, year: u16, json: bool) -> Result<()> {
    let movies = services::get_movies_by_release_year(year, repo);

    if json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("{} movies released in {year}:", movies.len())
            .bold()
            .blue()
    );
    for movie in &movies {
        print_movie_line(movie);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(repo: &MemoryRepository, query: &str, by: SearchBy) -> Result<()> {
    match resolve(query, by.into(), repo) {
        Some(name) => {
            let ids = match by {
                SearchBy::Actor => services::get_movie_ids_for_actor(&name, repo),
                SearchBy::Director => services::get_movie_ids_for_director(&name, repo),
                SearchBy::Genre => services::get_movie_ids_for_genre(&name, repo),
            };
            println!(
                "{} {} is in the catalogue with {} tagged movie(s)",
                "✓".green(),
                name.bold(),
                ids.len()
            );
            for movie in services::get_movies_by_id(&ids, repo) {
                print_movie_line(&movie);
            }
        }
        None => println!("Sorry, result not found!"),
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(repo: &MemoryRepository, json: bool) -> Result<()> {
    if json {
        let stats = serde_json::json!({
            "movies": repo.get_number_of_movies(),
            "actors": repo.get_actors().len(),
            "directors": repo.get_directors().len(),
            "genres": repo.get_genres().len(),
            "reviews": repo.get_reviews().len(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Catalogue contents:".bold().blue());
    println!("{}Movies: {}", "• ".green(), repo.get_number_of_movies());
    println!("{}Actors: {}", "• ".green(), repo.get_actors().len());
    println!("{}Directors: {}", "• ".green(), repo.get_directors().len());
    println!("{}Genres: {}", "• ".green(), repo.get_genres().len());
    println!("{}Reviews: {}", "• ".green(), repo.get_reviews().len());
    Ok(())
}

/// Print one page of a tag listing with its navigation cursors.
fn print_listing(title: &str, page: &[MovieDto], cursors: PageCursors, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    println!("{}", title.bold().blue());
    if page.is_empty() {
        println!("  (nothing here)");
        return Ok(());
    }
    for movie in page {
        print_movie_line(movie);
    }

    let mut navigation = Vec::new();
    if let Some(cursor) = cursors.prev {
        navigation.push(format!("previous page: --cursor {cursor}"));
    }
    if let Some(cursor) = cursors.next {
        navigation.push(format!("next page: --cursor {cursor}"));
    }
    if let Some(cursor) = cursors.last {
        navigation.push(format!("last page: --cursor {cursor}"));
    }
    if !navigation.is_empty() {
        println!("{}", navigation.join(" | ").dimmed());
    }
    Ok(())
}

/// One-line summary: rank, title, year, genres.
fn print_movie_line(movie: &MovieDto) {
    let rank = movie
        .id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "#?".to_string());
    let year = movie
        .release_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "????".to_string());
    println!(
        "  {} {} ({}) [{}]",
        rank.green(),
        movie.title,
        year,
        movie.genres.join(", ")
    );
}

/// Full movie card with credits, runtime, description and reviews.
fn print_movie(movie: &MovieDto) {
    let year = movie
        .release_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "????".to_string());
    let rank = movie
        .id
        .map(|id| format!("#{id} "))
        .unwrap_or_default();
    println!("{}", format!("{rank}{} ({year})", movie.title).bold().blue());

    println!("  Genres: {}", movie.genres.join(", "));
    if let Some(director) = &movie.director {
        println!("  Director: {director}");
    }
    if !movie.actors.is_empty() {
        println!("  Starring: {}", movie.actors.join(", "));
    }
    if let Some(runtime) = movie.runtime_minutes {
        println!("  Runtime: {runtime} min");
    }
    if let Some(description) = &movie.description {
        println!("  {description}");
    }
    if movie.reviews.is_empty() {
        println!("  No reviews yet.");
    } else {
        println!("  Reviews:");
        for review in &movie.reviews {
            println!(
                "    {} {}: {}",
                review.timestamp.format("%Y-%m-%d").to_string().dimmed(),
                review.user_name,
                review.review_text
            );
        }
    }
}
