//! Integration tests for the service layer.
//!
//! Every test runs against a small in-memory repository built the same way
//! the loader would build it: six movies, two registered users, and two
//! pre-existing reviews on the first movie.

use catalogue::{Actor, Director, Genre, MemoryRepository, Movie, Review, User};
use showcase::services;
use showcase::{resolve, search_exists, SearchCategory, ServiceError};

fn movie(
    title: &str,
    year: u16,
    genres: &[&str],
    description: &str,
    director: &str,
    actors: &[&str],
    runtime: u32,
) -> Movie {
    let mut movie = Movie::new(title, Some(year));
    movie.set_description(description);
    movie.set_director(Director::new(director));
    for genre in genres {
        movie.add_genre(Genre::new(genre));
    }
    for actor in actors {
        movie.add_actor(Actor::new(actor));
    }
    movie.set_runtime_minutes(runtime);
    movie
}

fn in_memory_repo() -> MemoryRepository {
    let mut repo = MemoryRepository::new();

    repo.add_movie(movie(
        "Prometheus",
        2012,
        &["Adventure", "Mystery", "Sci-Fi"],
        "A team finds a structure on a distant moon.",
        "Ridley Scott",
        &["Noomi Rapace", "Michael Fassbender"],
        124,
    ));
    repo.add_movie(movie(
        "Guardians of the Galaxy",
        2014,
        &["Action", "Adventure", "Sci-Fi"],
        "A group of intergalactic criminals are forced to work together \
         to stop a fanatical warrior from taking control of the universe.",
        "James Gunn",
        &["Chris Pratt", "Vin Diesel", "Bradley Cooper", "Zoe Saldana"],
        121,
    ));
    repo.add_movie(movie(
        "Split",
        2016,
        &["Horror", "Thriller"],
        "Three girls are kidnapped by a man with 23 distinct personalities.",
        "M. Night Shyamalan",
        &["James McAvoy", "Anya Taylor-Joy"],
        117,
    ));
    repo.add_movie(movie(
        "Sing",
        2016,
        &["Animation", "Comedy", "Family"],
        "A hustling theater impresario stages a singing competition.",
        "Christophe Lourdelet",
        &["Matthew McConaughey", "Reese Witherspoon"],
        108,
    ));
    repo.add_movie(movie(
        "Suicide Squad",
        2016,
        &["Action", "Adventure", "Fantasy"],
        "A secret agency recruits incarcerated super-villains.",
        "David Ayer",
        &["Will Smith", "Margot Robbie"],
        123,
    ));
    repo.add_movie(movie(
        "The Great Wall",
        2016,
        &["Action", "Adventure", "Fantasy"],
        "Mercenaries defend the Great Wall against monstrous creatures.",
        "Yimou Zhang",
        &["Matt Damon", "Tian Jing"],
        103,
    ));

    repo.add_user(User::new("thorke", "cLQ^C#oFXloS"));
    repo.add_user(User::new("fmercury", "mvNNbc1eLA$i"));

    repo.add_review(Review::new("thorke", 1, "Gorgeous and unsettling."));
    repo.add_review(Review::new("fmercury", 1, "Asks more than it answers."));

    repo
}

// -----------------------------------------------------------------------------
// Reviews
// -----------------------------------------------------------------------------

#[test]
fn can_add_review() {
    let mut repo = in_memory_repo();
    let review_text = "The loonies are stripping the supermarkets bare!";

    services::add_review(3, review_text, "fmercury", &mut repo).unwrap();

    let reviews = services::get_reviews_for_movie(3, &repo).unwrap();
    assert!(reviews.iter().any(|r| r.review_text == review_text));
    assert!(reviews.iter().all(|r| r.movie_id == 3));
}

#[test]
fn cannot_add_review_for_non_existent_movie() {
    let mut repo = in_memory_repo();

    let result = services::add_review(7, "COVID-19 - what's that?", "fmercury", &mut repo);
    assert_eq!(result, Err(ServiceError::NonExistentMovie(7)));
    assert_eq!(repo.get_reviews().len(), 2);
}

#[test]
fn cannot_add_review_by_unknown_user() {
    let mut repo = in_memory_repo();

    let result = services::add_review(3, "Stripping the supermarkets bare!", "gmichael", &mut repo);
    assert_eq!(
        result,
        Err(ServiceError::UnknownUser("gmichael".to_string()))
    );
    assert_eq!(repo.get_reviews().len(), 2);
}

#[test]
fn reviewer_names_are_normalized_before_lookup() {
    let mut repo = in_memory_repo();

    services::add_review(2, "Best soundtrack in years.", "  FMercury ", &mut repo).unwrap();

    let reviews = services::get_reviews_for_movie(2, &repo).unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].user_name, "fmercury");
}

#[test]
fn get_reviews_for_movie_returns_all_of_them() {
    let repo = in_memory_repo();

    let reviews = services::get_reviews_for_movie(1, &repo).unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|r| r.movie_id == 1));
}

#[test]
fn a_movie_without_reviews_yields_an_empty_list() {
    let repo = in_memory_repo();
    assert!(services::get_reviews_for_movie(2, &repo).unwrap().is_empty());
}

#[test]
fn reviews_for_a_non_existent_movie_are_an_error() {
    let repo = in_memory_repo();
    assert_eq!(
        services::get_reviews_for_movie(7, &repo),
        Err(ServiceError::NonExistentMovie(7))
    );
}

// -----------------------------------------------------------------------------
// Movie queries
// -----------------------------------------------------------------------------

#[test]
fn can_get_movie() {
    let repo = in_memory_repo();

    let dto = services::get_movie(2, &repo).unwrap();
    assert_eq!(dto.id, Some(2));
    assert_eq!(dto.title, "Guardians of the Galaxy");
    assert_eq!(dto.release_year, Some(2014));
    assert_eq!(
        dto.description.as_deref(),
        Some(
            "A group of intergalactic criminals are forced to work together \
             to stop a fanatical warrior from taking control of the universe."
        )
    );
    assert_eq!(dto.director.as_deref(), Some("James Gunn"));
    assert_eq!(
        dto.actors,
        vec!["Chris Pratt", "Vin Diesel", "Bradley Cooper", "Zoe Saldana"]
    );
    assert_eq!(dto.genres, vec!["Action", "Adventure", "Sci-Fi"]);
    assert_eq!(dto.runtime_minutes, Some(121));
    assert!(dto.reviews.is_empty());
}

#[test]
fn cannot_get_movie_with_non_existent_id() {
    let repo = in_memory_repo();
    assert_eq!(
        services::get_movie(7, &repo),
        Err(ServiceError::NonExistentMovie(7))
    );
}

#[test]
fn first_and_last_follow_insertion_rank() {
    let repo = in_memory_repo();

    assert_eq!(services::get_first_movie(&repo).unwrap().id, Some(1));
    assert_eq!(services::get_last_movie(&repo).unwrap().id, Some(6));

    let empty = MemoryRepository::new();
    assert!(services::get_first_movie(&empty).is_none());
    assert!(services::get_last_movie(&empty).is_none());
}

#[test]
fn rank_navigation_reports_neighbouring_ids() {
    let repo = in_memory_repo();

    let (movies, prev, next) = services::get_movies_by_rank(1, &repo);
    assert_eq!(movies.len(), 1);
    assert_eq!(prev, None);
    assert_eq!(next, Some(2));

    let (movies, prev, next) = services::get_movies_by_rank(3, &repo);
    assert_eq!(movies[0].id, Some(3));
    assert_eq!(prev, Some(2));
    assert_eq!(next, Some(4));

    let (movies, prev, next) = services::get_movies_by_rank(6, &repo);
    assert_eq!(movies.len(), 1);
    assert_eq!(prev, Some(5));
    assert_eq!(next, None);
}

#[test]
fn rank_navigation_for_an_unknown_rank_is_empty() {
    let repo = in_memory_repo();

    let (movies, prev, next) = services::get_movies_by_rank(7, &repo);
    assert!(movies.is_empty());
    assert_eq!(prev, None);
    assert_eq!(next, None);
}

#[test]
fn get_movies_by_id_filters_unknown_ids() {
    let repo = in_memory_repo();

    let movies = services::get_movies_by_id(&[5, 6, 7, 8], &repo);
    let ids: Vec<_> = movies.iter().map(|m| m.id.unwrap()).collect();
    assert_eq!(ids, vec![5, 6]);
}

#[test]
fn movies_by_release_year_match_exactly() {
    let repo = in_memory_repo();

    let hits = services::get_movies_by_release_year(2016, &repo);
    let titles: Vec<_> = hits.iter().map(|m| m.title.as_str()).collect();
    // Sorted order, not rank order.
    assert_eq!(titles, vec!["Sing", "Split", "Suicide Squad", "The Great Wall"]);

    assert!(services::get_movies_by_release_year(1999, &repo).is_empty());
}

#[test]
fn tagged_id_lookups_delegate_to_the_repository() {
    let repo = in_memory_repo();

    assert_eq!(services::get_movie_ids_for_genre("Action", &repo), vec![2, 5, 6]);
    assert_eq!(
        services::get_movie_ids_for_director("James Gunn", &repo),
        vec![2]
    );
    assert_eq!(
        services::get_movie_ids_for_actor("Chris Pratt", &repo),
        vec![2]
    );
    assert!(services::get_movie_ids_for_genre("Western", &repo).is_empty());
}

// -----------------------------------------------------------------------------
// Paginated browsing
// -----------------------------------------------------------------------------

#[test]
fn browsing_a_genre_pages_through_its_movies() {
    let repo = in_memory_repo();

    let (page, cursors) = services::browse_by_genre("Action", 0, 2, &repo);
    let ids: Vec<_> = page.iter().map(|m| m.id.unwrap()).collect();
    assert_eq!(ids, vec![2, 5]);
    assert_eq!(cursors.prev, None);
    assert_eq!(cursors.next, Some(2));
    assert_eq!(cursors.last, Some(2));

    let (page, cursors) = services::browse_by_genre("Action", 2, 2, &repo);
    let ids: Vec<_> = page.iter().map(|m| m.id.unwrap()).collect();
    assert_eq!(ids, vec![6]);
    assert_eq!(cursors.first, Some(0));
    assert_eq!(cursors.prev, Some(0));
    assert_eq!(cursors.next, None);
}

#[test]
fn browsing_an_unknown_tag_is_empty() {
    let repo = in_memory_repo();

    let (page, cursors) = services::browse_by_actor("Nobody", 0, 3, &repo);
    assert!(page.is_empty());
    assert_eq!(cursors, services::PageCursors::default());

    let (page, _) = services::browse_by_director("Yimou Zhang", 10, 3, &repo);
    assert!(page.is_empty(), "cursor past the end yields an empty page");
}

// -----------------------------------------------------------------------------
// Watchlists
// -----------------------------------------------------------------------------

#[test]
fn watchlist_round_trip() {
    let mut repo = in_memory_repo();

    services::add_to_watchlist("thorke", 3, &mut repo).unwrap();
    services::add_to_watchlist("thorke", 5, &mut repo).unwrap();
    services::add_to_watchlist("thorke", 3, &mut repo).unwrap(); // duplicate

    let watchlist = services::get_watchlist("thorke", &repo).unwrap();
    let ids: Vec<_> = watchlist.iter().map(|m| m.id.unwrap()).collect();
    assert_eq!(ids, vec![3, 5]);

    services::remove_from_watchlist("thorke", 3, &mut repo).unwrap();
    let watchlist = services::get_watchlist("thorke", &repo).unwrap();
    assert_eq!(watchlist.len(), 1);
    assert_eq!(watchlist[0].title, "Suicide Squad");
}

#[test]
fn watchlist_operations_validate_their_inputs() {
    let mut repo = in_memory_repo();

    assert_eq!(
        services::add_to_watchlist("thorke", 7, &mut repo),
        Err(ServiceError::NonExistentMovie(7))
    );
    assert_eq!(
        services::add_to_watchlist("gmichael", 3, &mut repo),
        Err(ServiceError::UnknownUser("gmichael".to_string()))
    );
    assert_eq!(
        services::get_watchlist("gmichael", &repo),
        Err(ServiceError::UnknownUser("gmichael".to_string()))
    );
}

// -----------------------------------------------------------------------------
// Search
// -----------------------------------------------------------------------------

#[test]
fn search_resolves_registered_names_case_insensitively() {
    let repo = in_memory_repo();

    assert!(search_exists("james gunn", SearchCategory::Director, &repo));
    assert!(search_exists("chris pratt", SearchCategory::Actor, &repo));
    assert_eq!(
        resolve("sci-fi", SearchCategory::Genre, &repo),
        Some("Sci-Fi".to_string())
    );
}

#[test]
fn search_misses_yield_nothing() {
    let repo = in_memory_repo();

    assert!(!search_exists("james gunn", SearchCategory::Actor, &repo));
    assert!(!search_exists("stanley kubrick", SearchCategory::Director, &repo));
    assert_eq!(resolve("western", SearchCategory::Genre, &repo), None);
}
