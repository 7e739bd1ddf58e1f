//! Demo data seeding.
//!
//! On startup the service can reset the store to a fixed list of titles so
//! a fresh deployment has something to serve.

use fluxflix_db::{DbError, MovieStore};
use fluxflix_types::{Movie, NewMovie};
use tracing::info;

/// Titles inserted by [`seed_demo_data`] at startup.
pub const DEMO_TITLES: [&str; 7] = [
    "The Silence of Lambdas",
    "Back to the Future",
    "Fluxxers",
    "Flux Holmes",
    "The Fluxxinator",
    "Fluxxies League",
    "Fluxxerine",
];

/// Clear the store, insert one movie per title, and return the resulting
/// catalog.
///
/// Titles are inserted in order. Every stored movie is logged.
///
/// # Errors
///
/// Returns [`DbError::Validation`] if a title is blank (checked before the
/// store is touched), or any error from the store.
pub async fn seed_demo_data<S: MovieStore>(
    store: &S,
    titles: &[&str],
) -> Result<Vec<Movie>, DbError> {
    let movies = titles
        .iter()
        .copied()
        .map(NewMovie::new)
        .collect::<Result<Vec<_>, _>>()?;

    store.delete_all().await?;
    for movie in movies {
        store.create(movie).await?;
    }

    let seeded = store.find_all().await?;
    for movie in &seeded {
        info!(movie_id = %movie.id, title = %movie.title, "Seeded movie");
    }
    info!(count = seeded.len(), "Demo data seeded");
    Ok(seeded)
}
