use crate::render::{Container, clear, mount, render_all, render_card};
use charcards_fetch::{CharacterRecord, CharacterSource, FetchError};
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Callback for reporting progress messages
pub type GalleryProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("The character collection is empty")]
    EmptyCollection,
}

fn report(progress: &Option<GalleryProgressCallback>, msg: String) {
    if let Some(callback) = progress {
        callback(msg);
    }
}

/// Fetch the full listing and draw one card per record into `container`.
/// Returns the records that were drawn.
pub async fn load_grid<S: CharacterSource>(
    source: &S,
    container: &mut Container,
    progress: Option<GalleryProgressCallback>,
) -> Result<Vec<CharacterRecord>, GalleryError> {
    report(&progress, "Fetching characters...".to_string());
    let records = source.fetch_all().await?;

    render_all(container, &records);
    debug!("Rendered {} cards", container.len());
    report(&progress, format!("Rendered {} characters", records.len()));

    Ok(records)
}

/// Uniform index in `[0, count)`, or None for an empty collection.
pub fn random_index<R: Rng>(count: u64, rng: &mut R) -> Option<u64> {
    if count == 0 {
        return None;
    }
    Some(rng.random_range(0..count))
}

/// Replace the content of `container` with a single random character.
///
/// The container is only touched once both requests have succeeded, so a
/// failed draw leaves the previous grid in place.
pub async fn draw_random<S: CharacterSource, R: Rng>(
    source: &S,
    container: &mut Container,
    rng: &mut R,
    progress: Option<GalleryProgressCallback>,
) -> Result<CharacterRecord, GalleryError> {
    report(&progress, "Counting characters...".to_string());
    let count = source.fetch_count().await?;

    let index = random_index(count, rng).ok_or(GalleryError::EmptyCollection)?;
    debug!("Picked index {} of {}", index, count);

    report(&progress, format!("Fetching character #{}...", index));
    let record = source.fetch_one(index).await?;

    info!(
        name = %record.name,
        species = %record.species,
        index,
        "Drew random character"
    );

    clear(container);
    mount(container, render_card(&record));
    report(&progress, format!("Drew {}", record.name));

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_index_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_index(0, &mut rng), None);
    }

    #[test]
    fn test_random_index_single() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(random_index(1, &mut rng), Some(0));
        }
    }

    #[test]
    fn test_random_index_is_reproducible() {
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| random_index(826, &mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| random_index(826, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }
}
