use crate::errors::{ExplorerError, ExplorerResult};
use crate::geometry::point::Coord;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng, random};

/// Creates the session random number generator.
///
/// A fixed `seed` gives reproducible point layouts; `None` seeds from the
/// thread-local generator.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(random::<u64>))
}

/// Draws a point uniformly from `[min_x, max_x] × [min_y, max_y]`.
///
/// # Errors
///
/// Returns [`ExplorerError::InvalidParameters`] if the rectangle is empty or
/// a bound is not finite.
pub fn random_coord_in(
    rng: &mut StdRng,
    (min_x, max_x): (f64, f64),
    (min_y, max_y): (f64, f64),
) -> ExplorerResult<Coord> {
    let bounds = [min_x, max_x, min_y, max_y];
    if bounds.iter().any(|b| !b.is_finite()) || min_x > max_x || min_y > max_y {
        return Err(ExplorerError::InvalidParameters(format!(
            "empty sampling rectangle [{min_x}, {max_x}] x [{min_y}, {max_y}]"
        )));
    }
    Ok(random_coord(rng, (min_x, max_x), (min_y, max_y)))
}

/// Draws a point uniformly from a rectangle known to be non-empty.
///
/// # Panics
///
/// Panics if `min_x > max_x` or `min_y > max_y`; use [`random_coord_in`] for
/// caller-supplied bounds.
pub fn random_coord(
    rng: &mut StdRng,
    (min_x, max_x): (f64, f64),
    (min_y, max_y): (f64, f64),
) -> Coord {
    Coord::new(
        rng.random_range(min_x..=max_x),
        rng.random_range(min_y..=max_y),
    )
}

/// Uniform jitter in `[-amplitude, amplitude]`.
pub fn jitter(rng: &mut StdRng, amplitude: f64) -> f64 {
    if amplitude > 0.0 {
        rng.random_range(-amplitude..=amplitude)
    } else {
        0.0
    }
}
