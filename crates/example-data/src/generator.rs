//! Deterministic route generation.
//!
//! This module provides the core generation function that produces
//! reproducible delivery routes from a seed value. The same seed always
//! produces identical output.

use fake::Fake;
use fake::faker::address::raw::CityName;
use fake::faker::company::raw::CompanyName;
use fake::locales::EN;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::seed::{ExamplePointSeed, ExampleRouteSeed, ScheduleSeed};

/// Largest number of delivery points a single board may request.
const CODE_SPACE: usize = 500;

/// Lowest delivery-point code handed out by the generator.
const FIRST_CODE_MIN: u32 = 100;

/// Widest gap between two consecutively generated codes.
const CODE_STEP_MAX: u32 = 3;

/// Probability numerator for a stop with unknown coordinates (1 in 12).
const MISSING_COORDS_NUMERATOR: u32 = 1;

/// Probability denominator for a stop with unknown coordinates.
const MISSING_COORDS_DENOMINATOR: u32 = 12;

/// Probability numerator for attaching a description note (1 in 3).
const NOTE_NUMERATOR: u32 = 1;

/// Probability denominator for attaching a description note.
const NOTE_DENOMINATOR: u32 = 3;

/// Known street corners around the default depot, as (latitude,
/// longitude) degree pairs. Stops are placed on these rather than on
/// arithmetic jitter so generation stays free of float math.
const COORDINATES: &[(f64, f64)] = &[
    (32.0853, 34.7818),
    (32.0944, 34.7806),
    (32.1093, 34.8555),
    (32.0684, 34.7977),
    (32.0504, 34.7522),
    (32.0171, 34.7455),
    (32.0809, 34.8130),
    (32.1260, 34.8388),
    (32.1467, 34.8403),
    (32.1663, 34.8436),
    (32.0292, 34.7501),
    (31.9730, 34.7925),
    (31.9521, 34.8889),
    (32.0841, 34.8873),
    (32.1782, 34.9076),
    (32.0114, 34.7748),
    (31.8928, 34.8113),
    (32.0719, 34.8244),
    (32.3215, 34.8532),
    (31.9467, 34.8903),
];

/// Description notes occasionally attached to a generated stop.
const NOTES: &[(&str, &str)] = &[
    ("Entrance", "side door"),
    ("Entrance", "loading bay"),
    ("Contact", "ring twice"),
    ("Contact", "call on arrival"),
    ("Parking", "blue zone across the street"),
    ("Access", "gate code 2481"),
];

/// Shift labels a generated route may carry.
const SHIFTS: &[&str] = &["Morning", "Evening"];

/// Delivery cadences a generated stop may carry.
const SCHEDULES: &[ScheduleSeed] = &[
    ScheduleSeed::Daily,
    ScheduleSeed::Weekday,
    ScheduleSeed::Alt1,
    ScheduleSeed::Alt2,
];

/// Generates example routes from a seed value.
///
/// Uses the seed to initialise a deterministic RNG, ensuring identical
/// output for the same inputs. The generated routes have:
///
/// - Board-wide unique, ascending delivery-point codes with small gaps
/// - Fake but plausible route and stop names
/// - Coordinates around the default depot, with roughly one stop in
///   twelve left at the unknown-coordinates placeholder
///
/// # Errors
///
/// Returns [`GenerationError::NoRoutesRequested`] when `route_count` is
/// zero and [`GenerationError::CodeSpaceExhausted`] when the requested
/// board would not fit the generator's code space.
///
/// # Example
///
/// ```
/// use example_data::generate_example_routes;
///
/// let routes = generate_example_routes(7, 2, 4).expect("generation succeeds");
///
/// assert_eq!(routes.len(), 2);
/// assert!(routes.iter().all(|route| route.points.len() == 4));
/// ```
pub fn generate_example_routes(
    seed: u64,
    route_count: usize,
    points_per_route: usize,
) -> Result<Vec<ExampleRouteSeed>, GenerationError> {
    if route_count == 0 {
        return Err(GenerationError::NoRoutesRequested);
    }
    let requested = route_count.saturating_mul(points_per_route);
    if requested > CODE_SPACE {
        return Err(GenerationError::CodeSpaceExhausted {
            requested,
            available: CODE_SPACE,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut next_code = rng.random_range(FIRST_CODE_MIN..FIRST_CODE_MIN * 2);

    let mut routes = Vec::with_capacity(route_count);
    for route_index in 0..route_count {
        let mut points = Vec::with_capacity(points_per_route);
        for _ in 0..points_per_route {
            points.push(generate_point(&mut rng, &mut next_code));
        }

        let name: String = CityName(EN).fake_with_rng(&mut rng);
        routes.push(ExampleRouteSeed {
            name,
            code: format!("R{}", route_index + 1),
            shift: pick(&mut rng, SHIFTS, &"Morning").to_owned(),
            points,
        });
    }

    Ok(routes)
}

/// Generates a single stop and advances the shared code counter.
fn generate_point(rng: &mut ChaCha8Rng, next_code: &mut u32) -> ExamplePointSeed {
    let code = next_code.to_string();
    *next_code += rng.random_range(1..=CODE_STEP_MAX);

    let (latitude, longitude) =
        if rng.random_ratio(MISSING_COORDS_NUMERATOR, MISSING_COORDS_DENOMINATOR) {
            (0.0, 0.0)
        } else {
            pick(rng, COORDINATES, &(0.0, 0.0))
        };

    let note = if rng.random_ratio(NOTE_NUMERATOR, NOTE_DENOMINATOR) {
        let (key, value) = pick(rng, NOTES, &("Entrance", "side door"));
        Some((key.to_owned(), value.to_owned()))
    } else {
        None
    };

    let name: String = CompanyName(EN).fake_with_rng(rng);
    ExamplePointSeed {
        code,
        name,
        schedule: pick(rng, SCHEDULES, &ScheduleSeed::Daily),
        latitude,
        longitude,
        note,
    }
}

/// Picks a deterministic element from a non-empty slice.
fn pick<T: Copy>(rng: &mut ChaCha8Rng, values: &[T], fallback: &T) -> T {
    if values.is_empty() {
        return *fallback;
    }
    let index = rng.random_range(0..values.len());
    values.get(index).copied().unwrap_or(*fallback)
}
