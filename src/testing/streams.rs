use crate::core::observations::Observation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded weighted stream for a numeric summary.
///
/// Values and weights are small integers so sums are exact in `f64`
/// regardless of addition order. Roughly one item in ten is NaN, one in ten
/// is integral text and one in ten never coerces.
pub fn random_numeric_stream(seed: u64, len: usize) -> Vec<(Observation, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let weight = rng.random_range(1..=4) as f64;
            let v = rng.random_range(-5..=5i64);
            let observation = match rng.random_range(0..10) {
                0 => Observation::from(f64::NAN),
                1 => Observation::from(v.to_string()),
                2 => Observation::from(format!("bad-{}", v.rem_euclid(3))),
                _ => Observation::from(v),
            };
            (observation, weight)
        })
        .collect()
}

/// Seeded weighted stream of text observations, tuple-shaped when `arity` is set.
pub fn random_categorical_stream(
    seed: u64,
    len: usize,
    arity: Option<usize>,
) -> Vec<(Observation, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let label = |rng: &mut StdRng| format!("c{}", rng.random_range(0..6));
    (0..len)
        .map(|_| {
            let observation = match arity {
                Some(k) => {
                    let items: Vec<_> = (0..k).map(|_| label(&mut rng)).collect();
                    Observation::tuple(items)
                }
                None => Observation::from(label(&mut rng)),
            };
            (observation, rng.random_range(1..=3) as f64)
        })
        .collect()
}
