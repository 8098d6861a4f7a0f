use crate::core::observations::Observation;

/// `[1, 2, 1, 3, 0, 0, 0, 0, NaN]`: count 8, sum 7, min 0×4, max 3×1, one NaN.
pub fn reference_sequence() -> Vec<f64> {
    vec![1.0, 2.0, 1.0, 3.0, 0.0, 0.0, 0.0, 0.0, f64::NAN]
}

/// Numbers, numeric text, NaN and values that never coerce.
pub fn mixed_sequence() -> Vec<Observation> {
    vec![
        Observation::from(4),
        Observation::from("2.5"),
        Observation::from("abc"),
        Observation::from(f64::NAN),
        Observation::Missing,
        Observation::from(("x", 1)),
        Observation::from(-1.0),
        Observation::from("NaN"),
    ]
}
