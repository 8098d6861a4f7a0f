/// Shannon entropy (natural log) of the distribution described by `weights`.
///
/// `H = -Σ p_i·ln(p_i)` with `p_i = w_i / Σw`. With `scaled_to_1` the result is
/// divided by `ln(k)`, `k` being the number of weights, so it lies in `[0, 1]`.
/// Zero weights contribute nothing; an empty or all-zero distribution has
/// entropy `0.0`, as does a scaled distribution with fewer than two entries.
pub fn entropy<I>(weights: I, scaled_to_1: bool) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mut h = 0.0;
    for &w in &weights {
        if w > 0.0 {
            let p = w / total;
            h -= p * libm::log(p);
        }
    }

    if !scaled_to_1 {
        return h;
    }
    if weights.len() < 2 {
        return 0.0;
    }
    h / libm::log(weights.len() as f64)
}
