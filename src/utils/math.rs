/// One Shannon entropy term, `-p * log2(p)`, using the convention that a zero
/// probability contributes nothing. A certain outcome yields `+0.0`, never `-0.0`.
#[inline]
pub fn entropy_term(p: f64) -> f64 {
    if p > 0.0 && p < 1.0 { -p * libm::log2(p) } else { 0.0 }
}

/// Upper bound of the entropy of a distribution over `n` non-empty classes.
#[inline]
pub fn max_entropy(n: usize) -> f64 {
    if n <= 1 { 0.0 } else { libm::log2(n as f64) }
}
