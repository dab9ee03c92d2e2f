//! Input generators shared by the discoeb benchmarks.

/// `n` points of a noisy sine, deterministic across runs.
#[must_use]
pub fn noisy_sine(n: usize) -> Vec<f64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..n)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let noise = (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5;
            (i as f64 * 0.05).sin() + 0.1 * noise
        })
        .collect()
}

/// `n` evenly spaced points on `[lo, hi]`.
#[must_use]
pub fn ramp(n: usize, lo: f64, hi: f64) -> Vec<f64> {
    if n < 2 {
        return vec![lo; n];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}
