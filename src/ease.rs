//! Easing curves for the loading animation.
//!
//! Pure functions mapping normalized time in [0, 1] to normalized
//! progress in [0, 1]. No state, no I/O.

/// Circular ease-in-out: slow start, fast middle, slow finish.
///
/// Input is clamped to [0, 1]. The curve is symmetric about (0.5, 0.5)
/// and hits both endpoints exactly.
pub fn in_out_circ(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t < 1.0 {
        -0.5 * ((1.0 - t * t).sqrt() - 1.0)
    } else {
        let t = t - 2.0;
        0.5 * ((1.0 - t * t).sqrt() + 1.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
