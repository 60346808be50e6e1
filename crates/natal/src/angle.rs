//! Angle helpers shared by every stage of the pipeline.

/// Normalize an angle to [0, 360) degrees.
///
/// Non-finite input is returned unchanged so callers can detect it.
pub fn normalize_deg(deg: f64) -> f64 {
    if !deg.is_finite() {
        return deg;
    }
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-20 % 360 + 360 rounds up to exactly 360
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}
