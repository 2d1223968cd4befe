//! Phase series utilities.
//!
//! Continuous phase, phase fluctuations around a uniform rotation, and the
//! filtered reconstruction `A·cos φ`. All operate per grid point.

// External dependencies
use core::f64::consts::TAU;

/// Jump size (radians) treated as a wrap-around.
pub const WRAP_THRESHOLD: f64 = 1.0;

/// Continuous phase: every jump larger than one radian adds `2π` to the rest.
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let mut out = phase.to_vec();
    let mut offset = 0.0;
    for t in 1..phase.len() {
        if (phase[t] - phase[t - 1]).abs() > WRAP_THRESHOLD {
            offset += TAU;
        }
        out[t] = phase[t] + offset;
    }
    out
}

/// Deviation of a continuous phase from `φ(0) + ωt`.
pub fn phase_fluctuations(continuous: &[f64], omega: f64) -> Vec<f64> {
    let Some(&phi0) = continuous.first() else {
        return Vec::new();
    };
    continuous
        .iter()
        .enumerate()
        .map(|(t, &phi)| phi - (phi0 + omega * t as f64))
        .collect()
}

/// Band-filtered signal `A(t)·cos φ(t)`.
pub fn filtered_signal(phase: &[f64], amplitude: &[f64]) -> Vec<f64> {
    phase
        .iter()
        .zip(amplitude)
        .map(|(&phi, &a)| a * phi.cos())
        .collect()
}
