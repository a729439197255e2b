//! Stochastic process kit
//!
//! Small toolkit of numeric-sequence generators shared by every persona
//! simulation: AR(1) series with temporal persistence, a two-state
//! regime-switching process, and a deterministic weekly-seasonality overlay.
//! All randomness flows through the caller-supplied `Rng` so identical seeds
//! yield identical series.

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Parameters for the two-state regime-switching process
#[derive(Debug, Clone, Copy)]
pub struct RegimeParams {
    /// Mean of the normal-state distribution
    pub base_mean: f64,
    /// Std-dev of the normal-state distribution
    pub base_std: f64,
    /// Mean of the elevated-state distribution
    pub high_mean: f64,
    /// Std-dev of the elevated-state distribution
    pub high_std: f64,
    /// Daily probability of entering the elevated state
    pub p_enter_high: f64,
    /// Daily probability of exiting the elevated state
    pub p_exit_high: f64,
}

/// Output of [`regime_switching_series`]: the value series plus a parallel
/// elevated-state indicator.
///
/// The indicator is the coupling point for cross-channel correlation: every
/// channel that should spike on episode days is shifted by this one series
/// rather than re-drawing its own regime state.
#[derive(Debug, Clone)]
pub struct RegimeSeries {
    pub values: Vec<f64>,
    pub is_high: Vec<bool>,
}

impl RegimeSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Generate an AR(1) series of length `n` with persistence `phi`.
///
/// Element 0 is drawn fresh from N(mean, std); each subsequent element is
/// `phi * prev + (1 - phi) * mean + N(0, std * sqrt(1 - phi^2))`. The noise
/// scaling keeps the marginal variance at `std^2` for any `phi`.
///
/// Precondition: `phi` in [0, 1) and `std >= 0`. Values outside that range
/// produce explosive or undefined series; profile validation rejects them
/// before generation starts.
pub fn ar1_series(rng: &mut impl Rng, n: usize, mean: f64, std: f64, phi: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let marginal = Normal::new(mean, std).expect("validated std");
    let innovation = Normal::new(0.0, std * (1.0 - phi * phi).sqrt()).expect("validated std");

    let mut series = Vec::with_capacity(n);
    series.push(marginal.sample(rng));
    for t in 1..n {
        let prev = series[t - 1];
        series.push(phi * prev + (1.0 - phi) * mean + innovation.sample(rng));
    }
    series
}

/// Generate a regime-switching series of length `n`.
///
/// A hidden two-state Markov chain (normal/elevated) transitions each day via
/// a Bernoulli draw with the state-dependent probability; the transition is
/// resolved before the day's value is emitted. Within a state the value is an
/// AR(1)-like pull toward that state's mean (persistence 0.8 normal, 0.9
/// elevated). The first day inside the elevated state draws fresh from the
/// elevated distribution so entries show as level shifts, not slow drifts.
pub fn regime_switching_series(rng: &mut impl Rng, n: usize, params: &RegimeParams) -> RegimeSeries {
    let base = Normal::new(params.base_mean, params.base_std).expect("validated std");
    let base_noise = Normal::new(0.0, params.base_std * 0.5).expect("validated std");
    let high = Normal::new(params.high_mean, params.high_std).expect("validated std");
    let high_noise = Normal::new(0.0, params.high_std * 0.3).expect("validated std");

    let mut values = Vec::with_capacity(n);
    let mut is_high = Vec::with_capacity(n);
    let mut in_high = false;

    for t in 0..n {
        // Transition first, then emit under the post-transition state
        if in_high {
            if rng.gen::<f64>() < params.p_exit_high {
                in_high = false;
            }
        } else if rng.gen::<f64>() < params.p_enter_high {
            in_high = true;
        }
        is_high.push(in_high);

        let value = if !in_high {
            if t == 0 {
                base.sample(rng)
            } else {
                0.8 * values[t - 1] + 0.2 * params.base_mean + base_noise.sample(rng)
            }
        } else if t == 0 || !is_high[t - 1] {
            // Entering the elevated state: fresh draw, no carry-over
            high.sample(rng)
        } else {
            0.9 * values[t - 1] + 0.1 * params.high_mean + high_noise.sample(rng)
        };
        values.push(value);
    }

    RegimeSeries { values, is_high }
}

/// Add deterministic weekly seasonality to a series.
///
/// Day index `i` maps to weekday `i % 7`; weekend days (5, 6) get a
/// sinusoidal offset (negative at those phases, so weekends dip harder than
/// the flat weekday offset), both scaled by the series' own mean magnitude.
/// Pure function, no randomness.
pub fn add_weekly_seasonality(series: &[f64], amplitude: f64) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }
    let mean = series.iter().sum::<f64>() / series.len() as f64;

    series
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let day_of_week = i % 7;
            let seasonal = if day_of_week >= 5 {
                amplitude * (2.0 * std::f64::consts::PI * day_of_week as f64 / 7.0).sin()
            } else {
                -amplitude * 0.3
            };
            value + seasonal * mean
        })
        .collect()
}

/// Clamp every element of a series into `[lo, hi]`
pub fn clamp_series(series: &mut [f64], lo: f64, hi: f64) {
    for value in series.iter_mut() {
        *value = value.clamp(lo, hi);
    }
}

/// Shift elements flagged by `indicator` by a constant amount
pub fn shift_on_indicator(series: &mut [f64], indicator: &[bool], shift: f64) {
    for (value, &flag) in series.iter_mut().zip(indicator) {
        if flag {
            *value += shift;
        }
    }
}
