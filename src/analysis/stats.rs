//! Proportion estimates and bypass calibration

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::{Result, search::Difficulty};

/// Observed proportion with a Wilson score interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProportionEstimate {
    pub successes: usize,
    pub trials: usize,
    pub proportion: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence: f64,
}

impl ProportionEstimate {
    pub fn contains(&self, p: f64) -> bool {
        (self.lower..=self.upper).contains(&p)
    }
}

/// Wilson score interval for `successes` out of `trials`
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfiguration`] for zero trials, more
/// successes than trials, or a confidence outside `(0, 1)`.
pub fn wilson_interval(
    successes: usize,
    trials: usize,
    confidence: f64,
) -> Result<ProportionEstimate> {
    if trials == 0 || successes > trials {
        return Err(crate::Error::InvalidConfiguration {
            message: format!("cannot estimate {successes} successes out of {trials} trials"),
        });
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(crate::Error::InvalidConfiguration {
            message: format!("confidence {confidence} must lie strictly between 0 and 1"),
        });
    }

    let normal = Normal::new(0.0, 1.0).map_err(|e| crate::Error::InvalidConfiguration {
        message: e.to_string(),
    })?;
    let z = normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);

    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;
    let denominator = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denominator;
    let half_width = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denominator;

    Ok(ProportionEstimate {
        successes,
        trials,
        proportion: p,
        lower: if successes == 0 { 0.0 } else { (center - half_width).max(0.0) },
        upper: if successes == trials { 1.0 } else { (center + half_width).min(1.0) },
        confidence,
    })
}

/// Measured bypass frequency for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BypassCalibration {
    pub difficulty: Difficulty,
    pub expected: f64,
    pub estimate: ProportionEstimate,
}

impl BypassCalibration {
    /// Compare `bypassed` out of `engine_moves` against the rate configured
    /// for `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] for zero moves, more
    /// bypasses than moves, or a confidence outside `(0, 1)`.
    pub fn from_counts(
        difficulty: Difficulty,
        bypassed: usize,
        engine_moves: usize,
        confidence: f64,
    ) -> Result<Self> {
        Ok(Self {
            difficulty,
            expected: difficulty.bypass_probability(),
            estimate: wilson_interval(bypassed, engine_moves, confidence)?,
        })
    }

    /// Whether the configured probability lies inside the interval
    pub fn is_consistent(&self) -> bool {
        self.estimate.contains(self.expected)
    }
}
