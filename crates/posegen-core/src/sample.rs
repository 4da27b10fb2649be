//! Hard-bounded scalar sampling.
//!
//! [`RandomParams::sample_bounded`] draws from the configured distribution
//! and guarantees the returned value stays inside the closed interval
//! `[-max, max]`.  Gaussian draws use rejection sampling, not clipping:
//! out-of-bound draws are discarded and redrawn, so the output distribution
//! is a truncated Gaussian rather than one with probability mass piled on
//! the bound.
//!
//! Sampling is `f64` internally and narrows to `f32` on return; the bound
//! check runs on the narrowed value (re-widened), so rounding can never
//! push a boundary value outside the bound.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::params::RandomParams;

/// Draw budget for the rejection loops.  The loops terminate almost surely
/// for sane parameters; the ceiling turns degenerate configurations
/// (e.g. `std_dev` far exceeding `max`) into a diagnosable error instead
/// of a hang.
pub const MAX_REJECTION_DRAWS: u32 = 1 << 20;

// ---------------------------------------------------------------------------
// SampleError
// ---------------------------------------------------------------------------

/// Errors from bounded sampling.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SampleError {
    #[error("unknown distribution type: \"{name}\"")]
    UnknownDistribution { name: String },

    #[error("max must be finite and >= 0 for sampling, got {value}")]
    InvalidBound { value: f64 },

    #[error("std_dev must be finite and >= 0 for gaussian sampling, got {value}")]
    InvalidStdDev { value: f64 },

    #[error(
        "rejection budget exhausted: no draw from N(0, {std_dev}) landed inside \
         [-{max}, {max}]"
    )]
    RejectionBudgetExhausted { max: f64, std_dev: f64 },
}

// ---------------------------------------------------------------------------
// Bounded sampling
// ---------------------------------------------------------------------------

impl RandomParams {
    /// Draw one value from this channel's distribution, guaranteed to
    /// satisfy `|v| <= max`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::UnknownDistribution`] for an unrecognized
    /// distribution name, [`SampleError::InvalidBound`] /
    /// [`SampleError::InvalidStdDev`] for parameters violating the numeric
    /// invariants, and [`SampleError::RejectionBudgetExhausted`] when the
    /// rejection loop gives up on degenerate parameters.
    pub fn sample_bounded<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f32, SampleError> {
        if !self.max.is_finite() || self.max < 0.0 {
            return Err(SampleError::InvalidBound { value: self.max });
        }
        match self.distribution.as_str() {
            "gaussian" | "normal" => self.sample_gaussian(rng),
            "uniform" => self.sample_uniform(rng),
            other => Err(SampleError::UnknownDistribution {
                name: other.to_owned(),
            }),
        }
    }

    #[allow(clippy::cast_possible_truncation)] // intentional f64→f32, bound-checked after
    fn sample_gaussian<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f32, SampleError> {
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(SampleError::InvalidStdDev {
                value: self.std_dev,
            });
        }
        if self.std_dev == 0.0 {
            // Degenerate draw: exactly 0, always within bound.
            return Ok(0.0);
        }
        let normal = Normal::new(0.0, self.std_dev).map_err(|_| SampleError::InvalidStdDev {
            value: self.std_dev,
        })?;
        for _ in 0..MAX_REJECTION_DRAWS {
            let narrowed = normal.sample(rng) as f32;
            if within_bound(narrowed, self.max) {
                return Ok(narrowed);
            }
        }
        Err(SampleError::RejectionBudgetExhausted {
            max: self.max,
            std_dev: self.std_dev,
        })
    }

    #[allow(clippy::cast_possible_truncation)] // intentional f64→f32, bound-checked after
    fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f32, SampleError> {
        if self.max == 0.0 {
            // Uniform over an empty open interval degenerates to 0.
            return Ok(0.0);
        }
        // Bounded by construction; the loop only guards the case where
        // narrowing rounds a near-boundary draw past the bound.
        for _ in 0..MAX_REJECTION_DRAWS {
            let narrowed = rng.gen_range(-self.max..self.max) as f32;
            if within_bound(narrowed, self.max) {
                return Ok(narrowed);
            }
        }
        Err(SampleError::RejectionBudgetExhausted {
            max: self.max,
            std_dev: self.std_dev,
        })
    }
}

/// Inclusive bound check on the narrowed value, re-widened to `f64`.
fn within_bound(value: f32, max: f64) -> bool {
    f64::from(value).abs() <= max
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
