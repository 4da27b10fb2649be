//! Sampling parameters for perturbation channels.
//!
//! A [`RandomParams`] describes one scalar channel: which distribution to
//! draw from and the hard symmetric bound the draw must stay inside.
//! A [`PerturbParams`] groups the full channel set for one perturbation
//! rule.  Both deserialize directly from rule configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ParamsError
// ---------------------------------------------------------------------------

/// Validation errors for sampling parameters.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParamsError {
    #[error("max must be finite and >= 0, got {value}")]
    InvalidBound { value: f64 },

    #[error("std_dev must be finite and >= 0, got {value}")]
    InvalidStdDev { value: f64 },
}

// ---------------------------------------------------------------------------
// RandomParams
// ---------------------------------------------------------------------------

/// Parameters for one randomly sampled scalar channel.
///
/// Generated values never leave the closed interval `[-max, max]`.
/// `std_dev` is only consulted for gaussian sampling.
///
/// The distribution is kept as an open string rather than an enum: an
/// unrecognized name is reported by
/// [`sample_bounded`](Self::sample_bounded) at draw time, not at
/// construction.  Recognized names are `"gaussian"` (alias `"normal"`)
/// and `"uniform"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomParams {
    /// Distribution name: `"gaussian"`, `"normal"`, or `"uniform"`.
    pub distribution: String,

    /// Hard symmetric bound; samples satisfy `|v| <= max`.
    pub max: f64,

    /// Standard deviation for gaussian sampling (default 0).
    #[serde(default)]
    pub std_dev: f64,
}

impl RandomParams {
    /// Gaussian channel with the given bound and standard deviation.
    pub fn gaussian(max: f64, std_dev: f64) -> Self {
        Self {
            distribution: "gaussian".into(),
            max,
            std_dev,
        }
    }

    /// Uniform channel over `(-max, max)`.
    pub fn uniform(max: f64) -> Self {
        Self {
            distribution: "uniform".into(),
            max,
            std_dev: 0.0,
        }
    }

    /// Check the numeric invariants: `max` and `std_dev` finite and
    /// non-negative.
    ///
    /// The distribution name is deliberately not checked here — an unknown
    /// name surfaces when sampling is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidBound`] or
    /// [`ParamsError::InvalidStdDev`].
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.max.is_finite() || self.max < 0.0 {
            return Err(ParamsError::InvalidBound { value: self.max });
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(ParamsError::InvalidStdDev {
                value: self.std_dev,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PerturbParams
// ---------------------------------------------------------------------------

/// The full channel set for one perturbation rule.
///
/// The global channels (shift, rotation, forward) are drawn once per pose;
/// the sensor channels (yaw, pitch, roll) are drawn once per configured
/// sensor.  `flip` enables the alternating left-right mirror within a
/// frame's pose batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbParams {
    pub shift: RandomParams,
    pub rotation: RandomParams,
    pub forward: RandomParams,
    pub sensor_yaw: RandomParams,
    pub sensor_pitch: RandomParams,
    pub sensor_roll: RandomParams,
    #[serde(default)]
    pub flip: bool,
}

impl PerturbParams {
    /// All channels paired with their names, in draw order.
    pub fn channels(&self) -> [(&'static str, &RandomParams); 6] {
        [
            ("shift", &self.shift),
            ("rotation", &self.rotation),
            ("forward", &self.forward),
            ("sensor_yaw", &self.sensor_yaw),
            ("sensor_pitch", &self.sensor_pitch),
            ("sensor_roll", &self.sensor_roll),
        ]
    }

    /// Validate every channel's numeric invariants.
    ///
    /// # Errors
    ///
    /// Returns the first failing channel's name alongside its
    /// [`ParamsError`].
    pub fn validate(&self) -> Result<(), (&'static str, ParamsError)> {
        for (channel, params) in self.channels() {
            params.validate().map_err(|err| (channel, err))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_perturb() -> PerturbParams {
        PerturbParams {
            shift: RandomParams::gaussian(0.5, 0.34),
            rotation: RandomParams::gaussian(4.0, 1.0),
            forward: RandomParams::uniform(0.8),
            sensor_yaw: RandomParams::gaussian(5.0, 3.0),
            sensor_pitch: RandomParams::gaussian(6.0, 3.0),
            sensor_roll: RandomParams::gaussian(0.0, 0.0),
            flip: true,
        }
    }

    // -- Constructors --

    #[test]
    fn gaussian_constructor() {
        let p = RandomParams::gaussian(2.0, 0.5);
        assert_eq!(p.distribution, "gaussian");
        assert!((p.max - 2.0).abs() < f64::EPSILON);
        assert!((p.std_dev - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn uniform_constructor() {
        let p = RandomParams::uniform(3.0);
        assert_eq!(p.distribution, "uniform");
        assert!((p.max - 3.0).abs() < f64::EPSILON);
        assert!(p.std_dev.abs() < f64::EPSILON);
    }

    // -- Validation --

    #[test]
    fn validate_accepts_zero_max() {
        assert!(RandomParams::gaussian(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_max() {
        let err = RandomParams::gaussian(-1.0, 0.5).validate().unwrap_err();
        assert!(matches!(err, ParamsError::InvalidBound { .. }));
    }

    #[test]
    fn validate_rejects_nan_max() {
        assert!(RandomParams::gaussian(f64::NAN, 0.5).validate().is_err());
    }

    #[test]
    fn validate_rejects_inf_max() {
        assert!(RandomParams::gaussian(f64::INFINITY, 0.5)
            .validate()
            .is_err());
    }

    #[test]
    fn validate_rejects_negative_std_dev() {
        let err = RandomParams::gaussian(1.0, -0.1).validate().unwrap_err();
        assert!(matches!(err, ParamsError::InvalidStdDev { .. }));
    }

    #[test]
    fn validate_rejects_nan_std_dev() {
        assert!(RandomParams::gaussian(1.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn validate_ignores_distribution_name() {
        // Unknown distribution names are a sampling-time error, not a
        // validation error.
        let p = RandomParams {
            distribution: "poisson".into(),
            max: 1.0,
            std_dev: 0.0,
        };
        assert!(p.validate().is_ok());
    }

    // -- PerturbParams --

    #[test]
    fn channels_in_draw_order() {
        let p = valid_perturb();
        let names: Vec<&str> = p.channels().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            [
                "shift",
                "rotation",
                "forward",
                "sensor_yaw",
                "sensor_pitch",
                "sensor_roll"
            ]
        );
    }

    #[test]
    fn perturb_validate_names_failing_channel() {
        let mut p = valid_perturb();
        p.sensor_pitch.max = -6.0;
        let (channel, err) = p.validate().unwrap_err();
        assert_eq!(channel, "sensor_pitch");
        assert!(matches!(err, ParamsError::InvalidBound { .. }));
    }

    // -- Serde --

    #[test]
    fn random_params_std_dev_defaults_to_zero() {
        let p: RandomParams =
            serde_json::from_str(r#"{"distribution": "uniform", "max": 2.5}"#).unwrap();
        assert_eq!(p.distribution, "uniform");
        assert!((p.max - 2.5).abs() < f64::EPSILON);
        assert!(p.std_dev.abs() < f64::EPSILON);
    }

    #[test]
    fn perturb_params_serde_roundtrip() {
        let p = valid_perturb();
        let json = serde_json::to_string(&p).unwrap();
        let back: PerturbParams = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn perturb_params_flip_defaults_to_false() {
        let json = r#"{
            "shift":        {"distribution": "gaussian", "max": 0.5, "std_dev": 0.3},
            "rotation":     {"distribution": "gaussian", "max": 4.0, "std_dev": 1.0},
            "forward":      {"distribution": "uniform",  "max": 0.8},
            "sensor_yaw":   {"distribution": "gaussian", "max": 5.0, "std_dev": 3.0},
            "sensor_pitch": {"distribution": "gaussian", "max": 6.0, "std_dev": 3.0},
            "sensor_roll":  {"distribution": "gaussian", "max": 0.0}
        }"#;
        let p: PerturbParams = serde_json::from_str(json).unwrap();
        assert!(!p.flip);
    }

    // -- Error display --

    #[test]
    fn params_error_display_messages() {
        assert_eq!(
            ParamsError::InvalidBound { value: -1.0 }.to_string(),
            "max must be finite and >= 0, got -1"
        );
        assert_eq!(
            ParamsError::InvalidStdDev { value: -0.5 }.to_string(),
            "std_dev must be finite and >= 0, got -0.5"
        );
    }

    // -- Send + Sync --

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn params_types_are_send_sync() {
        assert_send_sync::<RandomParams>();
        assert_send_sync::<PerturbParams>();
        assert_send_sync::<ParamsError>();
    }
}
