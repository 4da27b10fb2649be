//! Canned perturbation parameter sets.

use posegen_core::params::{PerturbParams, RandomParams};

/// All-gaussian channel set with realistic road-scene magnitudes.
pub fn gaussian_perturb(flip: bool) -> PerturbParams {
    PerturbParams {
        shift: RandomParams::gaussian(0.5, 0.34),
        rotation: RandomParams::gaussian(4.0, 1.0),
        forward: RandomParams::gaussian(0.8, 0.5),
        sensor_yaw: RandomParams::gaussian(5.0, 3.0),
        sensor_pitch: RandomParams::gaussian(6.0, 3.0),
        sensor_roll: RandomParams::gaussian(0.0, 0.0),
        flip,
    }
}

/// Mixed gaussian/uniform channel set, flip disabled.
pub fn mixed_perturb() -> PerturbParams {
    PerturbParams {
        shift: RandomParams::gaussian(0.5, 0.34),
        rotation: RandomParams::uniform(8.0),
        forward: RandomParams::uniform(0.8),
        sensor_yaw: RandomParams::uniform(5.0),
        sensor_pitch: RandomParams::gaussian(6.0, 3.0),
        sensor_roll: RandomParams::gaussian(2.0, 1.5),
        flip: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
