//! The emitted pose perturbation record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pose
// ---------------------------------------------------------------------------

/// One sampled perturbation of a source frame.
///
/// Only numbers: the downstream augmentation engine performs the actual
/// warp.  A pose is immutable once emitted; the one sanctioned transform is
/// [`flipped`](Self::flipped), which returns a mirrored copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Lateral shift.
    pub shift: f32,
    /// In-plane rotation.
    pub rotation: f32,
    /// Forward offset.
    pub forward: f32,
    /// Per-sensor yaw perturbation, keyed by sensor name.
    pub sensor_yaw: HashMap<String, f32>,
    /// Per-sensor pitch perturbation, keyed by sensor name.
    pub sensor_pitch: HashMap<String, f32>,
    /// Per-sensor roll perturbation, keyed by sensor name.
    pub sensor_roll: HashMap<String, f32>,
    /// Whether this pose is a left-right mirror.
    pub flip: bool,
    /// Index of the frame this pose perturbs.
    pub src_frame: u32,
}

impl Pose {
    /// Mirror this pose around the longitudinal plane.
    ///
    /// Shift and rotation change sign; forward and the per-sensor angles
    /// are unchanged.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut pose = self.clone();
        pose.flip = true;
        pose.shift = -pose.shift;
        pose.rotation = -pose.rotation;
        pose
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
