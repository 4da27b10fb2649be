//! Flattening and ordering-constrained shuffling of pose batches.

use posegen_core::pose::Pose;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Reshuffle budget for the leading-pose constraint.  The loop terminates
/// almost surely whenever at least one pose is unflipped; the ceiling turns
/// an unsatisfiable input (every pose flipped) into a diagnosable error.
pub const MAX_RESHUFFLES: u32 = 10_000;

// ---------------------------------------------------------------------------
// ShuffleError
// ---------------------------------------------------------------------------

/// Errors from the constrained shuffle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShuffleError {
    #[error(
        "reshuffle budget exhausted: no permutation with an unflipped leading pose \
         found ({flipped} of {poses} poses are flipped)"
    )]
    ReshuffleBudgetExhausted { poses: usize, flipped: usize },
}

// ---------------------------------------------------------------------------
// flatten_and_shuffle
// ---------------------------------------------------------------------------

/// Flatten per-frame pose batches into one uniformly shuffled sequence.
///
/// Batches are flattened in frame order with within-batch order preserved,
/// then shuffled as a whole.  With `require_unflipped_first` set, whole
/// permutations are rejected and redrawn until the first element has
/// `flip == false` — the downstream augmentation engine cannot start a
/// stream on a flipped pose.  Rejection keeps the accepted permutation
/// uniform over all permutations satisfying the constraint; no targeted
/// swap is performed.
///
/// An empty input is returned unchanged without consuming randomness.
///
/// # Errors
///
/// Returns [`ShuffleError::ReshuffleBudgetExhausted`] if no acceptable
/// permutation is found within [`MAX_RESHUFFLES`] attempts (only reachable
/// when all, or nearly all, poses are flipped).
pub fn flatten_and_shuffle<R: Rng + ?Sized>(
    batches: Vec<Vec<Pose>>,
    require_unflipped_first: bool,
    rng: &mut R,
) -> Result<Vec<Pose>, ShuffleError> {
    let mut poses: Vec<Pose> = batches.into_iter().flatten().collect();
    if poses.is_empty() {
        return Ok(poses);
    }
    poses.shuffle(rng);
    if require_unflipped_first {
        let mut reshuffles = 0;
        while poses[0].flip {
            if reshuffles >= MAX_RESHUFFLES {
                let flipped = poses.iter().filter(|pose| pose.flip).count();
                return Err(ShuffleError::ReshuffleBudgetExhausted {
                    poses: poses.len(),
                    flipped,
                });
            }
            poses.shuffle(rng);
            reshuffles += 1;
        }
    }
    Ok(poses)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
