//! The pose generator: rule dispatch, pose assembly, and batch generation.

use posegen_core::labels::{FrameTrace, LabelSchema};
use posegen_core::params::PerturbParams;
use posegen_core::pose::Pose;
use posegen_core::sample::SampleError;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::error::PosegenError;
use crate::rules::{RuleError, RuleSet};
use crate::shuffle::{flatten_and_shuffle, ShuffleError};

// ---------------------------------------------------------------------------
// GenerateError
// ---------------------------------------------------------------------------

/// Errors from pose generation.  All are fatal to the calling operation;
/// no partial results are returned.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("trace has {trace_frames} frames, but use counts has {use_count_entries} entries")]
    FrameCountMismatch {
        trace_frames: u32,
        use_count_entries: usize,
    },

    #[error("no perturbation rule matches the labels of frame {frame}")]
    NoMatchingRule { frame: u32 },

    #[error("sampling failed: {0}")]
    Sample(#[from] SampleError),

    #[error("shuffle failed: {0}")]
    Shuffle(#[from] ShuffleError),

    #[error("generated {actual} batches for {expected} frames")]
    BatchCountMismatch { expected: usize, actual: usize },
}

// ---------------------------------------------------------------------------
// PoseGenerator
// ---------------------------------------------------------------------------

/// Generates bounded pose perturbations per frame according to label rules.
///
/// Owns the rule set, the configured sensor names, and one seeded
/// `ChaCha8Rng` stream.  All sampling draws from that stream sequentially,
/// so two generators built with the same seed, rules, and sensor names
/// produce identical output for identical inputs.  Methods take `&mut self`;
/// callers wanting concurrency must serialize access themselves.
#[derive(Debug, Clone)]
pub struct PoseGenerator {
    rules: RuleSet,
    sensor_names: Vec<String>,
    require_unflipped_first: bool,
    rng: ChaCha8Rng,
}

impl PoseGenerator {
    /// Build a generator from raw rule specs.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if any rule references a numeric label key,
    /// an unrecognized (key, value) pair, a malformed condition string, or
    /// invalid numeric parameters.
    pub fn new<S: LabelSchema + ?Sized>(
        specs: &[(String, PerturbParams)],
        sensor_names: Vec<String>,
        seed: u64,
        schema: &S,
    ) -> Result<Self, RuleError> {
        Ok(Self {
            rules: RuleSet::new(specs, schema)?,
            sensor_names,
            require_unflipped_first: true,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Build a generator from a loaded [`GeneratorConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`PosegenError::Config`] for invalid numeric values and
    /// [`PosegenError::Rule`] for rules the schema rejects.
    pub fn from_config<S: LabelSchema + ?Sized>(
        config: &GeneratorConfig,
        schema: &S,
    ) -> Result<Self, PosegenError> {
        config.validate()?;
        let generator = Self::new(
            &config.rule_specs(),
            config.sensors.clone(),
            config.seed,
            schema,
        )?;
        Ok(generator)
    }

    /// Builder: require (default) or waive the unflipped-first shuffle
    /// constraint.
    ///
    /// The constraint exists for compatibility with a downstream consumer
    /// that cannot start a stream on a flipped pose; waive it only when
    /// feeding a consumer without that restriction.
    #[must_use]
    pub fn with_unflipped_first(mut self, require: bool) -> Self {
        self.require_unflipped_first = require;
        self
    }

    /// The configured sensor names, in draw order.
    pub fn sensor_names(&self) -> &[String] {
        &self.sensor_names
    }

    /// The validated rules, in priority order.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Assemble one pose by drawing every channel from `params`.
    ///
    /// The result has `flip = false` and `src_frame = 0`; batch assembly
    /// tags the frame and applies flips.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError`] from any channel draw.
    pub fn assemble_one(&mut self, params: &PerturbParams) -> Result<Pose, SampleError> {
        assemble_one(params, &self.sensor_names, &mut self.rng)
    }

    /// Assemble `count` poses for `frame` using `params`.
    ///
    /// With `params.flip` set, poses at odd 0-indexed positions are
    /// replaced by their mirrored image; even positions are left as drawn.
    /// `count == 0` yields an empty batch.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError`] from any channel draw.
    pub fn assemble_frame(
        &mut self,
        params: &PerturbParams,
        count: u32,
        frame: u32,
    ) -> Result<Vec<Pose>, SampleError> {
        assemble_frame(params, &self.sensor_names, count, frame, &mut self.rng)
    }

    /// Generate one pose batch per frame of the trace.
    ///
    /// `use_counts[i]` poses are generated for frame `i` using the first
    /// matching rule.  A frame with a zero use count contributes an empty
    /// batch without consulting the rules.  The returned outer sequence has
    /// exactly one entry per frame, each of length `use_counts[i]`.
    ///
    /// # Errors
    ///
    /// Fails fast with [`GenerateError::FrameCountMismatch`] before any
    /// sampling if `use_counts` disagrees with the trace length, and with
    /// [`GenerateError::NoMatchingRule`] for any frame that needs poses but
    /// matches no rule.
    pub fn generate_for_frames<T: FrameTrace + ?Sized>(
        &mut self,
        use_counts: &[u32],
        trace: &T,
    ) -> Result<Vec<Vec<Pose>>, GenerateError> {
        let trace_frames = trace.frame_count();
        if use_counts.len() != trace_frames as usize {
            return Err(GenerateError::FrameCountMismatch {
                trace_frames,
                use_count_entries: use_counts.len(),
            });
        }

        let mut batches = Vec::with_capacity(use_counts.len());
        for (index, &count) in use_counts.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)] // index < trace_frames: u32
            let frame = index as u32;
            if count == 0 {
                batches.push(Vec::new());
                continue;
            }
            let rule = self
                .rules
                .first_match(frame, trace)
                .ok_or(GenerateError::NoMatchingRule { frame })?;
            let batch = assemble_frame(&rule.params, &self.sensor_names, count, frame, &mut self.rng)?;
            batches.push(batch);
        }

        if batches.len() != use_counts.len() {
            return Err(GenerateError::BatchCountMismatch {
                expected: use_counts.len(),
                actual: batches.len(),
            });
        }
        Ok(batches)
    }

    /// Generate poses for every frame and return them as one shuffled
    /// sequence.
    ///
    /// Composition of [`generate_for_frames`](Self::generate_for_frames)
    /// and [`flatten_and_shuffle`](crate::shuffle::flatten_and_shuffle).
    ///
    /// # Errors
    ///
    /// Propagates [`GenerateError`] from generation and the shuffle.
    pub fn generate_shuffled<T: FrameTrace + ?Sized>(
        &mut self,
        use_counts: &[u32],
        trace: &T,
    ) -> Result<Vec<Pose>, GenerateError> {
        let batches = self.generate_for_frames(use_counts, trace)?;
        let shuffled = flatten_and_shuffle(batches, self.require_unflipped_first, &mut self.rng)?;
        Ok(shuffled)
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn assemble_one<R: Rng + ?Sized>(
    params: &PerturbParams,
    sensor_names: &[String],
    rng: &mut R,
) -> Result<Pose, SampleError> {
    let mut pose = Pose {
        shift: params.shift.sample_bounded(rng)?,
        rotation: params.rotation.sample_bounded(rng)?,
        forward: params.forward.sample_bounded(rng)?,
        ..Pose::default()
    };
    // Sensor order only affects the draw sequence, never the semantics.
    for name in sensor_names {
        let yaw = params.sensor_yaw.sample_bounded(rng)?;
        pose.sensor_yaw.insert(name.clone(), yaw);
        let pitch = params.sensor_pitch.sample_bounded(rng)?;
        pose.sensor_pitch.insert(name.clone(), pitch);
        let roll = params.sensor_roll.sample_bounded(rng)?;
        pose.sensor_roll.insert(name.clone(), roll);
    }
    Ok(pose)
}

fn assemble_frame<R: Rng + ?Sized>(
    params: &PerturbParams,
    sensor_names: &[String],
    count: u32,
    frame: u32,
    rng: &mut R,
) -> Result<Vec<Pose>, SampleError> {
    let mut poses = Vec::with_capacity(count as usize);
    for position in 0..count {
        let mut pose = assemble_one(params, sensor_names, rng)?;
        pose.src_frame = frame;
        // Every other pose is mirrored, starting unflipped at position 0.
        if params.flip && position % 2 == 1 {
            pose = pose.flipped();
        }
        poses.push(pose);
    }
    Ok(poses)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
