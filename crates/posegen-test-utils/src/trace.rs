//! In-memory frame/label trace.

use std::collections::HashMap;

use posegen_core::labels::{FrameTrace, LabelConditions};

// ---------------------------------------------------------------------------
// TableTrace
// ---------------------------------------------------------------------------

/// A [`FrameTrace`] backed by an in-memory table of per-frame labels.
///
/// Stands in for the recorded label trace that production code reads from
/// disk.
#[derive(Debug, Clone, Default)]
pub struct TableTrace {
    frames: Vec<HashMap<String, String>>,
}

impl TableTrace {
    /// Create from per-frame label maps.
    pub fn new(frames: Vec<HashMap<String, String>>) -> Self {
        Self { frames }
    }

    /// Create from per-frame `(key, value)` rows.
    ///
    /// ```
    /// use posegen_test_utils::trace::TableTrace;
    ///
    /// let trace = TableTrace::from_rows(&[
    ///     &[("road_type", "highway"), ("user_label", "stable")],
    ///     &[("road_type", "local")],
    /// ]);
    /// ```
    pub fn from_rows(rows: &[&[(&str, &str)]]) -> Self {
        let frames = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                    .collect()
            })
            .collect();
        Self { frames }
    }

    /// Repeat one label row across `count` frames.
    pub fn repeated(row: &[(&str, &str)], count: u32) -> Self {
        let labels: HashMap<String, String> = row
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Self {
            frames: vec![labels; count as usize],
        }
    }
}

impl FrameTrace for TableTrace {
    #[allow(clippy::cast_possible_truncation)] // test fixtures stay far below u32::MAX frames
    fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    fn labels_match(&self, frame: u32, conditions: &LabelConditions) -> bool {
        let Some(labels) = self.frames.get(frame as usize) else {
            return false;
        };
        conditions
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
