//! Pipeline checkpoint reporting.
//!
//! The repository and the acquirer report each stage they enter and leave
//! through a [`PipelineObserver`] handed to them at construction. Business
//! logic never calls the logger directly.

use std::fmt;

use tracing::{debug, info, warn};

/// A checkpoint in the image ingestion and persistence pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Obtaining a local image handle from the device.
    Acquire,
    /// Reading and decoding the local resource.
    Encode,
    /// Uploading the payload to the object bucket.
    Upload,
    /// Writing to the structured store.
    Persist,
}

impl PipelineStage {
    /// Stable lowercase name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acquire => "acquire",
            Self::Encode => "encode",
            Self::Upload => "upload",
            Self::Persist => "persist",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened at a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome<'a> {
    /// The stage began.
    Started,
    /// The stage finished; `detail` carries a key, locator or record id.
    Completed {
        /// Optional identifying detail.
        detail: Option<&'a str>,
    },
    /// The stage failed and the pipeline stops here.
    Failed {
        /// Human-readable failure reason.
        reason: &'a str,
    },
}

/// Receives pipeline checkpoints.
pub trait PipelineObserver: Send + Sync {
    /// Records one checkpoint.
    fn record(&self, stage: PipelineStage, outcome: StageOutcome<'_>);
}

/// Emits every checkpoint as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn record(&self, stage: PipelineStage, outcome: StageOutcome<'_>) {
        match outcome {
            StageOutcome::Started => debug!(stage = %stage, "pipeline stage started"),
            StageOutcome::Completed { detail } => {
                info!(stage = %stage, detail = detail.unwrap_or("-"), "pipeline stage completed");
            }
            StageOutcome::Failed { reason } => {
                warn!(stage = %stage, reason, "pipeline stage failed");
            }
        }
    }
}

/// Discards every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn record(&self, _stage: PipelineStage, _outcome: StageOutcome<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(PipelineStage::Acquire.to_string(), "acquire");
        assert_eq!(PipelineStage::Encode.to_string(), "encode");
        assert_eq!(PipelineStage::Upload.to_string(), "upload");
        assert_eq!(PipelineStage::Persist.to_string(), "persist");
    }

    #[test]
    fn test_builtin_observers_accept_every_outcome() {
        let observers: [&dyn PipelineObserver; 2] = [&TracingObserver, &NoopObserver];
        for observer in observers {
            observer.record(PipelineStage::Upload, StageOutcome::Started);
            observer.record(
                PipelineStage::Upload,
                StageOutcome::Completed {
                    detail: Some("1700000000000_abc123.jpg"),
                },
            );
            observer.record(
                PipelineStage::Persist,
                StageOutcome::Failed {
                    reason: "connection reset",
                },
            );
        }
    }
}
