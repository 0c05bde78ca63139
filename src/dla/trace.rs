//! Debug observability for the layout pipeline.
//!
//! The pipeline itself never branches on whether a listener is attached —
//! this is pure observability, wired the same way the crate's existing
//! `debug` module observes rendering. A caller that wants to see the
//! intermediate state of the pipeline (the lines a chain produced before
//! segment merging, the block a line was just consumed into) registers a
//! [`Tracer`]; a caller that doesn't care passes [`NullTracer`] (the
//! default) and pays no cost beyond a vtable call that immediately returns.

use crate::geometry::BoundingBox;

/// The pipeline stage a trace event was emitted from.
///
/// Named after the operation that just completed, matching the reference
/// engine's stage tags so debug captures line up with the stages described
/// in this crate's design notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A new line chain was just started.
    NewLine,
    /// Two line segments were just merged across a closed gap.
    MergeLineSegments,
    /// A line was just consumed into a block's chain.
    Consume,
}

impl Stage {
    /// The stage's tag, as it would appear in a debug dump filename or log
    /// line.
    pub fn tag(self) -> &'static str {
        match self {
            Stage::NewLine => "new_line",
            Stage::MergeLineSegments => "merge_line_segments",
            Stage::Consume => "consume",
        }
    }
}

/// Receives pipeline trace events.
///
/// Implementations that don't need debugging can use [`NullTracer`]
/// (the default for every pipeline entry point) and pay essentially no
/// cost.
pub trait Tracer {
    /// Called after `stage` completes, with the bounding boxes of whatever
    /// the stage just produced or consumed, grouped in whatever way is
    /// meaningful for that stage (e.g. one group per in-progress line).
    fn on_stage(&mut self, stage: Stage, page_index: usize, groups: &[Vec<BoundingBox>]);
}

/// A [`Tracer`] that discards every event. The default for every pipeline
/// call that doesn't pass an explicit tracer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn on_stage(&mut self, _stage: Stage, _page_index: usize, _groups: &[Vec<BoundingBox>]) {}
}

/// A [`Tracer`] that records every event it receives, in order. Intended
/// for tests and for the `dla_dump` CLI's `--debug-images` flag, which
/// replays the recorded groups as overlays via [`crate::debug`].
#[derive(Debug, Default, Clone)]
pub struct RecordingTracer {
    /// Every event received so far, in emission order.
    pub events: Vec<(Stage, usize, Vec<Vec<BoundingBox>>)>,
}

impl Tracer for RecordingTracer {
    fn on_stage(&mut self, stage: Stage, page_index: usize, groups: &[Vec<BoundingBox>]) {
        self.events.push((stage, page_index, groups.to_vec()));
    }
}
