//! A line: a left-to-right chain of items sharing one text baseline.

use crate::geometry::BoundingBox;

/// Whether a line's leading item marks it as part of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    /// Not a list item.
    #[default]
    None,
    /// Starts with a bullet glyph.
    Bulleted,
    /// Starts with a number/letter followed by a separator (`1.`, `a)`...).
    Numbered,
}

/// One line of content: an ordered run of item indices sharing a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct DocLine {
    /// Extent of the line (union of its items' bboxes).
    pub bbox: BoundingBox,
    /// The line's text baseline, in page space.
    pub baseline: f32,
    /// Indices into the page's item arena, in reading order.
    pub items: Vec<usize>,
    /// List-marker classification of the line's first item.
    pub list_kind: ListKind,
    /// Left edge of the line's text, excluding a leading list marker.
    pub text_left: f32,
}

impl DocLine {
    /// Baseline estimate from a set of item baselines: the mean of the
    /// values lying within one standard deviation of the raw mean.
    ///
    /// Mirrors the reference engine's outlier-trimmed baseline estimator:
    /// despite that routine's name suggesting outliers are kept, it is the
    /// in-range items — those within one stddev of the mean — that are
    /// averaged to produce the final baseline. An item whose baseline sits
    /// far from the rest (a superscript, a stray mark) is excluded rather
    /// than allowed to pull the estimate off the visual text line.
    pub fn compute_baseline(baselines: &[f32]) -> f32 {
        if baselines.is_empty() {
            return 0.0;
        }
        let mean = baselines.iter().sum::<f32>() / baselines.len() as f32;
        if baselines.len() == 1 {
            return mean;
        }
        let variance =
            baselines.iter().map(|b| (b - mean).powi(2)).sum::<f32>() / baselines.len() as f32;
        let stddev = variance.sqrt();

        let in_range: Vec<f32> = baselines
            .iter()
            .copied()
            .filter(|b| (b - mean).abs() <= stddev)
            .collect();

        if in_range.is_empty() {
            mean
        } else {
            in_range.iter().sum::<f32>() / in_range.len() as f32
        }
    }
}
