//! Word-separation threshold estimation.
//!
//! Estimates the horizontal gap, in points, above which two adjacent
//! characters on the same line should be read as separated by a word
//! boundary rather than normal letter spacing. The estimate comes from a
//! smoothed histogram of the horizontal gaps between consecutive,
//! vertically-overlapping items in top-to-bottom/left-to-right order,
//! rather than a fixed fraction of font size, so it adapts to the
//! document's actual typesetting.

use crate::config::Tuning;
use crate::geometry::BoundingBox;

/// Estimate the word-separation threshold for a page from its items'
/// bounding boxes.
///
/// Builds a histogram of rounded horizontal gaps between items that
/// overlap vertically (i.e. are plausibly on the same line), applies a
/// ±1-bucket triangular smoothing pass, and takes the location of the
/// tallest smoothed bucket as the typical inter-character gap. The
/// returned threshold is that mode scaled by
/// [`Tuning::word_separation_threshold_multiplier`], clamped to at most
/// `mean_char_width * Tuning::max_wordsep_over_meanchar_ratio`.
pub fn compute_word_separation_threshold(
    items: &[BoundingBox],
    mean_char_width: f32,
    tuning: &Tuning,
) -> f32 {
    if items.len() < 2 || mean_char_width <= 0.0 {
        return 0.0;
    }

    // `items` is assumed already T2BL2R-sorted by the caller; only
    // consecutive pairs in that order are candidate same-line neighbours.
    // A pair further apart in the sort order is not adjacent on the page
    // even if it happens to share a row.
    let max_gap = tuning.max_wordsep_over_meanchar_ratio * mean_char_width;
    let mut histogram: Vec<u32> = Vec::new();

    for w in items.windows(2) {
        let (prev, next) = (&w[0], &w[1]);
        if prev.vertical_overlap(next) <= tuning.min_item_size {
            continue;
        }
        let dx = (next.left() - prev.right()).round();
        if dx < tuning.min_acknowledgable_distance || dx > max_gap {
            continue;
        }
        let idx = dx as usize;
        if idx >= histogram.len() {
            histogram.resize(idx + 1, 0);
        }
        histogram[idx] += 1;
    }

    if histogram.is_empty() {
        return 0.0;
    }

    // Triangular smoothing: each bucket gets its neighbors folded in with
    // half weight, so an isolated spike does not dominate the estimate.
    let smoothed: Vec<f32> = (0..histogram.len())
        .map(|i| {
            let center = histogram[i] as f32;
            let left = if i > 0 { histogram[i - 1] as f32 } else { 0.0 };
            let right = if i + 1 < histogram.len() {
                histogram[i + 1] as f32
            } else {
                0.0
            };
            center + 0.5 * left + 0.5 * right
        })
        .collect();

    let mode = smoothed
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(idx, _)| idx as f32)
        .unwrap_or(0.0);

    let threshold = mode * tuning.word_separation_threshold_multiplier;
    let cap = mean_char_width * tuning.max_wordsep_over_meanchar_ratio;
    threshold.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x: f32, y: f32, w: f32, h: f32) -> BoundingBox {
        BoundingBox::new(x, y, w, h)
    }

    #[test]
    fn empty_input_returns_zero() {
        let tuning = Tuning::default();
        assert_eq!(compute_word_separation_threshold(&[], 10.0, &tuning), 0.0);
    }

    #[test]
    fn no_qualifying_gap_returns_zero() {
        let tuning = Tuning::default();
        // Every pair is either too close together (below
        // min_acknowledgable_distance) or doesn't overlap vertically, so no
        // gap ever lands in the histogram.
        let items = vec![
            bbox(0.0, 0.0, 10.0, 10.0),
            bbox(500.0, 500.0, 10.0, 10.0),
        ];
        assert_eq!(compute_word_separation_threshold(&items, 10.0, &tuning), 0.0);
    }

    #[test]
    fn threshold_is_capped_by_mean_char_width_ratio() {
        let tuning = Tuning::default();
        // Large, consistent gaps should saturate at the cap rather than
        // grow unbounded.
        let items: Vec<_> = (0..6)
            .map(|i| bbox(i as f32 * 200.0, 0.0, 5.0, 10.0))
            .collect();
        let threshold = compute_word_separation_threshold(&items, 10.0, &tuning);
        assert!(threshold <= 10.0 * tuning.max_wordsep_over_meanchar_ratio + 1e-3);
    }

    #[test]
    fn small_consistent_gaps_yield_small_threshold() {
        let tuning = Tuning::default();
        let items: Vec<_> = (0..10)
            .map(|i| bbox(i as f32 * 12.0, 0.0, 8.0, 10.0))
            .collect();
        let threshold = compute_word_separation_threshold(&items, 8.0, &tuning);
        assert!(threshold > 0.0);
        assert!(threshold < 20.0);
    }
}
