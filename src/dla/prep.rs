//! Preliminary page preparation: split items into characters and
//! figure-like obstacles, filter out rotated text, compute page-wide
//! averages, and build the obstacle blobs the whitespace cover search
//! runs against.

use crate::config::Tuning;
use crate::geometry::BoundingBox;

use super::item::DocItem;

/// The page-wide quantities every later stage of the pipeline reads.
pub struct PreparedPage {
    /// Indices of character items, sorted top-to-bottom, left-to-right.
    pub char_indices: Vec<usize>,
    /// Indices of figure-like (image / solid-rectangle) items.
    pub figure_indices: Vec<usize>,
    /// Mean width of a character item's bounding box.
    pub mean_char_width: f32,
    /// Mean height of a character item's bounding box.
    pub mean_char_height: f32,
    /// Estimated horizontal gap, in points, that separates two words.
    pub word_separation_threshold: f32,
    /// Whitespace-cover rectangles computed over the merged obstacle blobs
    /// of every character and figure item.
    pub whitespace_cover: Vec<BoundingBox>,
}

/// Sort items top-to-bottom, then left-to-right — the reading order the
/// rest of the pipeline assumes indices are delivered in.
pub fn sort_top_to_bottom_left_to_right(indices: &mut [usize], items: &[DocItem]) {
    indices.sort_by(|&a, &b| {
        let ba = &items[a].bbox;
        let bb = &items[b].bbox;
        ba.top()
            .partial_cmp(&bb.top())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| ba.left().partial_cmp(&bb.left()).unwrap_or(std::cmp::Ordering::Equal))
    });
}

/// Phase 1 of obstacle-blob construction: greedily fold consecutive,
/// T2BL2R-sorted glyphs into per-line-fragment blobs.
///
/// A glyph is folded into the running blob when the horizontal gap to the
/// previous glyph is below `max(word_sep, min(prev.h, this.h))` and the two
/// glyphs' vertical-overlap ratio exceeds 0.5 — the same-word/same-line test
/// spec.md's obstacle construction names, evaluated between each glyph and
/// its immediate predecessor in sort order rather than against the
/// running union, so a long blob can't "coast" on its own growing height.
fn build_line_blobs(sorted_char_boxes: &[BoundingBox], word_sep: f32) -> Vec<BoundingBox> {
    let mut blobs: Vec<BoundingBox> = Vec::new();
    let mut current: Option<BoundingBox> = None;
    let mut prev: Option<BoundingBox> = None;

    for &b in sorted_char_boxes {
        if let (Some(cur), Some(p)) = (current, prev) {
            let dx = b.left() - p.right();
            let threshold = word_sep.max(p.height.min(b.height));
            let same_line_enough = p.vertical_overlap_ratio(&b) > 0.5;
            if dx < threshold && same_line_enough {
                current = Some(cur.union(&b));
            } else {
                blobs.push(cur);
                current = Some(b);
            }
        } else {
            current = Some(b);
        }
        prev = Some(b);
    }
    if let Some(cur) = current {
        blobs.push(cur);
    }

    blobs
}

/// Phase 2: iteratively merge line-blobs to a fixpoint using the
/// asymmetric adjacency rule spec.md's obstacle construction documents:
/// horizontal overlap greater than a full mean character height (the blobs
/// must actually overlap in X, not merely sit close) *and* vertical overlap
/// greater than `-mean_char_height` (vertically adjacent with room to
/// spare) — distinct from the symmetric "gap narrower than one mean
/// character height on either axis" test used elsewhere in this module.
fn merge_line_blobs(mut blobs: Vec<BoundingBox>, mean_char_height: f32) -> Vec<BoundingBox> {
    loop {
        let mut merged_any = false;
        let mut i = 0;
        'outer: while i < blobs.len() {
            let mut j = i + 1;
            while j < blobs.len() {
                if blobs[i].horizontal_overlap(&blobs[j]) > mean_char_height
                    && blobs[i].vertical_overlap(&blobs[j]) > -mean_char_height
                {
                    blobs[i] = blobs[i].union(&blobs[j]);
                    blobs.remove(j);
                    merged_any = true;
                    continue 'outer;
                }
                j += 1;
            }
            i += 1;
        }
        if !merged_any {
            break;
        }
    }

    blobs
}

/// Build the whitespace-cover obstacle set from a page's characters and
/// figure candidates.
///
/// Two-phase, per spec.md §4.4 "Obstacles": first [`build_line_blobs`]
/// greedily aggregates T2BL2R-sorted glyphs into per-line-fragment blobs,
/// then [`merge_line_blobs`] folds those blobs together to a fixpoint under
/// the asymmetric adjacency rule. Figure-candidate boxes are appended to
/// the result unmerged — they are obstacles in their own right, not
/// further consolidated with the text blobs.
pub fn merge_into_blobs(sorted_char_boxes: &[BoundingBox], figure_boxes: &[BoundingBox], mean_char_height: f32, word_sep: f32) -> Vec<BoundingBox> {
    let mean_char_height = mean_char_height.max(0.01);
    let line_blobs = build_line_blobs(sorted_char_boxes, word_sep);
    let mut blobs = merge_line_blobs(line_blobs, mean_char_height);
    blobs.extend_from_slice(figure_boxes);
    blobs
}

/// Run preliminary preparation over a page's items.
///
/// `items` must already be the full per-page arena (the same slice whose
/// indices every later stage indexes into). `page_bbox` is the page's real
/// rectangle (the MediaBox, in the same coordinate space as `items`) — the
/// whitespace-cover search runs over the page itself, not merely the
/// convex hull of whatever items happen to be on it, so that a cover
/// rectangle can reach all the way to a page margin.
pub fn prepare(items: &[DocItem], page_bbox: BoundingBox, tuning: &Tuning) -> PreparedPage {
    let mut char_indices: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_char() && item.baseline_angle().abs() < tuning.max_baseline_angle_radians)
        .map(|(idx, _)| idx)
        .collect();

    sort_top_to_bottom_left_to_right(&mut char_indices, items);

    let (mean_char_width, mean_char_height) = if char_indices.is_empty() {
        (0.0, 0.0)
    } else {
        let n = char_indices.len() as f32;
        let sum_w: f32 = char_indices.iter().map(|&i| items[i].bbox.width).sum();
        let sum_h: f32 = char_indices.iter().map(|&i| items[i].bbox.height).sum();
        (sum_w / n, sum_h / n)
    };

    let char_boxes: Vec<BoundingBox> = char_indices.iter().map(|&i| items[i].bbox).collect();
    let word_separation_threshold =
        super::wordsep::compute_word_separation_threshold(&char_boxes, mean_char_width, tuning);

    // Every non-character item is a figure candidate, but only the ones small
    // enough to plausibly be a diagram or photo (rather than a full-bleed
    // background fill) act as whitespace-cover obstacles or later feed figure
    // aggregation.
    let page_area = page_bbox.area();
    let figure_indices: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_char())
        .filter(|(_, item)| page_area <= 0.0 || item.bbox.area() <= tuning.max_image_blob_area_fraction * page_area)
        .map(|(idx, _)| idx)
        .collect();

    let figure_boxes: Vec<BoundingBox> = figure_indices.iter().map(|&i| items[i].bbox).collect();
    let blobs = merge_into_blobs(&char_boxes, &figure_boxes, mean_char_height, word_separation_threshold);

    let whitespace_cover = super::cover::compute_whitespace_cover(page_bbox, &blobs, mean_char_height, tuning);

    PreparedPage {
        char_indices,
        figure_indices,
        mean_char_width,
        mean_char_height,
        word_separation_threshold,
        whitespace_cover,
    }
}
