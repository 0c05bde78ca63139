//! Whitespace cover: the set of tall, obstacle-free rectangles carved out
//! of a region, used to veto merges that would cross a visible gutter.
//!
//! This is a best-first search over candidate rectangles. Starting from
//! the full region, each step pops the highest-scoring acceptable
//! candidate, finds an obstacle that intersects it, and splits the
//! candidate into the up to four sub-rectangles that remain once that
//! obstacle (inflated by a minimum item size on every side) is carved out.
//! A candidate that clears the obstacle entirely, or whose score has
//! already dropped below 1, is kept as a cover rectangle rather than
//! subdivided further; the search stops once the cover budget is
//! exhausted or no candidate is left to split.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::config::Tuning;
use crate::geometry::BoundingBox;

/// A scored search candidate, ordered so a [`BinaryHeap`] pops the
/// highest-scoring rectangle first.
struct Candidate {
    rect: BoundingBox,
    score: f32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}
impl Eq for Candidate {}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.partial_cmp(&other.score).unwrap_or(Ordering::Equal)
    }
}

fn candidate_is_acceptable(rect: &BoundingBox, mean_char_height: f32, tuning: &Tuning) -> bool {
    let min_leg = tuning.min_cover_size.max(mean_char_height);
    rect.width >= min_leg
        && rect.height >= 3.0 * min_leg
        && 2.0 * (rect.width + rect.height) >= tuning.min_cover_perimeter
        && rect.area() >= tuning.min_cover_area
}

/// Score favoring tall, thin rectangles (vertical gutters) over squat
/// ones. Below `WLT` the score is dominated by the "thin leg" term
/// (`h + w`); above `WHT` it is purely `2h` (reward height regardless of
/// width); between the two a cosine interpolation blends smoothly from one
/// regime to the other rather than jumping at the threshold.
fn candidate_score(rect: &BoundingBox, mean_char_height: f32) -> f32 {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return 0.0;
    }
    let wlt = 4.0f32.min(2.0 * mean_char_height);
    let wht = 8.0f32.min(4.0 * mean_char_height);
    let thin_leg = rect.height + rect.width;
    let thick_leg = 2.0 * rect.height;

    if rect.width <= wlt {
        thin_leg
    } else if rect.width >= wht {
        thick_leg
    } else {
        let span = (wht - wlt).max(1e-6);
        let t = (rect.width - wlt) / span;
        let blend = (1.0 - (t * std::f32::consts::PI).cos()) / 2.0;
        thin_leg * (1.0 - blend) + thick_leg * blend
    }
}

/// Split `region` around `obstacle`, returning the up-to-four remaining
/// sub-rectangles (above, below, left, right of the obstacle, each
/// clipped to `region`). Sub-rectangles narrower or shorter than
/// `min_item_size` are dropped.
fn split_around_obstacle(region: &BoundingBox, obstacle: &BoundingBox, min_item_size: f32) -> Vec<BoundingBox> {
    let mut pieces = Vec::with_capacity(4);

    if obstacle.top() - region.top() > min_item_size {
        pieces.push(BoundingBox::from_points(
            region.left(),
            region.top(),
            region.right(),
            obstacle.top(),
        ));
    }
    if region.bottom() - obstacle.bottom() > min_item_size {
        pieces.push(BoundingBox::from_points(
            region.left(),
            obstacle.bottom(),
            region.right(),
            region.bottom(),
        ));
    }
    if obstacle.left() - region.left() > min_item_size {
        pieces.push(BoundingBox::from_points(
            region.left(),
            region.top(),
            obstacle.left(),
            region.bottom(),
        ));
    }
    if region.right() - obstacle.right() > min_item_size {
        pieces.push(BoundingBox::from_points(
            obstacle.right(),
            region.top(),
            region.right(),
            region.bottom(),
        ));
    }

    pieces
}

/// Find the obstacle with the largest area that intersects `region` by more
/// than `min_item_size` on both axes.
///
/// Splitting around the biggest obstacle first, rather than whichever one
/// happens to come first in the list, keeps the search converging on the
/// largest whitespace pieces early instead of fragmenting the region on a
/// string of small obstacles.
fn largest_intersecting<'a>(
    region: &BoundingBox,
    obstacles: &'a [BoundingBox],
    min_item_size: f32,
) -> Option<&'a BoundingBox> {
    obstacles
        .iter()
        .filter(|obstacle| region.has_intersection(obstacle, min_item_size))
        .max_by(|a, b| a.area().partial_cmp(&b.area()).unwrap_or(Ordering::Equal))
}

/// After the search settles on a set of cover rectangles, extend each one
/// horizontally across any neighboring cover rectangle it vertically
/// overlaps and abuts, widest first, absorbing the narrower one. This
/// recovers gutters the obstacle-splitting search leaves fragmented into
/// several abutting slivers of the same visible whitespace column.
fn extend_and_absorb(mut cover: Vec<BoundingBox>, tuning: &Tuning) -> Vec<BoundingBox> {
    cover.sort_by(|a, b| b.height.partial_cmp(&a.height).unwrap_or(Ordering::Equal));

    let mut merged: Vec<BoundingBox> = Vec::with_capacity(cover.len());
    'outer: for rect in cover {
        for existing in merged.iter_mut() {
            let vertical_overlap = existing.top().max(rect.top()) < existing.bottom().min(rect.bottom());
            let abuts = (existing.right() - rect.left()).abs() <= tuning.min_item_size
                || (rect.right() - existing.left()).abs() <= tuning.min_item_size;
            if vertical_overlap && abuts {
                *existing = existing.union(&rect);
                continue 'outer;
            }
        }
        merged.push(rect);
    }

    merged
}

/// Compute the whitespace cover of `region` given a set of obstacle
/// rectangles (already merged into blobs by the caller) and the page's
/// mean character height (used to scale the acceptance and scoring
/// thresholds to the document's own text size).
///
/// Returns at most `Tuning::max_cover_items` rectangles, each acceptable
/// per [`candidate_is_acceptable`], sorted by descending score (so the
/// most gutter-like rectangles come first).
pub fn compute_whitespace_cover(
    region: BoundingBox,
    obstacles: &[BoundingBox],
    mean_char_height: f32,
    tuning: &Tuning,
) -> Vec<BoundingBox> {
    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        score: candidate_score(&region, mean_char_height),
        rect: region,
    });

    let mut cover = Vec::new();
    let mut visited = 0usize;
    // Generous bound on search steps so a pathological obstacle layout
    // cannot loop forever; in practice the heap drains well before this.
    let max_steps = tuning.max_cover_items * 64 + 256;

    while let Some(candidate) = heap.pop() {
        if cover.len() >= tuning.max_cover_items || visited >= max_steps {
            break;
        }
        visited += 1;

        let obstacle = largest_intersecting(&candidate.rect, obstacles, tuning.min_item_size);

        // No obstacle left to carve out, or the candidate has already
        // shrunk below score 1 — either way stop subdividing and emit it
        // (if it's acceptable) rather than splitting it further.
        if obstacle.is_none() || candidate.score < 1.0 {
            if candidate_is_acceptable(&candidate.rect, mean_char_height, tuning) {
                cover.push(candidate.rect);
            }
            continue;
        }

        for piece in split_around_obstacle(&candidate.rect, obstacle.unwrap(), tuning.min_item_size) {
            if candidate_is_acceptable(&piece, mean_char_height, tuning) {
                heap.push(Candidate {
                    score: candidate_score(&piece, mean_char_height),
                    rect: piece,
                });
            }
        }
    }

    let mut cover = extend_and_absorb(cover, tuning);
    cover.sort_by(|a, b| {
        candidate_score(b, mean_char_height)
            .partial_cmp(&candidate_score(a, mean_char_height))
            .unwrap_or(Ordering::Equal)
    });
    cover
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_obstacles_yields_whole_region_if_acceptable() {
        let tuning = Tuning::default();
        let region = BoundingBox::new(0.0, 0.0, 600.0, 800.0);
        let cover = compute_whitespace_cover(region, &[], 8.0, &tuning);
        assert_eq!(cover.len(), 1);
        assert_eq!(cover[0], region);
    }

    #[test]
    fn single_central_obstacle_splits_region_into_four() {
        let tuning = Tuning::default();
        let region = BoundingBox::new(0.0, 0.0, 600.0, 800.0);
        let obstacle = BoundingBox::new(250.0, 350.0, 100.0, 100.0);
        let cover = compute_whitespace_cover(region, &[obstacle], 8.0, &tuning);
        assert!(!cover.is_empty());
        for rect in &cover {
            assert!(!rect.has_intersection(&obstacle, tuning.min_item_size));
        }
    }

    #[test]
    fn two_column_gutter_is_found() {
        let tuning = Tuning::default();
        let region = BoundingBox::new(0.0, 0.0, 600.0, 800.0);
        // Two tall obstacle columns leaving a vertical gutter in the middle.
        let left_col = BoundingBox::new(0.0, 0.0, 270.0, 800.0);
        let right_col = BoundingBox::new(330.0, 0.0, 270.0, 800.0);
        let cover = compute_whitespace_cover(region, &[left_col, right_col], 8.0, &tuning);
        let gutter = cover.iter().find(|r| r.left() >= 270.0 - 1.0 && r.right() <= 330.0 + 1.0);
        assert!(gutter.is_some(), "expected a vertical gutter rectangle in {:?}", cover);
    }

    #[test]
    fn acceptance_scales_with_mean_char_height() {
        let tuning = Tuning::default();
        // A squat rectangle, shorter than 3x a large mean character height,
        // should be rejected even though it clears the tuning-only minimums.
        let squat = BoundingBox::new(0.0, 0.0, 50.0, 20.0);
        assert!(candidate_is_acceptable(&squat, 4.0, &tuning));
        assert!(!candidate_is_acceptable(&squat, 10.0, &tuning));
    }
}
