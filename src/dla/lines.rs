//! Line formation: group characters (and nearby figures) into `DocLine`s
//! using left/right neighbor graphs, a greedy chaining walk, and the
//! whitespace cover as a veto on crossing a visible gutter.

use std::cmp::Ordering;

use crate::config::Tuning;
use crate::geometry::BoundingBox;

use super::item::{DocItem, DocItemKind};
use super::line::{DocLine, ListKind};

/// Whether two item bounding boxes sit on the same visual text line.
///
/// When one item is less than half the height of the other (a subscript,
/// a dot, a stray mark), only a strict, tolerance-sized vertical overlap
/// is required. Otherwise the two must share at least half of the
/// shorter item's height, so two adjacent but vertically offset lines of
/// comparable type size are not folded together.
pub fn same_line(a: &BoundingBox, b: &BoundingBox, min_item_size: f32) -> bool {
    let shorter_h = a.height.min(b.height);
    let taller_h = a.height.max(b.height);
    let overlap = a.vertical_overlap(b);
    if taller_h > 0.0 && shorter_h < 0.5 * taller_h {
        overlap > min_item_size
    } else {
        overlap > 0.5 * shorter_h
    }
}

/// Horizontal-overlap threshold distinguishing a "real overlap" candidate
/// from a "gap" candidate during right-neighbour tie-breaking.
const HORZ: f32 = -1.0;

/// Find `a`'s right-neighbour: the char that most convincingly continues
/// its line immediately to the right.
///
/// A candidate `b` qualifies when (1) it overlaps `a` vertically by more
/// than `min_item_size`, (2) it is not too far to the right — horizontal
/// overlap no smaller than `-2 * max(a.h, b.h)` — and (3) `a`'s center sits
/// left of `b`'s and the pair's vertical overlap exceeds its horizontal
/// overlap (so a glyph diagonally below-right, which would pass (1) and
/// (2), doesn't also pass as "beside" `a`). Among qualifying candidates,
/// one with real horizontal overlap (`>= HORZ`) always beats one that is
/// only a gap away; between two of the same kind, larger vertical overlap
/// wins for real-overlap candidates and larger horizontal overlap wins for
/// gap candidates.
fn right_neighbour(a: usize, char_order: &[usize], items: &[DocItem], tuning: &Tuning) -> Option<usize> {
    let ba = &items[a].bbox;
    let mut best: Option<(usize, f32, f32)> = None; // (idx, h_overlap, v_overlap)

    for &b in char_order {
        if a == b {
            continue;
        }
        let bb = &items[b].bbox;

        let v_overlap = ba.vertical_overlap(bb);
        if v_overlap <= tuning.min_item_size {
            continue;
        }

        let max_h = ba.height.max(bb.height);
        let h_overlap = ba.horizontal_overlap(bb);
        if h_overlap < -2.0 * max_h {
            continue;
        }

        if !(ba.center().x < bb.center().x && v_overlap > h_overlap) {
            continue;
        }

        best = Some(match best {
            None => (b, h_overlap, v_overlap),
            Some((cur, cur_h, cur_v)) => {
                let cur_ok = cur_h >= HORZ;
                let cand_ok = h_overlap >= HORZ;
                let candidate_wins = match (cand_ok, cur_ok) {
                    (true, true) => v_overlap > cur_v,
                    (true, false) => true,
                    (false, true) => false,
                    (false, false) => h_overlap > cur_h,
                };
                if candidate_wins {
                    (b, h_overlap, v_overlap)
                } else {
                    (cur, cur_h, cur_v)
                }
            },
        });
    }

    best.map(|(b, _, _)| b)
}

/// Build the per-item right-neighbor and left-neighbor maps over a page's
/// character items, indexed by item index (`None` where an item has no
/// neighbor in that direction, e.g. a line's first or last character).
///
/// The left map is not computed from its own mirrored criteria: per
/// spec.md §4.5, `left_neighbour(right_neighbour(a)) = a` — the left map is
/// simply the inverse of whichever right-neighbour assignments exist,
/// built in `char_order` so a collision (two chars claiming the same right
/// neighbour, which the criteria above make rare but not impossible)
/// resolves deterministically to the last assignment in reading order.
fn build_neighbor_maps(
    items: &[DocItem],
    char_order: &[usize],
    tuning: &Tuning,
) -> (Vec<Option<usize>>, Vec<Option<usize>>) {
    let n = items.len();
    let mut right = vec![None; n];
    let mut left = vec![None; n];
    for &a in char_order {
        right[a] = right_neighbour(a, char_order, items, tuning);
        if let Some(b) = right[a] {
            left[b] = Some(a);
        }
    }
    (right, left)
}

/// Whether the gap between `union_so_far` and `next_bbox` is bridged by a
/// whitespace-cover rectangle spanning (close to) the merged line's full
/// height — a visible gutter the line should not be chained across.
fn cover_splits(union_so_far: &BoundingBox, next_bbox: &BoundingBox, cover: &[BoundingBox], min_item_size: f32) -> bool {
    let gap_left = union_so_far.right();
    let gap_right = next_bbox.left();
    if gap_right - gap_left <= min_item_size {
        return false;
    }
    let merged = union_so_far.union(next_bbox);
    let gap_rect = BoundingBox::from_points(gap_left, merged.top(), gap_right, merged.bottom());
    cover
        .iter()
        .any(|c| c.has_intersection(&gap_rect, min_item_size) && c.height > merged.height - min_item_size)
}

fn finish_line(item_indices: Vec<usize>, items: &[DocItem]) -> DocLine {
    let bbox = item_indices
        .iter()
        .map(|&i| items[i].bbox)
        .fold(None, |acc: Option<BoundingBox>, b| Some(acc.map_or(b, |a| a.union(&b))))
        .unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0));

    let baselines: Vec<f32> = item_indices
        .iter()
        .filter_map(|&i| match items[i].kind {
            DocItemKind::Char { baseline, .. } => Some(baseline),
            _ => None,
        })
        .collect();
    let baseline = DocLine::compute_baseline(&baselines);

    let list_kind = detect_list_kind(&item_indices, items);

    DocLine {
        bbox,
        baseline,
        items: item_indices,
        list_kind,
        text_left: bbox.left(),
    }
}

/// Recognize a leading bullet or a numbered/lettered marker (`1.`, `a)`)
/// from the first one or two characters of a line.
fn detect_list_kind(item_indices: &[usize], items: &[DocItem]) -> ListKind {
    const BULLETS: &[u32] = &[0x2022, 0x25CF, 0x25AA, 0x2023, 0x2043, 0x002D, 0x002A];

    let mut chars = item_indices.iter().filter_map(|&i| match items[i].kind {
        DocItemKind::Char { codepoint, .. } => Some(codepoint),
        _ => None,
    });

    let Some(first) = chars.next() else {
        return ListKind::None;
    };

    if BULLETS.contains(&first) {
        return ListKind::Bulleted;
    }

    let is_alnum = char::from_u32(first).is_some_and(|c| c.is_ascii_alphanumeric());
    if is_alnum {
        if let Some(second) = chars.next() {
            if matches!(char::from_u32(second), Some('.') | Some(')')) {
                return ListKind::Numbered;
            }
        }
    }

    ListKind::None
}

/// Absorb figure-like items into the text line they sit inline with (an
/// inline icon, a small diagram marker), per the size and overlap
/// tolerances observed in the reference engine. A figure too tall, or
/// spatially unrelated to every line, is left for block-level figure
/// aggregation instead.
fn absorb_figures(lines: &mut [DocLine], items: &[DocItem], figure_indices: &[usize], mean_char_height: f32) {
    let mean_char_height = mean_char_height.max(0.1);
    let mut absorbed = vec![false; items.len()];

    for line in lines.iter_mut() {
        for &fi in figure_indices {
            if absorbed[fi] {
                continue;
            }
            let fbbox = items[fi].bbox;
            if fbbox.height > 2.0 * mean_char_height {
                continue;
            }
            if line.bbox.height > 0.0 && fbbox.height >= 1.5 * line.bbox.height {
                continue;
            }
            let h_overlap = fbbox.horizontal_overlap(&line.bbox);
            let v_overlap = fbbox.vertical_overlap(&line.bbox);
            if h_overlap > -2.0 * mean_char_height && v_overlap > -4.0 {
                line.items.push(fi);
                line.bbox = line.bbox.union(&fbbox);
                absorbed[fi] = true;
            }
        }
        line.items.sort_by(|&a, &b| {
            items[a]
                .bbox
                .left()
                .partial_cmp(&items[b].bbox.left())
                .unwrap_or(Ordering::Equal)
        });
    }
}

/// Merge line fragments that were split by a now-irrelevant whitespace
/// gap but sit on the same visual baseline band — the counterpart to a
/// column boundary that, once the two fragments are considered together,
/// no longer separates them by a full-height gutter.
fn merge_line_segments(mut lines: Vec<DocLine>, items: &[DocItem], cover: &[BoundingBox], tuning: &Tuning) -> Vec<DocLine> {
    lines.sort_by(|a, b| a.bbox.left().partial_cmp(&b.bbox.left()).unwrap_or(Ordering::Equal));

    let mut merged: Vec<DocLine> = Vec::new();
    'outer: for line in lines {
        for existing in merged.iter_mut() {
            if !same_line(&existing.bbox, &line.bbox, tuning.min_item_size) {
                continue;
            }
            let max_h = existing.bbox.height.max(line.bbox.height);
            let gap = existing.bbox.horizontal_overlap(&line.bbox);
            if gap < -max_h {
                continue;
            }
            let union = existing.bbox.union(&line.bbox);
            let still_split = cover
                .iter()
                .any(|c| c.vertical_overlap(&union) > 3.0 && c.has_intersection(&union, tuning.min_item_size));
            if still_split {
                continue;
            }

            existing.items.extend(line.items.iter().copied());
            existing.items.sort_by(|&a, &b| {
                items[a]
                    .bbox
                    .left()
                    .partial_cmp(&items[b].bbox.left())
                    .unwrap_or(Ordering::Equal)
            });
            existing.bbox = union;
            let baselines: Vec<f32> = existing
                .items
                .iter()
                .filter_map(|&i| match items[i].kind {
                    DocItemKind::Char { baseline, .. } => Some(baseline),
                    _ => None,
                })
                .collect();
            existing.baseline = DocLine::compute_baseline(&baselines);
            existing.text_left = existing.bbox.left();
            continue 'outer;
        }
        merged.push(line);
    }

    merged.sort_by(|a, b| {
        a.bbox
            .top()
            .partial_cmp(&b.bbox.top())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.bbox.left().partial_cmp(&b.bbox.left()).unwrap_or(Ordering::Equal))
    });
    merged
}

/// Form the page's lines from its prepared character items.
///
/// `char_order` must already be top-to-bottom, left-to-right sorted (see
/// [`super::prep::prepare`]). `figure_indices` are figure-like items
/// eligible for inline absorption into a line.
pub fn form_lines(
    items: &[DocItem],
    char_order: &[usize],
    figure_indices: &[usize],
    cover: &[BoundingBox],
    mean_char_height: f32,
    tuning: &Tuning,
) -> Vec<DocLine> {
    if char_order.is_empty() {
        return Vec::new();
    }

    let (right, left) = build_neighbor_maps(items, char_order, tuning);
    let mut used = vec![false; items.len()];
    let mut lines = Vec::new();

    for &start_candidate in char_order {
        if used[start_candidate] {
            continue;
        }

        let mut start = start_candidate;
        while let Some(prev) = left[start] {
            if used[prev] {
                break;
            }
            start = prev;
        }

        let mut current = vec![start];
        used[start] = true;
        let mut union_bbox = items[start].bbox;
        let mut cursor = start;

        loop {
            let next = match right[cursor] {
                Some(n) if !used[n] => n,
                _ => break,
            };

            if cover_splits(&union_bbox, &items[next].bbox, cover, tuning.min_item_size) {
                lines.push(finish_line(std::mem::take(&mut current), items));
                current = vec![next];
                used[next] = true;
                union_bbox = items[next].bbox;
                cursor = next;
                continue;
            }

            current.push(next);
            used[next] = true;
            union_bbox = union_bbox.union(&items[next].bbox);
            cursor = next;
        }

        lines.push(finish_line(current, items));
    }

    absorb_figures(&mut lines, items, figure_indices, mean_char_height);
    merge_line_segments(lines, items, cover, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dla::item::DocItem;

    fn char_item(x: f32, y: f32, w: f32, h: f32) -> DocItem {
        DocItem::char(BoundingBox::new(x, y, w, h), 'x' as u32, y + h, h, 0.0, 0.0)
    }

    #[test]
    fn simple_run_becomes_one_line() {
        let tuning = Tuning::default();
        let items = vec![
            char_item(0.0, 0.0, 8.0, 10.0),
            char_item(9.0, 0.0, 8.0, 10.0),
            char_item(18.0, 0.0, 8.0, 10.0),
        ];
        let char_order = vec![0, 1, 2];
        let lines = form_lines(&items, &char_order, &[], &[], 10.0, &tuning);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].items.len(), 3);
    }

    #[test]
    fn two_stacked_lines_stay_separate() {
        let tuning = Tuning::default();
        let items = vec![
            char_item(0.0, 0.0, 8.0, 10.0),
            char_item(9.0, 0.0, 8.0, 10.0),
            char_item(0.0, 20.0, 8.0, 10.0),
            char_item(9.0, 20.0, 8.0, 10.0),
        ];
        let char_order = vec![0, 1, 2, 3];
        let lines = form_lines(&items, &char_order, &[], &[], 10.0, &tuning);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn whitespace_cover_gutter_splits_a_two_column_row() {
        let tuning = Tuning::default();
        // Close enough to qualify as right/left neighbours on their own,
        // but a full-height cover rectangle sits in the gap between them.
        let items = vec![
            char_item(0.0, 0.0, 8.0, 10.0),
            char_item(15.0, 0.0, 8.0, 10.0),
        ];
        let char_order = vec![0, 1];
        let gutter = BoundingBox::new(9.0, -50.0, 5.0, 200.0);
        let lines = form_lines(&items, &char_order, &[], &[gutter], 10.0, &tuning);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn real_overlap_candidate_beats_gap_candidate_regardless_of_order() {
        // `near` has real horizontal overlap with `a` (gap >= HORZ); `far`
        // is further away and only a gap candidate, even though it shares
        // the same full vertical overlap. `near` must win the tie-break
        // no matter which order the candidates are visited in.
        let tuning = Tuning::default();
        let a = char_item(0.0, 0.0, 8.0, 10.0);
        let near = char_item(8.5, 0.0, 8.0, 10.0);
        let far = char_item(20.0, 0.0, 8.0, 10.0);
        let items = vec![a, far, near];
        let char_order = vec![0, 1, 2]; // visits `far` (idx 1) before `near` (idx 2)
        let (right, _) = build_neighbor_maps(&items, &char_order, &tuning);
        assert_eq!(right[0], Some(2));
    }
}
