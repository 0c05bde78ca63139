//! Block formation: chain lines into `DocBlock`s via a bottom/top neighbor
//! graph, detect and set aside a page-number line, merge reference-number
//! markers into the block they annotate, merge fully-contained blocks,
//! and resolve any blocks left overlapping after chaining.

use std::cmp::Ordering;

use crate::config::Tuning;
use crate::geometry::BoundingBox;

use super::block::DocBlock;
use super::line::DocLine;

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Nearest line below/above `a` among `lines`, requiring horizontal
/// overlap of at least `-5` points and a vertical gap no larger than
/// three line-heights. Ties prefer the candidate with greater vertical
/// overlap, unless the current best is itself a real gap (more than
/// `min_item_size` of separation), in which case the candidate with
/// greater horizontal overlap wins — this keeps a narrow caption from
/// winning a tie against a wide paragraph it barely touches.
fn nearest_neighbor_line(a: usize, lines: &[DocLine], tuning: &Tuning, below: bool) -> Option<usize> {
    let ba = &lines[a].bbox;
    let mut best: Option<(usize, f32, f32)> = None; // (idx, v_overlap, h_overlap)

    for (b, line) in lines.iter().enumerate() {
        if a == b {
            continue;
        }
        let bb = &line.bbox;
        let is_candidate_direction = if below { bb.top() >= ba.top() - tuning.min_item_size } else { bb.bottom() <= ba.bottom() + tuning.min_item_size };
        if !is_candidate_direction {
            continue;
        }
        if b == a {
            continue;
        }
        let h_overlap = ba.horizontal_overlap(bb);
        if h_overlap < -5.0 {
            continue;
        }
        let v_overlap = ba.vertical_overlap(bb);
        let max_gap = -3.0 * ba.height.max(bb.height);
        if v_overlap < max_gap {
            continue;
        }

        match best {
            None => best = Some((b, v_overlap, h_overlap)),
            Some((_, bv, bh)) => {
                let current_is_gap = bv < -tuning.min_item_size;
                let better = if current_is_gap {
                    h_overlap > bh
                } else {
                    v_overlap > bv
                };
                if better {
                    best = Some((b, v_overlap, h_overlap));
                }
            },
        }
    }

    best.map(|(b, _, _)| b)
}

/// Detect a standalone page-number line: a short line near the vertical
/// extreme of the page (top or bottom quarter), horizontally straddling
/// the page's center, with nothing beyond it in that direction.
fn detect_page_number_line(lines: &[DocLine], page_bbox: &BoundingBox) -> Option<usize> {
    let quarter = page_bbox.height * 0.25;
    let top_band = page_bbox.top() + quarter;
    let bottom_band = page_bbox.bottom() - quarter;
    let center_x = page_bbox.center().x;
    let narrow_width = page_bbox.width * 0.2;

    lines.iter().position(|line| {
        let in_band = line.bbox.top() >= bottom_band || line.bbox.bottom() <= top_band;
        let narrow = line.bbox.width <= narrow_width;
        let straddles_center = line.bbox.left() <= center_x && line.bbox.right() >= center_x;
        let no_lines_beyond = if line.bbox.top() >= bottom_band {
            !lines.iter().any(|other| other.bbox.top() > line.bbox.bottom() + tuning_min())
        } else {
            !lines.iter().any(|other| other.bbox.bottom() < line.bbox.top() - tuning_min())
        };
        in_band && narrow && straddles_center && no_lines_beyond
    })
}

fn tuning_min() -> f32 {
    0.1
}

/// Whether a whitespace-cover piece sits strictly inside the chain's
/// would-be union, flanked by lines on both sides — a column gutter that
/// happens to run through the middle of what would otherwise look like one
/// block, rather than a margin the union merely touches at an edge.
///
/// "Strictly interior" per spec.md §4.6 allows 2 points of slack on each
/// side (`piece.left > union.left - 2`, `piece.right < union.right + 2`);
/// "flanked" requires at least one other line whose vertical range
/// overlaps the piece sitting to its left, and at least one to its right,
/// within the union's horizontal span.
fn cover_splits_block(union_so_far: &BoundingBox, next_bbox: &BoundingBox, cover: &[BoundingBox], lines: &[DocLine], min_item_size: f32) -> bool {
    let merged = union_so_far.union(next_bbox);

    cover.iter().any(|piece| {
        if !piece.has_intersection(&merged, min_item_size) {
            return false;
        }
        let interior = piece.left() > merged.left() - 2.0 && piece.right() < merged.right() + 2.0;
        if !interior {
            return false;
        }

        let flanked_left = lines.iter().any(|l| {
            l.bbox.right() <= piece.left() + min_item_size
                && l.bbox.left() >= merged.left() - min_item_size
                && l.bbox.vertical_overlap(piece) > min_item_size
        });
        let flanked_right = lines.iter().any(|l| {
            l.bbox.left() >= piece.right() - min_item_size
                && l.bbox.right() <= merged.right() + min_item_size
                && l.bbox.vertical_overlap(piece) > min_item_size
        });

        flanked_left && flanked_right
    })
}

fn chain_intersects_figure(union_so_far: &BoundingBox, next_bbox: &BoundingBox, figures: &[BoundingBox], min_item_size: f32) -> bool {
    let merged = union_so_far.union(next_bbox);
    figures.iter().any(|f| f.has_intersection(&merged, min_item_size))
}

/// Chain lines into text blocks using the bottom/top neighbor graph.
fn chain_lines_into_blocks(lines: Vec<DocLine>, figures: &[BoundingBox], cover: &[BoundingBox], tuning: &Tuning) -> Vec<DocBlock> {
    let n = lines.len();
    let mut bottom = vec![None; n];
    let mut top = vec![None; n];
    for i in 0..n {
        bottom[i] = nearest_neighbor_line(i, &lines, tuning, true);
        top[i] = nearest_neighbor_line(i, &lines, tuning, false);
    }

    let mut used = vec![false; n];
    let mut blocks = Vec::new();

    for start_candidate in 0..n {
        if used[start_candidate] {
            continue;
        }

        let mut start = start_candidate;
        while let Some(prev) = top[start] {
            if used[prev] {
                break;
            }
            start = prev;
        }

        let mut current = vec![start];
        used[start] = true;
        let mut union_bbox = lines[start].bbox;
        let mut cursor = start;

        loop {
            let next = match bottom[cursor] {
                Some(nx) if !used[nx] => nx,
                _ => break,
            };

            let next_bbox = lines[next].bbox;
            let min_width = 4.0 * union_bbox.height.min(next_bbox.height);
            let too_narrow = next_bbox.width < min_width && union_bbox.width < min_width;
            let hits_figure = chain_intersects_figure(&union_bbox, &next_bbox, figures, tuning.min_item_size);
            let bridged_by_gutter = cover_splits_block(&union_bbox, &next_bbox, cover, &lines, tuning.min_item_size);

            // prev/this/next: "this" is the line just added (cursor), "prev"
            // the one before it in the chain, if any. If this overlaps the
            // candidate next line far more than it overlaps prev, and the
            // prev overlap is a real gap, this line reads on closer to
            // belonging to next's paragraph than to prev's.
            let belongs_to_next_not_prev = current.len() >= 2 && {
                let prev_idx = current[current.len() - 2];
                let prev_bbox = lines[prev_idx].bbox;
                let this_bbox = lines[cursor].bbox;
                let vo_prev = prev_bbox.vertical_overlap(&this_bbox);
                let vo_next = this_bbox.vertical_overlap(&next_bbox);
                let min_h = prev_bbox.height.min(this_bbox.height).min(next_bbox.height);
                vo_prev < vo_next - 2.0 && vo_prev < -min_h
            };

            if too_narrow || hits_figure || bridged_by_gutter || belongs_to_next_not_prev {
                break;
            }

            current.push(next);
            used[next] = true;
            union_bbox = union_bbox.union(&next_bbox);
            cursor = next;
        }

        let block_lines: Vec<DocLine> = current.into_iter().map(|i| lines[i].clone()).collect();
        blocks.push(DocBlock::text(block_lines));
    }

    blocks
}

/// Merge a narrow single/few-line block into an adjacent wide block when
/// it reads as a reference or footnote marker prefixed to that block:
/// the wide block must be at least a fifth of the page wide and have two
/// or more lines; the narrow block at most an eighth as wide, vertically
/// overlapping it almost completely.
fn merge_reference_numbers(mut blocks: Vec<DocBlock>, page_bbox: &BoundingBox, tuning: &Tuning) -> Vec<DocBlock> {
    let min_wide_width = page_bbox.width / 5.0;
    let max_narrow_width = page_bbox.width / 8.0;

    let mut merged_into: Vec<Option<usize>> = vec![None; blocks.len()];

    for wide_idx in 0..blocks.len() {
        let (wide_width, wide_line_count) = match &blocks[wide_idx].kind {
            super::block::DocBlockKind::Text { lines } => (blocks[wide_idx].bbox.width, lines.len()),
            _ => continue,
        };
        if wide_width <= min_wide_width || wide_line_count < 2 {
            continue;
        }

        for narrow_idx in 0..blocks.len() {
            if narrow_idx == wide_idx || merged_into[narrow_idx].is_some() {
                continue;
            }
            let narrow_lines = match &blocks[narrow_idx].kind {
                super::block::DocBlockKind::Text { lines } => lines,
                _ => continue,
            };
            if blocks[narrow_idx].bbox.width > max_narrow_width {
                continue;
            }
            let min_h = blocks[wide_idx]
                .bbox
                .height
                .min(blocks[narrow_idx].bbox.height)
                .max(tuning.min_item_size);
            let v_ratio = blocks[wide_idx].bbox.vertical_overlap_ratio(&blocks[narrow_idx].bbox);
            let h_overlap = blocks[wide_idx].bbox.horizontal_overlap(&blocks[narrow_idx].bbox);
            if v_ratio >= tuning.approx_full_overlap_ratio && h_overlap > -5.0 * min_h {
                merged_into[narrow_idx] = Some(wide_idx);
                let _ = narrow_lines;
            }
        }
    }

    let mut extra_lines: Vec<Vec<DocLine>> = vec![Vec::new(); blocks.len()];
    for (narrow_idx, target) in merged_into.iter().enumerate() {
        if let Some(wide_idx) = target {
            if let super::block::DocBlockKind::Text { lines } = &blocks[narrow_idx].kind {
                extra_lines[*wide_idx].extend(lines.iter().cloned());
            }
        }
    }

    for (wide_idx, lines_to_add) in extra_lines.into_iter().enumerate() {
        if lines_to_add.is_empty() {
            continue;
        }
        if let super::block::DocBlockKind::Text { lines } = &mut blocks[wide_idx].kind {
            lines.extend(lines_to_add);
            lines.sort_by(|a, b| cmp_f32(a.bbox.top(), b.bbox.top()).then_with(|| cmp_f32(a.bbox.left(), b.bbox.left())));
        }
        blocks[wide_idx].bbox = match &blocks[wide_idx].kind {
            super::block::DocBlockKind::Text { lines } => lines
                .iter()
                .map(|l| l.bbox)
                .fold(None, |acc: Option<BoundingBox>, b| Some(acc.map_or(b, |a| a.union(&b))))
                .unwrap_or(blocks[wide_idx].bbox),
            _ => blocks[wide_idx].bbox,
        };
    }

    let mut kept: Vec<DocBlock> = Vec::new();
    for (idx, block) in blocks.into_iter().enumerate() {
        if merged_into[idx].is_none() {
            kept.push(block);
        }
    }
    kept
}

/// Merge a block that sits almost entirely inside another (a pull-quote
/// box drawn over a paragraph, a caption fully inside its figure) into
/// the containing block.
fn merge_contained_blocks(mut blocks: Vec<DocBlock>) -> Vec<DocBlock> {
    let mut absorbed = vec![false; blocks.len()];

    loop {
        let mut did_merge = false;
        'search: for i in 0..blocks.len() {
            if absorbed[i] {
                continue;
            }
            for j in 0..blocks.len() {
                if i == j || absorbed[j] {
                    continue;
                }
                let Some(inter) = blocks[i].bbox.intersection(&blocks[j].bbox) else {
                    continue;
                };
                if inter.area() <= 0.75 * blocks[j].bbox.area() {
                    continue;
                }
                // j is (almost) contained within i: absorb j's lines into i.
                if let (super::block::DocBlockKind::Text { lines: _ }, super::block::DocBlockKind::Text { .. }) =
                    (&blocks[i].kind, &blocks[j].kind)
                {
                    let j_lines = match &blocks[j].kind {
                        super::block::DocBlockKind::Text { lines } => lines.clone(),
                        _ => unreachable!(),
                    };
                    if let super::block::DocBlockKind::Text { lines } = &mut blocks[i].kind {
                        lines.extend(j_lines);
                        lines.sort_by(|a, b| {
                            cmp_f32(a.bbox.top(), b.bbox.top()).then_with(|| cmp_f32(a.bbox.left(), b.bbox.left()))
                        });
                    }
                    blocks[i].bbox = blocks[i].bbox.union(&blocks[j].bbox);
                    absorbed[j] = true;
                    did_merge = true;
                    break 'search;
                }
            }
        }
        if !did_merge {
            break;
        }
    }

    blocks
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !absorbed[*idx])
        .map(|(_, b)| b)
        .collect()
}

/// Resolve any blocks still overlapping after chaining by re-slicing the
/// affected vertical span and re-bucketing every line into the slab it
/// overlaps most.
///
/// The horizontal span of the resolved region is `[min(left), max(right)]`
/// across the overlapping group — taking the rightmost *right* edge, not
/// the rightmost *left* edge, so the resolved region actually spans the
/// whole group rather than collapsing toward its narrowest member.
fn resolve_overlaps(blocks: Vec<DocBlock>, tuning: &Tuning) -> Vec<DocBlock> {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by(|&a, &b| cmp_f32(blocks[b].bbox.area(), blocks[a].bbox.area()));

    let mut resolved = vec![false; blocks.len()];
    let mut output = Vec::new();

    for &i in &order {
        if resolved[i] {
            continue;
        }
        let group: Vec<usize> = order
            .iter()
            .copied()
            .filter(|&k| !resolved[k] && blocks[k].bbox.has_intersection(&blocks[i].bbox, tuning.min_item_size))
            .collect();

        if group.len() <= 1 {
            output.push(blocks[i].clone());
            resolved[i] = true;
            continue;
        }

        let x0 = group.iter().map(|&k| blocks[k].bbox.left()).fold(f32::INFINITY, f32::min);
        let x1 = group.iter().map(|&k| blocks[k].bbox.right()).fold(f32::NEG_INFINITY, f32::max);

        let mut ys: Vec<f32> = group
            .iter()
            .flat_map(|&k| [blocks[k].bbox.top(), blocks[k].bbox.bottom()])
            .collect();
        ys.sort_by(|a, b| cmp_f32(*a, *b));
        ys.dedup_by(|a, b| (*a - *b).abs() < tuning.min_item_size);

        let mut all_lines: Vec<DocLine> = Vec::new();
        for &k in &group {
            if let super::block::DocBlockKind::Text { lines } = &blocks[k].kind {
                all_lines.extend(lines.iter().cloned());
            }
        }

        if ys.len() < 2 || all_lines.is_empty() {
            for &k in &group {
                output.push(blocks[k].clone());
                resolved[k] = true;
            }
            continue;
        }

        let mut slabs: Vec<Vec<DocLine>> = vec![Vec::new(); ys.len() - 1];
        for line in all_lines {
            let mut best_slab = 0usize;
            let mut best_overlap = f32::NEG_INFINITY;
            for (s, window) in ys.windows(2).enumerate() {
                let slab_rect = BoundingBox::from_points(x0, window[0], x1, window[1]);
                let overlap = slab_rect.vertical_overlap(&line.bbox);
                if overlap > best_overlap {
                    best_overlap = overlap;
                    best_slab = s;
                }
            }
            slabs[best_slab].push(line);
        }

        for slab_lines in slabs {
            if !slab_lines.is_empty() {
                output.push(DocBlock::text(slab_lines));
            }
        }
        for &k in &group {
            resolved[k] = true;
        }
    }

    output
}

/// Form the page's text blocks from its lines, excluding any line
/// absorbed into a detected page-number block (returned separately so the
/// caller can still report it if desired).
pub fn form_blocks(
    mut lines: Vec<DocLine>,
    figures: &[BoundingBox],
    cover: &[BoundingBox],
    page_bbox: BoundingBox,
    tuning: &Tuning,
) -> Vec<DocBlock> {
    if lines.is_empty() {
        return Vec::new();
    }

    let page_number_line = detect_page_number_line(&lines, &page_bbox).map(|idx| lines.remove(idx));

    let mut blocks = chain_lines_into_blocks(lines, figures, cover, tuning);
    blocks = merge_reference_numbers(blocks, &page_bbox, tuning);
    blocks = merge_contained_blocks(blocks);
    blocks = resolve_overlaps(blocks, tuning);

    if let Some(line) = page_number_line {
        blocks.push(DocBlock::text(vec![line]));
    }

    blocks.sort_by(|a, b| cmp_f32(a.bbox.top(), b.bbox.top()).then_with(|| cmp_f32(a.bbox.left(), b.bbox.left())));
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dla::line::ListKind;

    fn line(x: f32, y: f32, w: f32, h: f32) -> DocLine {
        DocLine {
            bbox: BoundingBox::new(x, y, w, h),
            baseline: y + h,
            items: vec![],
            list_kind: ListKind::None,
            text_left: x,
        }
    }

    #[test]
    fn stacked_lines_form_one_paragraph_block() {
        let tuning = Tuning::default();
        let lines = vec![line(0.0, 0.0, 200.0, 12.0), line(0.0, 14.0, 200.0, 12.0), line(0.0, 28.0, 200.0, 12.0)];
        let page_bbox = BoundingBox::new(0.0, 0.0, 600.0, 800.0);
        let blocks = form_blocks(lines, &[], &[], page_bbox, &tuning);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines().unwrap().len(), 3);
    }

    #[test]
    fn two_columns_stay_separate_blocks() {
        let tuning = Tuning::default();
        let lines = vec![
            line(0.0, 0.0, 200.0, 12.0),
            line(0.0, 14.0, 200.0, 12.0),
            line(350.0, 0.0, 200.0, 12.0),
            line(350.0, 14.0, 200.0, 12.0),
        ];
        let page_bbox = BoundingBox::new(0.0, 0.0, 600.0, 800.0);
        let gutter = BoundingBox::new(210.0, -10.0, 130.0, 40.0);
        let blocks = form_blocks(lines, &[], &[gutter], page_bbox, &tuning);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn overlap_resolution_spans_the_whole_group() {
        let tuning = Tuning::default();
        let a = DocBlock::text(vec![line(0.0, 0.0, 100.0, 12.0)]);
        let b = DocBlock::text(vec![line(50.0, 5.0, 150.0, 12.0)]);
        let resolved = resolve_overlaps(vec![a, b], &tuning);
        let max_right = resolved.iter().map(|r| r.bbox.right()).fold(f32::NEG_INFINITY, f32::max);
        assert!((max_right - 200.0).abs() < 1.0, "expected resolved span to reach 200.0, got {}", max_right);
    }
}
