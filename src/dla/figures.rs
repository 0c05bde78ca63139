//! Figure aggregation: fold the non-character items that line formation
//! left unabsorbed into `Figure` blocks.
//!
//! Two items are folded into the same figure when their bounding boxes
//! actually intersect (unlike the word-blob merge in [`super::prep`], which
//! also folds in near-misses, figure aggregation only merges items that
//! visibly overlap — a multi-part chart drawn as several paths, a raster
//! image with a vector border traced over it). Any single item whose area
//! exceeds `Tuning::max_image_blob_area_fraction` of the page is dropped
//! outright: a full-bleed background rectangle is not a figure.

use crate::config::Tuning;
use crate::geometry::BoundingBox;

use super::item::DocItem;

/// Merge the page's still-unassigned figure-like items into `Figure`
/// blocks.
///
/// `consumed` marks item indices already absorbed into a text line (see
/// [`super::lines::form_lines`]'s inline figure absorption) or already
/// spent as a whitespace-cover obstacle; those are skipped here so an inline
/// icon doesn't also turn up as a standalone figure block.
pub fn aggregate_figures(
    items: &[DocItem],
    figure_indices: &[usize],
    consumed: &[bool],
    page_area: f32,
    tuning: &Tuning,
) -> Vec<super::block::DocBlock> {
    let candidates: Vec<usize> = figure_indices
        .iter()
        .copied()
        .filter(|&i| !consumed[i])
        .filter(|&i| {
            let area = items[i].bbox.area();
            page_area <= 0.0 || area <= tuning.max_image_blob_area_fraction * page_area
        })
        .collect();

    if candidates.is_empty() {
        return Vec::new();
    }

    // Union-find over candidates, merging any pair whose bboxes actually
    // intersect, to a fixpoint so a three-part figure (two paths plus an
    // image) collapses into a single block regardless of merge order.
    let mut parent: Vec<usize> = (0..candidates.len()).collect();
    fn find(parent: &mut [usize], x: usize) -> usize {
        if parent[x] != x {
            parent[x] = find(parent, parent[x]);
        }
        parent[x]
    }
    fn union(parent: &mut [usize], a: usize, b: usize) {
        let ra = find(parent, a);
        let rb = find(parent, b);
        if ra != rb {
            parent[ra] = rb;
        }
    }

    let boxes: Vec<BoundingBox> = candidates.iter().map(|&i| items[i].bbox).collect();
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            if boxes[i].has_intersection(&boxes[j], tuning.min_item_size) {
                union(&mut parent, i, j);
            }
        }
    }

    let mut clusters: std::collections::HashMap<usize, Vec<usize>> = std::collections::HashMap::new();
    for (local, &item_idx) in candidates.iter().enumerate() {
        let root = find(&mut parent, local);
        clusters.entry(root).or_default().push(item_idx);
    }

    let mut ordered: Vec<(usize, Vec<usize>)> = clusters.into_iter().collect();
    ordered.sort_by_key(|(root, _)| *root);

    ordered
        .into_iter()
        .map(|(_, mut item_idxs)| {
            item_idxs.sort_unstable();
            let bboxes: Vec<BoundingBox> = item_idxs.iter().map(|&i| items[i].bbox).collect();
            super::block::DocBlock::figure(item_idxs, &bboxes, None)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dla::item::DocItem;

    #[test]
    fn overlapping_items_merge_into_one_figure() {
        let tuning = Tuning::default();
        let items = vec![
            DocItem::image(BoundingBox::new(0.0, 0.0, 100.0, 100.0)),
            DocItem::image(BoundingBox::new(90.0, 90.0, 100.0, 100.0)),
        ];
        let consumed = vec![false, false];
        let blocks = aggregate_figures(&items, &[0, 1], &consumed, 1_000_000.0, &tuning);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_figure());
    }

    #[test]
    fn distant_items_stay_separate_figures() {
        let tuning = Tuning::default();
        let items = vec![
            DocItem::image(BoundingBox::new(0.0, 0.0, 50.0, 50.0)),
            DocItem::image(BoundingBox::new(500.0, 500.0, 50.0, 50.0)),
        ];
        let consumed = vec![false, false];
        let blocks = aggregate_figures(&items, &[0, 1], &consumed, 1_000_000.0, &tuning);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn oversized_blob_is_dropped() {
        let tuning = Tuning::default();
        let items = vec![DocItem::image(BoundingBox::new(0.0, 0.0, 1000.0, 1000.0))];
        let consumed = vec![false];
        let blocks = aggregate_figures(&items, &[0], &consumed, 1_000_000.0, &tuning);
        assert!(blocks.is_empty());
    }

    #[test]
    fn consumed_items_are_skipped() {
        let tuning = Tuning::default();
        let items = vec![DocItem::image(BoundingBox::new(0.0, 0.0, 10.0, 10.0))];
        let consumed = vec![true];
        let blocks = aggregate_figures(&items, &[0], &consumed, 1_000_000.0, &tuning);
        assert!(blocks.is_empty());
    }
}
