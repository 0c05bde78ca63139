//! Document layout analysis: turn a page's raw extracted content into
//! reading-order text and figure blocks.
//!
//! The pipeline runs in five stages, each its own module: [`extract`] reads
//! the page's characters, paths, and image placements into a flat
//! [`item::DocItem`] arena; [`prep`] computes page-wide statistics (mean
//! glyph size, word-separation threshold) and the whitespace cover;
//! [`lines`] chains characters into [`line::DocLine`]s, vetoed by the
//! cover; [`blocks`] chains lines into [`block::DocBlock`]s; and
//! [`figures`] folds whatever figure-like items neither stage absorbed into
//! standalone figure blocks. [`analyze_page`] runs all five in order.

pub mod block;
pub mod blocks;
pub mod cover;
pub mod extract;
pub mod figures;
pub mod item;
pub mod line;
pub mod lines;
pub mod prep;
pub mod serialize;
pub mod trace;
pub mod wordsep;

pub use block::{DocBlock, DocBlockKind};
pub use item::{DocItem, DocItemKind, PathShape};
pub use line::{DocLine, ListKind};
pub use trace::{NullTracer, RecordingTracer, Stage, Tracer};

use crate::config::Tuning;
use crate::document::PdfDocument;
use crate::geometry::BoundingBox;
use crate::Result;

/// Run the full layout pipeline over one page, reporting intermediate
/// stages to `tracer`.
///
/// A page with no character items at all (a blank page, or a scan with no
/// extractable text layer) yields whatever figure blocks its images/paths
/// aggregate into, with no error — this is the expected shape of a
/// pure-image page, not a failure.
pub fn analyze_page(doc: &mut PdfDocument, page_index: usize, tuning: &Tuning, tracer: &mut dyn Tracer) -> Result<Vec<DocBlock>> {
    log::debug!("dla: analyzing page {}", page_index);

    let (items, page_bbox) = extract::extract_page(doc, page_index, tuning)?;
    let page_area = page_bbox.area();

    if items.is_empty() {
        log::debug!("dla: page {} has no extractable items, returning empty block list", page_index);
        return Ok(Vec::new());
    }

    let prepared = prep::prepare(&items, page_bbox, tuning);
    log::debug!(
        "dla: page {}: {} chars, {} figure candidates, {} cover rectangles",
        page_index,
        prepared.char_indices.len(),
        prepared.figure_indices.len(),
        prepared.whitespace_cover.len()
    );

    let lines = lines::form_lines(
        &items,
        &prepared.char_indices,
        &prepared.figure_indices,
        &prepared.whitespace_cover,
        prepared.mean_char_height,
        tuning,
    );

    tracer.on_stage(Stage::NewLine, page_index, &lines.iter().map(|l| vec![l.bbox]).collect::<Vec<_>>());

    let mut consumed = vec![false; items.len()];
    for line in &lines {
        for &idx in &line.items {
            consumed[idx] = true;
        }
    }

    let figure_boxes: Vec<BoundingBox> = prepared.figure_indices.iter().map(|&i| items[i].bbox).collect();
    let text_blocks = blocks::form_blocks(lines, &figure_boxes, &prepared.whitespace_cover, page_bbox, tuning);

    tracer.on_stage(Stage::Consume, page_index, &text_blocks.iter().map(|b| vec![b.bbox]).collect::<Vec<_>>());

    let figure_blocks = figures::aggregate_figures(&items, &prepared.figure_indices, &consumed, page_area, tuning);

    let mut all_blocks = text_blocks;
    all_blocks.extend(figure_blocks);
    all_blocks.sort_by(|a, b| {
        a.bbox
            .top()
            .partial_cmp(&b.bbox.top())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.bbox.left().partial_cmp(&b.bbox.left()).unwrap_or(std::cmp::Ordering::Equal))
    });

    log::debug!("dla: page {} produced {} blocks", page_index, all_blocks.len());
    Ok(all_blocks)
}
