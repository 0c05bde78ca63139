//! A block: the unit handed back to callers of `get_page_blocks`.

use crate::geometry::BoundingBox;

use super::line::DocLine;

/// The polymorphic block payload.
///
/// `Table` and `Formula` exist only so that a future specialized detector
/// can populate them without changing the public shape of [`DocBlock`];
/// the layout-analysis pipeline in this crate constructs only `Text` and
/// `Figure` blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum DocBlockKind {
    /// A paragraph-like run of lines.
    Text {
        /// The block's lines, in top-to-bottom reading order.
        lines: Vec<DocLine>,
    },
    /// A figure: one or more merged image/path items, optionally with a
    /// caption line absorbed from an adjacent text block.
    Figure {
        /// Indices into the page's item arena making up the figure.
        items: Vec<usize>,
        /// A caption line, if one was found directly above or below the
        /// figure and merged into it.
        caption: Option<DocLine>,
    },
    /// Reserved for a future table detector. Never constructed today.
    Table {
        /// The block's lines, prior to cell segmentation.
        lines: Vec<DocLine>,
    },
    /// Reserved for a future formula detector. Never constructed today.
    Formula {
        /// The block's lines, prior to LaTeX reconstruction.
        lines: Vec<DocLine>,
    },
}

/// A region of the page the pipeline has grouped into one logical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct DocBlock {
    /// Extent of the block (union of its content's bboxes).
    pub bbox: BoundingBox,
    /// The block's content.
    pub kind: DocBlockKind,
}

impl DocBlock {
    /// Build a text block from its lines, computing the union bbox.
    pub fn text(lines: Vec<DocLine>) -> Self {
        let bbox = union_all(lines.iter().map(|l| l.bbox));
        Self {
            bbox,
            kind: DocBlockKind::Text { lines },
        }
    }

    /// Build a figure block from item bboxes, computing the union bbox.
    pub fn figure(items: Vec<usize>, item_bboxes: &[BoundingBox], caption: Option<DocLine>) -> Self {
        let mut bbox = union_all(item_bboxes.iter().copied());
        if let Some(cap) = &caption {
            bbox = bbox.union(&cap.bbox);
        }
        Self {
            bbox,
            kind: DocBlockKind::Figure { items, caption },
        }
    }

    /// The block's lines, if it is a `Text`, `Table`, or `Formula` block.
    pub fn lines(&self) -> Option<&[DocLine]> {
        match &self.kind {
            DocBlockKind::Text { lines }
            | DocBlockKind::Table { lines }
            | DocBlockKind::Formula { lines } => Some(lines),
            DocBlockKind::Figure { .. } => None,
        }
    }

    /// True if this is a [`DocBlockKind::Figure`].
    pub fn is_figure(&self) -> bool {
        matches!(self.kind, DocBlockKind::Figure { .. })
    }
}

fn union_all(mut boxes: impl Iterator<Item = BoundingBox>) -> BoundingBox {
    let first = boxes.next().unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0));
    boxes.fold(first, |acc, b| acc.union(&b))
}
