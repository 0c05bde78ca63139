//! JSON serialization of a page's layout-analysis result.
//!
//! Mirrors [`crate::extractors::structured`]'s convention of a tuple
//! `(x, y, width, height)` bounding box rather than deriving `Serialize` on
//! [`crate::geometry::Rect`] itself, so the wire shape stays stable
//! regardless of what fields the geometry type grows.

use serde::Serialize;

use crate::geometry::BoundingBox;

use super::block::{DocBlock, DocBlockKind};
use super::line::{DocLine, ListKind};

/// Bounding box `(x, y, width, height)`, matching
/// [`crate::extractors::structured::BoundingBox`]'s shape.
pub type JsonBoundingBox = (f32, f32, f32, f32);

fn bbox_to_json(bbox: BoundingBox) -> JsonBoundingBox {
    (bbox.x, bbox.y, bbox.width, bbox.height)
}

/// One reading-order line within a serialized text block.
#[derive(Debug, Clone, Serialize)]
pub struct JsonLine {
    /// Bounding box of the line.
    pub bbox: JsonBoundingBox,
    /// The line's baseline Y coordinate.
    pub baseline: f32,
    /// Item indices into the page's item arena, in reading order.
    pub items: Vec<usize>,
    /// List-marker classification, if any.
    pub list_kind: &'static str,
}

impl From<&DocLine> for JsonLine {
    fn from(line: &DocLine) -> Self {
        JsonLine {
            bbox: bbox_to_json(line.bbox),
            baseline: line.baseline,
            items: line.items.clone(),
            list_kind: match line.list_kind {
                ListKind::None => "none",
                ListKind::Bulleted => "bulleted",
                ListKind::Numbered => "numbered",
            },
        }
    }
}

/// One serialized block, tagged by kind the way
/// [`crate::extractors::structured::DocumentElement`] tags its variants.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum JsonBlock {
    /// A paragraph-like run of lines.
    #[serde(rename = "text")]
    Text {
        /// Bounding box of the block.
        bbox: JsonBoundingBox,
        /// The block's lines, in reading order.
        lines: Vec<JsonLine>,
    },
    /// A figure: merged image/path items, with an optional caption.
    #[serde(rename = "figure")]
    Figure {
        /// Bounding box of the block.
        bbox: JsonBoundingBox,
        /// Item indices making up the figure.
        items: Vec<usize>,
        /// The figure's caption line, if one was absorbed.
        caption: Option<JsonLine>,
    },
}

impl From<&DocBlock> for JsonBlock {
    fn from(block: &DocBlock) -> Self {
        match &block.kind {
            DocBlockKind::Text { lines } | DocBlockKind::Table { lines } | DocBlockKind::Formula { lines } => {
                JsonBlock::Text {
                    bbox: bbox_to_json(block.bbox),
                    lines: lines.iter().map(JsonLine::from).collect(),
                }
            },
            DocBlockKind::Figure { items, caption } => JsonBlock::Figure {
                bbox: bbox_to_json(block.bbox),
                items: items.clone(),
                caption: caption.as_ref().map(JsonLine::from),
            },
        }
    }
}

/// Serialize a page's blocks to a pretty-printed JSON array.
pub fn blocks_to_json(blocks: &[DocBlock]) -> serde_json::Result<String> {
    let json_blocks: Vec<JsonBlock> = blocks.iter().map(JsonBlock::from).collect();
    serde_json::to_string_pretty(&json_blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dla::block::DocBlock;
    use crate::dla::line::DocLine;
    use crate::geometry::BoundingBox;

    #[test]
    fn text_block_round_trips_through_json() {
        let line = DocLine {
            bbox: BoundingBox::new(0.0, 0.0, 100.0, 12.0),
            baseline: 12.0,
            items: vec![0, 1, 2],
            list_kind: ListKind::None,
            text_left: 0.0,
        };
        let block = DocBlock::text(vec![line]);
        let json = blocks_to_json(&[block]).expect("serialization should succeed");
        assert!(json.contains("\"type\": \"text\""));
        assert!(json.contains("\"items\""));
    }

    #[test]
    fn figure_block_serializes_without_caption() {
        let bbox = BoundingBox::new(10.0, 10.0, 50.0, 50.0);
        let block = DocBlock::figure(vec![5], &[bbox], None);
        let json = blocks_to_json(&[block]).expect("serialization should succeed");
        assert!(json.contains("\"type\": \"figure\""));
        assert!(json.contains("\"caption\": null"));
    }
}
