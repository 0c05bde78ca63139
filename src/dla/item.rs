//! The atomic unit the layout analyzer operates on: a positioned glyph,
//! path, or image on a page.

use crate::geometry::BoundingBox;

/// What kind of content a [`DocItem`] carries, with the per-kind data the
/// rest of the pipeline needs.
#[derive(Debug, Clone, PartialEq)]
pub enum DocItemKind {
    /// A single decoded glyph.
    Char {
        /// Unicode codepoint, or `0xFFFD` if the glyph could not be mapped.
        codepoint: u32,
        /// Y coordinate of the text baseline, in page space.
        baseline: f32,
        /// Distance from the baseline up to the glyph's bounding box top.
        ascent: f32,
        /// Distance from the glyph's bounding box bottom down to the
        /// baseline.
        descent: f32,
        /// Rotation of the baseline, in radians, relative to horizontal.
        baseline_angle: f32,
    },
    /// A stroked or filled path, classified by its aspect ratio and the
    /// operators that built it.
    Path {
        /// Ruler / solid-fill classification.
        shape: PathShape,
    },
    /// A placed raster image (the content stream's `Do` operator applied to
    /// an image XObject).
    Image,
}

/// Coarse shape classification for [`DocItemKind::Path`], mirroring the
/// reference engine's horizontal/vertical ruler and solid-rectangle checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape {
    /// Thin, long, horizontal: a hairline rule.
    HorizontalLine,
    /// Thin, long, vertical: a hairline rule.
    VerticalLine,
    /// A single filled rectangle (the `re` operator, or four axis-aligned
    /// segments closing the subpath, with a non-transparent fill).
    SolidRectangle,
    /// Anything else: a general vector-graphics path.
    General,
}

/// A single positioned item extracted from a page: a glyph, a path, or an
/// image, with no information yet about which line or block it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DocItem {
    /// Extent of the item in page space.
    pub bbox: BoundingBox,
    /// What this item is.
    pub kind: DocItemKind,
}

impl DocItem {
    /// Build a character item.
    #[allow(clippy::too_many_arguments)]
    pub fn char(
        bbox: BoundingBox,
        codepoint: u32,
        baseline: f32,
        ascent: f32,
        descent: f32,
        baseline_angle: f32,
    ) -> Self {
        Self {
            bbox,
            kind: DocItemKind::Char {
                codepoint,
                baseline,
                ascent,
                descent,
                baseline_angle,
            },
        }
    }

    /// Build a path item.
    pub fn path(bbox: BoundingBox, shape: PathShape) -> Self {
        Self {
            bbox,
            kind: DocItemKind::Path { shape },
        }
    }

    /// Build an image item.
    pub fn image(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            kind: DocItemKind::Image,
        }
    }

    /// True for [`DocItemKind::Char`].
    pub fn is_char(&self) -> bool {
        matches!(self.kind, DocItemKind::Char { .. })
    }

    /// True for [`DocItemKind::Image`] or a `Path` classified as a solid
    /// rectangle large enough to stand in for a figure (matches the
    /// reference engine treating solid-filled vector art as figure
    /// material during figure-blob merging).
    pub fn is_figure_like(&self) -> bool {
        matches!(self.kind, DocItemKind::Image)
            || matches!(
                self.kind,
                DocItemKind::Path {
                    shape: PathShape::SolidRectangle
                }
            )
    }

    /// Baseline angle in radians, or `0.0` for non-character items (which
    /// have no baseline to speak of and are never filtered by it).
    pub fn baseline_angle(&self) -> f32 {
        match self.kind {
            DocItemKind::Char { baseline_angle, .. } => baseline_angle,
            _ => 0.0,
        }
    }

    /// Baseline Y coordinate, or the vertical center of the bbox for
    /// non-character items.
    pub fn baseline(&self) -> f32 {
        match self.kind {
            DocItemKind::Char { baseline, .. } => baseline,
            _ => self.bbox.center().y,
        }
    }
}
