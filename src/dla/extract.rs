//! Turns a page's raw extracted content — characters, vector paths, image
//! placements — into the `DocItem` arena the layout pipeline operates on.
//!
//! Characters and paths are already produced by the crate's existing
//! `PdfDocument::extract_chars`/`extract_paths` content-stream walks; this
//! module only reshapes their output into `DocItem`. Image placements are
//! *not* taken from the crate's image-decoding path (`extract_images`),
//! since the layout analyzer only ever needs a placement bounding box, not
//! decoded pixel data — the content stream's `Do` operator plus the CTM in
//! effect when it runs is all that's needed, so this module walks the
//! content stream directly, the same way `PdfDocument::extract_paths` does.

use crate::config::Tuning;
use crate::content::{parse_content_stream, GraphicsStateStack, Matrix, Operator};
use crate::document::PdfDocument;
use crate::elements::PathOperation;
use crate::error::Error;
use crate::geometry::BoundingBox;
use crate::object::Object;
use crate::Result;

use super::item::{DocItem, PathShape};

/// Classify a path's bounding box and operation list into a [`PathShape`].
fn classify_path(bbox: &BoundingBox, operations: &[PathOperation], has_fill: bool, tuning: &Tuning) -> PathShape {
    if bbox.is_horizontal_ruler(tuning.max_ruler_thin_size, tuning.min_ruler_thick_size, tuning.min_ruler_aspect_ratio) {
        return PathShape::HorizontalLine;
    }
    if bbox.is_vertical_ruler(tuning.max_ruler_thin_size, tuning.min_ruler_thick_size, tuning.min_ruler_aspect_ratio) {
        return PathShape::VerticalLine;
    }
    if has_fill && is_single_rectangle(operations) {
        return PathShape::SolidRectangle;
    }
    PathShape::General
}

/// A path is a solid rectangle when it is exactly one `re` operator, or
/// four axis-aligned `LineTo`s (following a `MoveTo`) that close the
/// subpath — the two ways PDF content streams draw a filled box.
fn is_single_rectangle(operations: &[PathOperation]) -> bool {
    if let [PathOperation::Rectangle(..)] = operations {
        return true;
    }

    let PathOperation::MoveTo(mx, my) = operations.first().copied().unwrap_or(PathOperation::ClosePath) else {
        return false;
    };
    let lines: Vec<(f32, f32)> = operations[1..]
        .iter()
        .filter_map(|op| match op {
            PathOperation::LineTo(x, y) => Some((*x, *y)),
            _ => None,
        })
        .collect();
    if lines.len() != 3 && lines.len() != 4 {
        return false;
    }
    let mut points = vec![(mx, my)];
    points.extend(lines.iter().copied());
    // Axis-aligned: every consecutive edge is purely horizontal or vertical.
    points.windows(2).all(|w| {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        (x0 - x1).abs() < 0.01 || (y0 - y1).abs() < 0.01
    })
}

/// Extract image-placement bounding boxes from a page's content stream
/// without decoding any pixel data: find every `Do` operator that names an
/// Image XObject and record the CTM-transformed unit square in effect at
/// that point.
fn extract_image_placements(doc: &mut PdfDocument, page_index: usize) -> Result<Vec<BoundingBox>> {
    let content_data = doc.get_page_content_data(page_index)?;
    let operators = parse_content_stream(&content_data)?;
    let resources = doc.get_page_resources(page_index).ok();

    let mut placements = Vec::new();
    let mut state_stack = GraphicsStateStack::new();

    for op in operators {
        match op {
            Operator::SaveState => state_stack.save(),
            Operator::RestoreState => state_stack.restore(),
            Operator::Cm { a, b, c, d, e, f } => {
                let state = state_stack.current_mut();
                state.ctm = state.ctm.multiply(&Matrix { a, b, c, d, e, f });
            },
            Operator::Do { name } => {
                if let Some(resources) = &resources {
                    if is_image_xobject(doc, resources, &name).unwrap_or(false) {
                        let ctm = state_stack.current().ctm;
                        placements.push(unit_square_bbox(&ctm));
                    }
                }
            },
            _ => {},
        }
    }

    Ok(placements)
}

fn is_image_xobject(doc: &mut PdfDocument, resources: &Object, name: &str) -> Result<bool> {
    let resources_obj = resolve(doc, resources)?;
    let Some(resources_dict) = resources_obj.as_dict() else {
        return Ok(false);
    };
    let Some(xobject_dict_ref) = resources_dict.get("XObject") else {
        return Ok(false);
    };
    let xobject_dict_obj = resolve(doc, xobject_dict_ref)?;
    let Some(xobject_dict) = xobject_dict_obj.as_dict() else {
        return Ok(false);
    };
    let Some(xobj_ref) = xobject_dict.get(name) else {
        return Ok(false);
    };
    let xobj = resolve(doc, xobj_ref)?;
    Ok(xobj
        .as_dict()
        .and_then(|d| d.get("Subtype"))
        .and_then(|s| s.as_name())
        .is_some_and(|subtype| subtype == "Image"))
}

fn resolve(doc: &mut PdfDocument, obj: &Object) -> Result<Object> {
    match obj.as_reference() {
        Some(obj_ref) => doc.load_object(obj_ref),
        None => Ok(obj.clone()),
    }
}

/// The bounding box of the CTM applied to the PDF image-space unit square
/// (the corners a `Do` placement maps to), regardless of rotation/skew.
fn unit_square_bbox(ctm: &Matrix) -> BoundingBox {
    let corners = [
        ctm.transform_point(0.0, 0.0),
        ctm.transform_point(1.0, 0.0),
        ctm.transform_point(0.0, 1.0),
        ctm.transform_point(1.0, 1.0),
    ];
    let x0 = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let x1 = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
    let y0 = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let y1 = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    BoundingBox::from_points(x0, y0, x1, y1)
}

/// Extract a page's full `DocItem` arena (characters, paths, image
/// placements) and its page-space bounding box (the MediaBox).
pub fn extract_page(doc: &mut PdfDocument, page_index: usize, tuning: &Tuning) -> Result<(Vec<DocItem>, BoundingBox)> {
    let page_count = doc.page_count().map_err(|_| Error::InvalidDocument("failed to read page count".to_string()))?;
    if page_index >= page_count {
        return Err(Error::PageOutOfRange {
            index: page_index as u32,
            count: page_count as u32,
        });
    }

    let page_info = doc.get_page_info(page_index)?;
    let mut items = Vec::new();

    for ch in doc.extract_chars(page_index)? {
        let bbox = ch.bbox;
        let baseline = ch.origin_y;
        let ascent = (baseline - bbox.top()).max(0.0);
        let descent = (bbox.bottom() - baseline).max(0.0);
        items.push(DocItem::char(bbox, ch.char as u32, baseline, ascent, descent, ch.rotation_radians()));
    }

    for path in doc.extract_paths(page_index)? {
        let has_fill = path.fill_color.is_some();
        let shape = classify_path(&path.bbox, &path.operations, has_fill, tuning);
        items.push(DocItem::path(path.bbox, shape));
    }

    for bbox in extract_image_placements(doc, page_index)? {
        items.push(DocItem::image(bbox));
    }

    Ok((items, page_info.media_box))
}
