//! Configuration for PDF processing.

// use std::path::PathBuf; // Will be used later

/// PDF processing configuration.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// Enable ML features.
    pub use_ml: bool,

    /// Enable table detection ML.
    pub table_ml: bool,

    /// Enable OCR.
    pub ocr: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            use_ml: false,
            table_ml: false,
            ocr: false,
        }
    }

    /// Enable ML features.
    pub fn with_ml(mut self, enable: bool) -> Self {
        self.use_ml = enable;
        self
    }

    /// Enable table detection ML.
    pub fn with_table_ml(mut self, enable: bool) -> Self {
        self.table_ml = enable;
        self
    }

    /// Enable OCR.
    pub fn with_ocr(mut self, enable: bool) -> Self {
        self.ocr = enable;
        self
    }
}

/// Tunable constants for the document layout analysis pipeline.
///
/// All fields default to the values observed in the reference layout
/// engine this crate's algorithm is modeled on. Callers with unusual page
/// geometry (very small pages, scanned documents rescaled to odd DPI) can
/// override individual constants before calling `get_page_blocks`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Smallest dimension considered non-degenerate; below this, a size or
    /// gap is treated as zero. Points.
    pub min_item_size: f32,
    /// Gaps narrower than this are folded into the zero bucket of the
    /// word-separation histogram instead of being binned directly. Points.
    pub min_acknowledgable_distance: f32,
    /// Multiplier applied to the histogram's estimated mode to obtain the
    /// word-separation threshold.
    pub word_separation_threshold_multiplier: f32,
    /// Upper bound on the word-separation threshold, expressed as a
    /// multiple of the mean character width.
    pub max_wordsep_over_meanchar_ratio: f32,
    /// Minimum width and height, in points, of a whitespace-cover
    /// candidate rectangle.
    pub min_cover_size: f32,
    /// Minimum perimeter of a whitespace-cover candidate rectangle.
    pub min_cover_perimeter: f32,
    /// Minimum area of a whitespace-cover candidate rectangle.
    pub min_cover_area: f32,
    /// Maximum number of rectangles kept in the whitespace cover.
    pub max_cover_items: usize,
    /// Overlap ratio above which two regions are considered to
    /// "approximately fully" overlap (used by blob merging and reference
    /// number merging).
    pub approx_full_overlap_ratio: f32,
    /// Upper bound on a merged figure blob's area, expressed as a fraction
    /// of the page area.
    pub max_image_blob_area_fraction: f32,
    /// Maximum baseline angle, in radians, for a character to be treated as
    /// horizontal text.
    pub max_baseline_angle_radians: f32,
    /// Largest thin-edge size, in points, still eligible for ruler
    /// classification.
    pub max_ruler_thin_size: f32,
    /// Smallest thick-edge size, in points, required for ruler
    /// classification.
    pub min_ruler_thick_size: f32,
    /// Minimum thick/thin aspect ratio required for ruler classification.
    pub min_ruler_aspect_ratio: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            min_item_size: 0.1,
            min_acknowledgable_distance: 3.0,
            word_separation_threshold_multiplier: 1.5,
            max_wordsep_over_meanchar_ratio: 2.0,
            min_cover_size: 4.0,
            min_cover_perimeter: 128.0,
            min_cover_area: 2048.0,
            max_cover_items: 30,
            approx_full_overlap_ratio: 0.95,
            max_image_blob_area_fraction: 0.5,
            max_baseline_angle_radians: 0.01 * std::f32::consts::PI,
            max_ruler_thin_size: 4.0,
            min_ruler_thick_size: 8.0,
            min_ruler_aspect_ratio: 4.0,
        }
    }
}
