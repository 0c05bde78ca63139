//! Document layout analysis dump tool.
//!
//! Opens a PDF, runs layout analysis over every page (or a single page with
//! `--page`), and writes each page's blocks as a JSON array next to the
//! existing `export_to_text`/`export_to_markdown` tools' output conventions.
//!
//! Usage:
//!   cargo run --release --bin dla_dump -- document.pdf
//!   cargo run --release --bin dla_dump -- document.pdf --page 2
//!   cargo run --release --bin dla_dump -- document.pdf --output-dir out --debug-images

use std::fs;
use std::path::PathBuf;

use pdf_oxide::config::Tuning;
use pdf_oxide::dla::trace::RecordingTracer;
use pdf_oxide::document::PdfDocument;

struct DumpConfig {
    pdf_path: PathBuf,
    page: Option<usize>,
    output_dir: PathBuf,
    debug_images: bool,
}

impl DumpConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let pdf_path = PathBuf::from(args.get(1)?);
        let mut page = None;
        let mut output_dir = PathBuf::from("dla_dump_out");
        let mut debug_images = false;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--page" => {
                    i += 1;
                    page = args.get(i).and_then(|s| s.parse::<usize>().ok());
                },
                "--output-dir" => {
                    i += 1;
                    if let Some(dir) = args.get(i) {
                        output_dir = PathBuf::from(dir);
                    }
                },
                "--debug-images" => debug_images = true,
                _ => {},
            }
            i += 1;
        }

        Some(Self {
            pdf_path,
            page,
            output_dir,
            debug_images,
        })
    }
}

fn dump_page(doc: &mut PdfDocument, page_index: usize, tuning: &Tuning, config: &DumpConfig) -> pdf_oxide::error::Result<()> {
    let mut tracer = RecordingTracer::default();
    let blocks = pdf_oxide::dla::analyze_page(doc, page_index, tuning, &mut tracer)?;

    let json = pdf_oxide::dla::serialize::blocks_to_json(&blocks)
        .map_err(|e| pdf_oxide::error::Error::InvalidDocument(format!("failed to serialize page {}: {}", page_index, e)))?;

    let out_path = config.output_dir.join(format!("page_{:04}.json", page_index));
    fs::write(&out_path, &json)?;
    log::info!("wrote {} blocks for page {} to {}", blocks.len(), page_index, out_path.display());

    if config.debug_images {
        // The crate's PNG debug-overlay machinery (`debug::DebugVisualizer`)
        // renders against the document-creation `api::Pdf` type, not the
        // parsing `document::PdfDocument` this tool reads with, so this
        // dumps the traced stage groups as JSON instead of a rendered image.
        let trace_path = config.output_dir.join(format!("page_{:04}_trace.json", page_index));
        let events: Vec<_> = tracer
            .events
            .iter()
            .map(|(stage, page_index, groups)| {
                let groups: Vec<Vec<(f32, f32, f32, f32)>> = groups
                    .iter()
                    .map(|group| group.iter().map(|b| (b.x, b.y, b.width, b.height)).collect())
                    .collect();
                serde_json::json!({
                    "stage": stage.tag(),
                    "page_index": page_index,
                    "groups": groups,
                })
            })
            .collect();
        let trace_json = serde_json::to_string_pretty(&events)
            .map_err(|e| pdf_oxide::error::Error::InvalidDocument(format!("failed to serialize trace: {}", e)))?;
        fs::write(&trace_path, trace_json)?;
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let Some(config) = DumpConfig::from_args() else {
        eprintln!("usage: dla_dump <path.pdf> [--page N] [--output-dir DIR] [--debug-images]");
        std::process::exit(2);
    };

    let mut doc = match PdfDocument::open(&config.pdf_path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("failed to open {}: {}", config.pdf_path.display(), e);
            std::process::exit(1);
        },
    };

    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        eprintln!("failed to create output directory {}: {}", config.output_dir.display(), e);
        std::process::exit(1);
    }

    let tuning = Tuning::default();
    let page_count = match doc.page_count() {
        Ok(n) => n,
        Err(e) => {
            eprintln!("failed to read page count: {}", e);
            std::process::exit(1);
        },
    };

    let pages: Vec<usize> = match config.page {
        Some(p) => vec![p],
        None => (0..page_count).collect(),
    };

    let mut errors = 0;
    for page_index in pages {
        if let Err(e) = dump_page(&mut doc, page_index, &tuning, &config) {
            eprintln!("page {}: {}", page_index, e);
            errors += 1;
        }
    }

    if errors > 0 {
        std::process::exit(1);
    }
}
