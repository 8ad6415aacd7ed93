//! CLI commands
//!
//! Each command returns the text to print on success, or a message for stderr.

use psan_config::{Loader, PsanConfig};
use psan_parser::{extract_features, FeatureOptions, Span};
use psan_render::{
    display_name, DocumentId, MemoryStore, RenderError, RenderOptions, Renderer, ENTITY_CODES,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Project-local configuration picked up when present.
const LOCAL_CONFIG: &str = "psan.toml";

pub struct RenderRequest<'a> {
    pub path: &'a str,
    pub document: DocumentId,
    pub decisions: Option<&'a str>,
    pub focus: Option<&'a str>,
    pub margin: Option<usize>,
    pub config: Option<&'a str>,
    pub format: &'a str,
}

/// Layer `./psan.toml`, an explicit config file and a margin override over the defaults.
pub fn load_config(config: Option<&str>, margin: Option<usize>) -> Result<PsanConfig, String> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = config {
        loader = loader.with_file(path);
    }
    if let Some(margin) = margin {
        loader = loader
            .set_override("render.margin", margin as i64)
            .map_err(|e| format!("Invalid margin: {}", e))?;
    }
    loader
        .build()
        .map_err(|e| format!("Failed to load configuration: {}", e))
}

/// Parse a focus given as `start..end`.
pub fn parse_focus(value: &str) -> Result<Span, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("Focus must look like start..end, got '{}'", value))?;
    let start = start
        .trim()
        .parse()
        .map_err(|_| format!("Invalid focus start '{}'", start))?;
    let end = end
        .trim()
        .parse()
        .map_err(|_| format!("Invalid focus end '{}'", end))?;
    Ok(Span::new(start, end))
}

fn load_store(path: Option<&str>) -> Result<MemoryStore, String> {
    let Some(path) = path else {
        return Ok(MemoryStore::new());
    };
    let file = File::open(path).map_err(|e| format!("Cannot open decisions '{}': {}", path, e))?;
    MemoryStore::from_json_reader(BufReader::new(file))
        .map_err(|e| format!("Cannot load decisions '{}': {}", path, e))
}

/// Render the review fragment for one focus span.
pub fn render(request: &RenderRequest) -> Result<String, String> {
    let config = load_config(request.config, request.margin)?;
    let store = load_store(request.decisions)?;

    let focus = match request.focus {
        Some(value) => parse_focus(value)?,
        None => store
            .first_undecided(request.document)
            .map_err(|e| format!("Decision store failed: {}", e))?
            .ok_or_else(|| {
                format!(
                    "No undecided candidates left in document {}",
                    request.document
                )
            })?,
    };

    let input = File::open(request.path)
        .map_err(|e| format!("Cannot open document '{}': {}", request.path, e))?;
    let renderer = Renderer::new(RenderOptions::from(config.render));
    let rendered = renderer
        .render(BufReader::new(input), &store, request.document, focus)
        .map_err(|e| match e {
            RenderError::FocusNotFound { focus } => {
                format!("Candidate not found: no token starts at {}", focus)
            }
            other => format!("Render failed: {}", other),
        })?;

    match request.format {
        "html" => Ok(format!("{}\n", rendered.fragment)),
        "json" => serde_json::to_string_pretty(&rendered)
            .map(|json| format!("{}\n", json))
            .map_err(|e| format!("JSON serialization failed: {}", e)),
        other => Err(format!("Unknown format: {}", other)),
    }
}

/// Extract confirmed features into a CSV file and the plain text into another.
pub fn features(
    input: &str,
    features_out: &Path,
    text_out: &Path,
    config: Option<&str>,
) -> Result<String, String> {
    let options = FeatureOptions::from(load_config(config, None)?.features);
    let source =
        File::open(input).map_err(|e| format!("Cannot open document '{}': {}", input, e))?;
    let mut csv = create(features_out)?;
    let mut text = create(text_out)?;

    let summary = extract_features(
        BufReader::new(source),
        &options,
        |feature| feature.write_csv(&mut csv),
        |content| text.write_all(content.as_bytes()),
    )
    .map_err(|e| format!("Feature extraction failed: {}", e))?;
    csv.flush()
        .and_then(|_| text.flush())
        .map_err(|e| format!("Failed to write output: {}", e))?;

    info!(input, features = summary.features, "features extracted");
    Ok(format!(
        "{} features, {} characters\n",
        summary.features, summary.characters
    ))
}

fn create(path: &Path) -> Result<BufWriter<File>, String> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| format!("Cannot create '{}': {}", path.display(), e))
}

/// The entity category codes with their descriptions, one per line.
pub fn codes() -> String {
    ENTITY_CODES
        .iter()
        .map(|(code, _)| format!("{}  {}\n", code, display_name(code)))
        .collect()
}
