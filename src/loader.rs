//! Corpus discovery and reading

use crate::error::{Result, SourceError};
use crate::types::RawSource;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const UTF8_BOM: char = '\u{feff}';

/// A file that was found but could not be used
#[derive(Debug)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: SourceError,
}

/// Everything the loader produced for one root directory
#[derive(Debug, Default)]
pub struct Corpus {
    /// Non-empty sources in enumeration order
    pub sources: Vec<RawSource>,

    /// Files that could not be opened or decoded
    pub skipped: Vec<SkippedSource>,

    /// Files whose content was blank
    pub empty: Vec<PathBuf>,
}

impl Corpus {
    /// No usable source was found
    #[must_use]
    pub const fn is_empty_corpus(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Load every text source under `root` whose extension is `extension`
///
/// Searches recursively first and falls back to the top level only when the
/// recursive walk finds nothing. Unreadable and blank files are recorded in
/// the returned [`Corpus`] and never abort the load.
pub fn load_corpus(root: &Path, extension: &str) -> Result<Corpus> {
    let mut corpus = Corpus::default();

    let paths = discover(root, extension, &mut corpus.skipped)?;
    debug!(
        "Discovered {} candidate files under {}",
        paths.len(),
        root.display()
    );

    for path in paths {
        match read_source(&path) {
            Ok(text) if text.is_empty() => {
                debug!("Skipping empty file {}", path.display());
                corpus.empty.push(path);
            }
            Ok(text) => corpus.sources.push(RawSource::new(path, text)),
            Err(reason) => {
                warn!("Skipping {}: {}", path.display(), reason);
                corpus.skipped.push(SkippedSource { path, reason });
            }
        }
    }

    if corpus.is_empty_corpus() {
        warn!("No non-empty .{extension} files found in {}", root.display());
    }

    Ok(corpus)
}

/// Read one file, decode it as UTF-8 and trim it
pub fn read_source(path: &Path) -> std::result::Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(SourceError::Unreadable)?;
    let text = String::from_utf8(bytes).map_err(SourceError::Undecodable)?;

    Ok(text.trim_start_matches(UTF8_BOM).trim().to_string())
}

fn discover(
    root: &Path,
    extension: &str,
    skipped: &mut Vec<SkippedSource>,
) -> Result<Vec<PathBuf>> {
    let base = Pattern::escape(&root.to_string_lossy());

    let recursive = format!("{base}/**/*.{extension}");
    let mut paths = expand(&recursive, skipped)?;

    if paths.is_empty() {
        let flat = format!("{base}/*.{extension}");
        paths = expand(&flat, skipped)?;
    }

    Ok(paths)
}

fn expand(pattern: &str, skipped: &mut Vec<SkippedSource>) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut paths = Vec::new();
    for entry in glob::glob_with(pattern, options)? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().to_path_buf();
                warn!("Skipping {}: {}", path.display(), e.error());
                skipped.push(SkippedSource {
                    path,
                    reason: SourceError::Unreadable(e.into()),
                });
            }
        }
    }

    Ok(paths)
}
