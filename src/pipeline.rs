//! Directory-to-records pipeline and record export

use crate::config::Config;
use crate::error::Result;
use crate::loader::{Corpus, SkippedSource, load_corpus};
use crate::parser::ThreadParser;
use crate::types::{MessageRecord, RawSource};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Records from a whole corpus plus what the loader had to leave out
#[derive(Debug, Default)]
pub struct Extraction {
    /// Records in source order, then segment order
    pub records: Vec<MessageRecord>,

    /// Number of non-empty sources that were parsed
    pub sources: usize,

    pub skipped: Vec<SkippedSource>,

    pub empty: Vec<PathBuf>,
}

impl Extraction {
    #[must_use]
    pub const fn is_empty_corpus(&self) -> bool {
        self.sources == 0
    }
}

/// Loader and parser configured for one run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    parser: ThreadParser,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let parser = ThreadParser::new(&config.dialect(), config.emission)?;
        Ok(Self { config, parser })
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn parser(&self) -> &ThreadParser {
        &self.parser
    }

    /// Load every source under `root` and extract its messages
    pub fn run(&self, root: &Path) -> Result<Extraction> {
        let Corpus {
            sources,
            skipped,
            empty,
        } = load_corpus(root, &self.config.extension)?;

        let records = self.parse_sources(&sources);

        info!(
            "Extracted {} records from {} sources ({} skipped, {} empty)",
            records.len(),
            sources.len(),
            skipped.len(),
            empty.len()
        );

        Ok(Extraction {
            records,
            sources: sources.len(),
            skipped,
            empty,
        })
    }

    /// Parse sources independently and concatenate their records in order
    #[must_use]
    pub fn parse_sources(&self, sources: &[RawSource]) -> Vec<MessageRecord> {
        let per_source: Vec<Vec<MessageRecord>> = if self.config.parallel {
            sources
                .par_iter()
                .map(|source| self.parser.parse(&source.text))
                .collect()
        } else {
            sources
                .iter()
                .map(|source| self.parser.parse(&source.text))
                .collect()
        };

        per_source.into_iter().flatten().collect()
    }
}

/// Write records as one pretty-printed JSON array
pub fn write_json<W: Write>(writer: W, records: &[MessageRecord]) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

/// Write records as JSON Lines, one object per line
pub fn write_json_lines<W: Write>(mut writer: W, records: &[MessageRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
