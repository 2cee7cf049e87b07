// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Thread Export Extractor
//!
//! Splits plain-text email thread exports into normalized message records.
//!
//! # Features
//!
//! - Recursive corpus discovery that skips unreadable and blank files
//! - Thread splitting at every sender header
//! - Order-independent header extraction (sender, sent, recipient, subject)
//! - Signature removal from message bodies
//! - Pluggable marker dialects (English and Polish built in)
//! - Parallel parsing with stable output order
//!
//! # Example
//!
//! ```rust
//! use thread_extract::parse_thread;
//!
//! let export = "From: Jane Doe <jane@example.com>\n\
//!               Sent: Monday, 3 March 2025 10:00\n\
//!               To: bob@example.com, carol@example.com\n\
//!               Subject: Budget\n\
//!               \n\
//!               Numbers attached.\n\
//!               --\n\
//!               Jane";
//!
//! let records = parse_thread(export);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].sender_email.as_deref(), Some("jane@example.com"));
//! assert_eq!(records[0].recipient_email.as_deref(), Some("bob@example.com"));
//! assert_eq!(records[0].body.as_deref(), Some("Numbers attached."));
//! ```

mod config;
mod dialect;
mod error;
mod loader;
mod parser;
mod pipeline;
mod types;

pub use config::Config;
pub use dialect::{Dialect, DialectPreset, DialectSetting};
pub use error::{ParseError, Result, SourceError};
pub use loader::{Corpus, SkippedSource, load_corpus, read_source};
pub use parser::{EmissionPolicy, ThreadParser, parse_thread};
pub use pipeline::{Extraction, Pipeline, write_json, write_json_lines};
pub use types::*;
