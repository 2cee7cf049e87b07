//! Core types for loaded sources and extracted messages

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

// "Name <address>" with the address at the very end of the line
static NAMED_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*<([^<>]+)>$").unwrap());

static BARE_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.+-]+@[\w.-]+\.\w+$").unwrap());

/// One decoded text file from the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    /// Where the text was read from
    pub path: PathBuf,

    /// Whole-file content, trimmed
    pub text: String,
}

impl RawSource {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// A single message recovered from a thread export
///
/// Every field is optional: exports routinely omit headers, and absence is
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Display name of the sender
    pub sender_name: Option<String>,

    /// Address of the sender
    pub sender_email: Option<String>,

    /// Display name of the first-listed recipient
    pub recipient_name: Option<String>,

    /// Address of the first-listed recipient
    pub recipient_email: Option<String>,

    /// Subject line as written
    pub subject: Option<String>,

    /// Timestamp text as written, never parsed
    pub sent_at: Option<String>,

    /// Message content without the trailing signature
    pub body: Option<String>,
}

impl MessageRecord {
    /// Sender as an identity pair
    #[must_use]
    pub fn sender(&self) -> Identity {
        Identity {
            name: self.sender_name.clone(),
            email: self.sender_email.clone(),
        }
    }

    /// Primary recipient as an identity pair
    #[must_use]
    pub fn recipient(&self) -> Identity {
        Identity {
            name: self.recipient_name.clone(),
            email: self.recipient_email.clone(),
        }
    }

    /// At least one of the four name/address fields is present
    #[must_use]
    pub const fn has_identity(&self) -> bool {
        self.sender_name.is_some()
            || self.sender_email.is_some()
            || self.recipient_name.is_some()
            || self.recipient_email.is_some()
    }

    /// A body survived signature removal
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Name and address decoded from one header line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name (e.g., "Jane Doe")
    pub name: Option<String>,

    /// Address (e.g., "jane@example.com")
    pub email: Option<String>,
}

impl Identity {
    /// Decode `Name <address>`, a bare address, or a bare name
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Self::default();
        }

        if let Some(caps) = NAMED_ADDRESS_REGEX.captures(s) {
            let email = caps[2].trim();
            if !email.is_empty() {
                return Self {
                    name: Some(caps[1].trim().to_string()),
                    email: Some(email.to_string()),
                };
            }
        }

        if BARE_ADDRESS_REGEX.is_match(s) {
            return Self {
                name: None,
                email: Some(s.to_string()),
            };
        }

        Self {
            name: Some(s.to_string()),
            email: None,
        }
    }

    /// Decode only the first entry of a comma-separated recipient list
    #[must_use]
    pub fn first_listed(list: &str) -> Self {
        list.split(',').next().map_or_else(Self::default, Self::parse)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.email) {
            (Some(name), Some(email)) => write!(f, "{name} <{email}>"),
            (Some(name), None) => write!(f, "{name}"),
            (None, Some(email)) => write!(f, "{email}"),
            (None, None) => Ok(()),
        }
    }
}
