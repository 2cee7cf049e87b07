//! Marker vocabularies for thread export formats

use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};

/// The literal tokens that anchor header fields in one export format
///
/// Each field lists its accepted alternatives. Markers are matched literally
/// and case-sensitively at the start of a line, after optional indentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Sender header; also starts a new message
    pub from: Vec<String>,

    /// Timestamp header
    pub sent: Vec<String>,

    /// Recipient list header
    pub to: Vec<String>,

    /// Subject header; the body follows it
    pub subject: Vec<String>,

    /// Line that opens a trailing signature block
    #[serde(default = "default_signature")]
    pub signature: String,
}

fn default_signature() -> String {
    "--".to_string()
}

fn markers(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| (*t).to_string()).collect()
}

impl Dialect {
    /// Outlook-style English export headers
    #[must_use]
    pub fn english() -> Self {
        Self {
            from: markers(&["From:"]),
            sent: markers(&["Sent:", "Date:"]),
            to: markers(&["To:"]),
            subject: markers(&["Subject:"]),
            signature: default_signature(),
        }
    }

    /// Outlook-style Polish export headers
    #[must_use]
    pub fn polish() -> Self {
        Self {
            from: markers(&["Od:"]),
            sent: markers(&["Wysłano:"]),
            to: markers(&["Do:"]),
            subject: markers(&["Temat:"]),
            signature: default_signature(),
        }
    }

    /// Reject marker sets that would match everything or nothing
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("from", &self.from),
            ("sent", &self.sent),
            ("to", &self.to),
            ("subject", &self.subject),
        ];

        for (field, tokens) in fields {
            if tokens.is_empty() {
                return Err(ParseError::InvalidDialect {
                    field: field.into(),
                    details: "no markers given".into(),
                });
            }
            if tokens.iter().any(|t| t.trim().is_empty()) {
                return Err(ParseError::InvalidDialect {
                    field: field.into(),
                    details: "blank marker".into(),
                });
            }
        }

        if self.signature.trim().is_empty() {
            return Err(ParseError::InvalidDialect {
                field: "signature".into(),
                details: "blank delimiter".into(),
            });
        }

        Ok(())
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::english()
    }
}

/// Built-in dialects selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectPreset {
    English,
    Polish,
}

impl DialectPreset {
    #[must_use]
    pub fn dialect(self) -> Dialect {
        match self {
            Self::English => Dialect::english(),
            Self::Polish => Dialect::polish(),
        }
    }
}

/// A dialect given either by preset name or spelled out in full
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DialectSetting {
    Preset(DialectPreset),
    Custom(Dialect),
}

impl DialectSetting {
    #[must_use]
    pub fn resolve(&self) -> Dialect {
        match self {
            Self::Preset(preset) => preset.dialect(),
            Self::Custom(dialect) => dialect.clone(),
        }
    }
}

impl Default for DialectSetting {
    fn default() -> Self {
        Self::Preset(DialectPreset::English)
    }
}
