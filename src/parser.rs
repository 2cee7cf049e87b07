//! Thread splitting and per-message field extraction
//!
//! Processing is two-phase: a blob is first cut into segments at every
//! sender marker, then each segment is searched independently for its
//! header fields. Field searches do not depend on header order; only the
//! body is anchored, to the subject line.

use crate::dialect::Dialect;
use crate::error::Result;
use crate::types::{Identity, MessageRecord};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

static DEFAULT_PARSER: LazyLock<ThreadParser> = LazyLock::new(|| {
    ThreadParser::new(&Dialect::english(), EmissionPolicy::default()).unwrap()
});

/// Parse one English-dialect thread export with the default emission policy
#[must_use]
pub fn parse_thread(text: &str) -> Vec<MessageRecord> {
    DEFAULT_PARSER.parse(text)
}

/// Which extracted segments become records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmissionPolicy {
    /// Keep a segment only if a sender or recipient name/address was found
    #[default]
    IdentityRequired,

    /// Also keep segments that have a body but no identity
    AnyContent,
}

impl EmissionPolicy {
    #[must_use]
    pub const fn accepts(self, record: &MessageRecord) -> bool {
        match self {
            Self::IdentityRequired => record.has_identity(),
            Self::AnyContent => record.has_identity() || record.has_body(),
        }
    }
}

/// Compiled marker patterns for one dialect
#[derive(Debug, Clone)]
pub struct ThreadParser {
    message_start: Regex,
    from: Regex,
    sent: Regex,
    to: Regex,
    subject: Regex,
    signature: String,
    policy: EmissionPolicy,
}

/// Start-of-line marker, optional indentation (tabs or any space separator)
fn marker_pattern(tokens: &[String]) -> String {
    let alternatives = tokens
        .iter()
        .map(|t| regex::escape(t.trim()))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"(?m)^[\t\p{{Zs}}]*(?:{alternatives})")
}

/// Marker plus the remainder of its line in group 1
fn field_regex(tokens: &[String]) -> Result<Regex> {
    let pattern = format!(r"{}[\t\p{{Zs}}]*([^\n]*)$", marker_pattern(tokens));
    Ok(Regex::new(&pattern)?)
}

impl ThreadParser {
    pub fn new(dialect: &Dialect, policy: EmissionPolicy) -> Result<Self> {
        dialect.validate()?;

        Ok(Self {
            message_start: Regex::new(&marker_pattern(&dialect.from))?,
            from: field_regex(&dialect.from)?,
            sent: field_regex(&dialect.sent)?,
            to: field_regex(&dialect.to)?,
            subject: field_regex(&dialect.subject)?,
            signature: dialect.signature.trim().to_string(),
            policy,
        })
    }

    #[must_use]
    pub const fn policy(&self) -> EmissionPolicy {
        self.policy
    }

    /// Parse every message in a thread export, in document order
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<MessageRecord> {
        let text = normalize_newlines(text);
        let segments = self.split_segments(&text);
        let records: Vec<MessageRecord> = segments
            .iter()
            .filter_map(|segment| self.parse_segment(segment))
            .collect();

        debug!(
            "Split thread into {} segments, kept {} records",
            segments.len(),
            records.len()
        );

        records
    }

    /// Cut a blob at every sender marker that opens a line
    ///
    /// Each segment starts with its marker. Text before the first marker
    /// belongs to no message and is dropped.
    #[must_use]
    pub fn split_segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let starts: Vec<usize> = self
            .message_start
            .find_iter(text)
            .map(|m| m.start())
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(text.len());
                text[start..end].trim()
            })
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    /// Extract a segment and apply the emission policy
    #[must_use]
    pub fn parse_segment(&self, segment: &str) -> Option<MessageRecord> {
        let record = self.extract_fields(segment);
        self.policy.accepts(&record).then_some(record)
    }

    /// Run all field searches over one segment
    #[must_use]
    pub fn extract_fields(&self, segment: &str) -> MessageRecord {
        let segment = normalize_newlines(segment);

        let sender = first_line_value(&self.from, &segment)
            .map(|(value, _)| Identity::parse(value))
            .unwrap_or_default();

        let recipient = first_line_value(&self.to, &segment)
            .map(|(value, _)| Identity::first_listed(value))
            .unwrap_or_default();

        let sent_at =
            first_line_value(&self.sent, &segment).and_then(|(value, _)| non_empty(value));

        let subject_line = first_line_value(&self.subject, &segment);
        let subject = subject_line.and_then(|(value, _)| non_empty(value));
        let body = subject_line.and_then(|(_, line_end)| self.extract_body(&segment, line_end));

        MessageRecord {
            sender_name: sender.name,
            sender_email: sender.email,
            recipient_name: recipient.name,
            recipient_email: recipient.email,
            subject,
            sent_at,
            body,
        }
    }

    /// Body text following the subject line that ends at `subject_end`
    fn extract_body(&self, segment: &str, subject_end: usize) -> Option<String> {
        let rest = segment[subject_end..].strip_prefix('\n')?;

        // One blank separator line is expected; without it the body starts
        // right after the subject
        let block = match rest.split_once('\n') {
            Some((first, tail)) if first.trim().is_empty() => tail,
            None if rest.trim().is_empty() => "",
            _ => rest,
        };

        let block = self
            .message_start
            .find(block)
            .map_or(block, |m| &block[..m.start()]);

        non_empty(strip_signature(block, &self.signature))
    }
}

/// Value and line end of the first line matching `re`
fn first_line_value<'a>(re: &Regex, text: &'a str) -> Option<(&'a str, usize)> {
    let caps = re.captures(text)?;
    let line = caps.get(0)?;
    let value = caps.get(1).map_or("", |m| m.as_str());
    Some((value.trim(), line.end()))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Drop everything from the first standalone delimiter line onward
fn strip_signature<'a>(text: &'a str, delimiter: &str) -> &'a str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            return &text[..offset];
        }
        offset += line.len();
    }
    text
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
