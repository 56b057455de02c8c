//! Log sanitization for patient data.
//!
//! Formatted log lines pass through [`SanitizingMakeWriter`] before reaching
//! the sink. It masks:
//! - Feature vector payloads (`"input": [...]`, `input=[...]`)
//! - Vital sign key/value pairs (`cholesterol=233`, `"maxHR": 150`)
//! - Contact details (emails, phone numbers)
//!
//! Prefer keeping vitals out of log calls entirely; this is the fallback.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Longest line sanitized as-is; longer input is truncated first.
const MAX_SANITIZE_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Rule>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let rules: Vec<(&'static str, &'static str)> = vec![
            // Encoded feature vectors
            (
                r#""?input"?\s*[:=]\s*\[[^\]]*\]"#,
                "input=[REDACTED-FEATURES]",
            ),
            // Vital signs and form fields
            (
                r#"(?i)"?\b(age|sex|cholesterol|resting_?bp|max_?hr|oldpeak|fasting_?(?:bs|blood_sugar)|chest_?pain(?:_?type)?|resting_?ecg|angina|exercise_?angina|st_?slope|slope)\b"?\s*[:=]\s*"?[A-Za-z0-9.\-]+"?"#,
                "$1=[REDACTED]",
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
                "[REDACTED-PHONE]",
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        Patterns { set, rules }
    })
}

/// Mask patient data in a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, MAX_SANITIZE_BYTES)
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check whether a string would be altered by [`sanitize`].
#[must_use]
pub fn contains_patient_data(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, MAX_SANITIZE_BYTES);
    patterns().set.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log output
/// line by line before it is written to the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }

    fn flush_rest(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A huge line with no newline is flushed (truncated) rather than buffered forever.
        if self.buffer.len() > MAX_SANITIZE_BYTES * 2 {
            self.flush_rest()?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        self.flush_rest()?;
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
        }
    }
}
