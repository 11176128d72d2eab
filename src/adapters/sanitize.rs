//! Log sanitization for health measurements and contact details.
//!
//! Formatted log lines pass through [`SanitizingMakeWriter`], which redacts:
//! - `measurement=value` / `measurement: value` pairs for the eight health fields
//! - email addresses
//! - phone numbers
//!
//! Callers should still log counts and outcomes rather than raw values; this
//! is a fallback for values that slip into a formatted message.

use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

/// Default cap on bytes sanitized per call.
///
/// Overridable via `GLYCOSCOPE_SANITIZE_MAX_BYTES`.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        let specs: [(&str, &str); 3] = [
            (
                r"(?i)\b(pregnancies|glucose|blood[_ ]pressure|skin[_ ]thickness|insulin|bmi|diabetes[_ ]pedigree|age)(\s*[:=]\s*|\s+\()-?\d+(?:\.\d+)?",
                "${1}${2}[REDACTED]",
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s][0-9]{3}[-.\s][0-9]{4}\b",
                "[REDACTED-PHONE]",
            ),
        ];
        specs
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect()
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var("GLYCOSCOPE_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
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

/// Redact measurement values and contact details from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for rule in rules() {
        if rule.regex.is_match(&result) {
            result = rule.regex.replace_all(&result, rule.replacement).into_owned();
        }
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
        if input.ends_with('\n') {
            result.push('\n');
        }
    }
    result
}

/// A `tracing_subscriber` writer that sanitizes each formatted line before
/// it reaches the underlying sink.
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

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_line(&mut self, line: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(line);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn drain_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_line(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // Bound buffering when a formatter emits a huge line without newlines.
        if self.buffer.len() > max_sanitize_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_line(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_line(&pending)?;
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_redacts_measurement_pairs() {
        let out = sanitize("checked glucose=148 bmi: 33.6 age=50");
        assert_eq!(out, "checked glucose=[REDACTED] bmi: [REDACTED] age=[REDACTED]");
    }

    #[test]
    fn test_redacts_validation_messages() {
        let out = sanitize("Blood Pressure (10) is below minimum expected value (24)");
        assert!(out.starts_with("Blood Pressure ([REDACTED])"));
        assert!(!out.contains("(10)"));
    }

    #[test]
    fn test_redacts_contact_details() {
        let out = sanitize("contact patient@clinic.org or 555-123-4567");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(out.contains("[REDACTED-PHONE]"));
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        let line = "Loaded dataset: 768 records, 9 features";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_truncates_large_inputs() {
        let out = sanitize_with_limit("glucose=120 and a long tail of text", 11);
        assert_eq!(out, "glucose=[REDACTED] [TRUNCATED]");
    }

    #[test]
    fn test_truncation_keeps_line_ending() {
        let line = format!("{}\n", "x".repeat(64));
        let out = sanitize_with_limit(&line, 8);
        assert_eq!(out, "xxxxxxxx [TRUNCATED]\n");
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_writer_sanitizes_per_line() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter {
                inner: &mut sink,
                buffer: Vec::new(),
            };
            writer.write_all(b"insulin=85\npartial ").expect("write");
            writer.write_all(b"age=45").expect("write");
            writer.flush().expect("flush");
        }
        assert_eq!(
            String::from_utf8(sink).expect("utf8"),
            "insulin=[REDACTED]\npartial age=[REDACTED]"
        );
    }
}
