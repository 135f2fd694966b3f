//! QR payload decoding.
//!
//! Admission codes are URLs of the form `<base>/ingressi.php?id=<digits>`.
//! The scanner (a keyboard-wedge reader or a pasted string) delivers that URL
//! as plain text.

use regex::Regex;

use crate::client::LOOKUP_PATH;
use crate::error::{AppError, Result};

/// Extracts guest identifiers from scanned admission URLs.
#[derive(Debug, Clone)]
pub struct CodeMatcher {
    pattern: Regex,
}

impl CodeMatcher {
    /// Build a matcher for codes issued by the service at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        let source = format!(r"{}/{}\?id=(\d+)", regex::escape(base), regex::escape(LOOKUP_PATH));
        let pattern = Regex::new(&source).map_err(|e| AppError::config(format!("Bad code pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Guest identifier from the payload, or an empty string when it does not match.
    ///
    /// An empty identifier is still sent to the lookup endpoint, which rejects it.
    pub fn extract_guest_id(&self, payload: &str) -> String {
        self.pattern
            .captures(payload)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}
