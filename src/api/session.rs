//! Session-affinity cookie context
//!
//! The server routes requests for a job to the backend node holding its
//! results via cookies. [`SessionContext`] captures every `set-cookie` a
//! response carries and renders the `Cookie` header to echo back on the next
//! request. Later responses overwrite earlier values for the same cookie name
//! (last-response-wins).
//!
//! The context is threaded explicitly through the HTTP client rather than
//! reached through ambient state; sequential execution makes it
//! single-writer-at-a-time.

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Sticky session cookies, echoed on every outgoing request once received.
#[derive(Debug, Default, Clone)]
pub struct SessionContext {
    cookies: Vec<(String, String)>,
}

impl SessionContext {
    /// Create an empty context with no session established.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge all `set-cookie` headers from a response into the context.
    ///
    /// Only the `name=value` pair is kept; attributes like `Path` or
    /// `Expires` are dropped. Unparseable values are ignored.
    pub fn absorb(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let Some(pair) = raw.split(';').next() else { continue };
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() {
                continue;
            }
            match self.cookies.iter_mut().find(|(n, _)| n == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => self.cookies.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// Render the `Cookie` request header, or `None` before any session
    /// has been established.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
