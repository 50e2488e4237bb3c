//! Cookie value analysis.
//!
//! Turns a raw `Cookie` header value into a description line that reveals the
//! *shape* of each cookie (length, format, role) but never its content. The
//! description replaces the entire header line in sanitized output, so the
//! model still sees how the application uses cookies without seeing a single
//! literal value.

/// Role of a cookie entry, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieRole {
    /// Name contains "auth", "token", or "jwt".
    Auth,
    /// Name contains "sess".
    Session,
    /// Anything else.
    Other,
}

/// Classify a cookie by name substring match (case-insensitive).
/// Auth indicators are checked before session indicators.
pub fn classify_name(name: &str) -> CookieRole {
    let lower = name.to_lowercase();
    if lower.contains("auth") || lower.contains("token") || lower.contains("jwt") {
        CookieRole::Auth
    } else if lower.contains("sess") {
        CookieRole::Session
    } else {
        CookieRole::Other
    }
}

/// Describe a cookie value without exposing it.
pub fn describe_value(value: &str, role: CookieRole) -> String {
    if value.is_empty() {
        return "empty".to_string();
    }

    match role {
        CookieRole::Auth => {
            // "eyJ" is the base64url encoding of '{"' — the start of a JWT header.
            if value.starts_with("eyJ") {
                format!("AUTH_TOKEN(JWT format, {} chars)", value.len())
            } else {
                format!("AUTH_TOKEN({} chars)", value.len())
            }
        }
        CookieRole::Session => format!("SESSION_ID({} chars)", value.len()),
        CookieRole::Other => {
            if value.chars().all(|c| c.is_ascii_digit()) {
                format!("NUMERIC({} digits)", value.len())
            } else if value.chars().all(|c| c.is_ascii_hexdigit()) {
                format!("HEX({} chars)", value.len())
            } else {
                format!("STRING({} chars)", value.len())
            }
        }
    }
}

/// Produce the sanitized replacement for an entire `Cookie` header line.
///
/// Best-effort parsing: entries are split on `;`, names and values trimmed,
/// the first `=` separates name from value. Entries with an empty name are
/// skipped; malformed syntax never errors.
pub fn describe_cookie_header(cookie_value: &str) -> String {
    let mut descriptions = Vec::new();

    for entry in cookie_value.split(';') {
        let entry = entry.trim();
        let (name, value) = match entry.split_once('=') {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (entry, ""),
        };
        if name.is_empty() {
            continue;
        }

        let role = classify_name(name);
        descriptions.push(format!("{}={}", name, describe_value(value, role)));
    }

    format!("Cookie: [{}]", descriptions.join("; "))
}
