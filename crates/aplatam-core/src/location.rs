// crates/aplatam-core/src/location.rs

//! Query-string parsing for the map page.
//!
//! The map page is reached through links such as `/es/map?id=ba`. These
//! helpers extract the requested city id from whatever the host reports as
//! the current location. Nothing here can fail: malformed input resolves to
//! "no selection requested".

/// Query key carrying the requested city id.
pub const SELECTION_KEY: &str = "id";

/// Extract the city id requested by a query string such as `?id=abc123`.
///
/// Returns `None` when `id` is absent, empty, repeated, or not valid
/// percent-encoded UTF-8.
///
/// ```rust
/// use aplatam_core::location::resolve;
///
/// assert_eq!(resolve("?id=sp").as_deref(), Some("sp"));
/// assert_eq!(resolve("?lang=es"), None);
/// assert_eq!(resolve("?id=%E0%A4"), None);
/// ```
pub fn resolve(query: &str) -> Option<String> {
    resolve_key(query, SELECTION_KEY)
}

/// Same as [`resolve`] for an arbitrary key.
pub fn resolve_key(query: &str, key: &str) -> Option<String> {
    let query = query_part(query);
    if query.is_empty() {
        return None;
    }

    let mut found: Option<Option<String>> = None;
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode_component(raw_key).as_deref() != Some(key) {
            continue;
        }
        if found.is_some() {
            // `?id=a&id=b` parses to a list, which never names a single city.
            tracing::debug!(key, "selection key repeated; ignoring");
            return None;
        }
        found = Some(decode_component(raw_value));
    }

    let value = found.flatten().filter(|v| !v.is_empty());
    tracing::debug!(key, selection = ?value, "resolved selection");
    value
}

/// Strip everything that isn't the query: scheme/path before `?`, fragment
/// after `#`, and the `?` itself.
fn query_part(input: &str) -> &str {
    let input = input.trim();
    let input = input.split_once('#').map_or(input, |(before, _)| before);
    match input.split_once('?') {
        Some((_, query)) => query,
        // Bare `id=sp` without a leading `?`.
        None if input.contains('=') && !input.contains('/') => input,
        None => "",
    }
}

/// Decode one `application/x-www-form-urlencoded` component.
///
/// `+` becomes a space, `%XX` becomes the byte `0xXX`. Returns `None` for a
/// truncated or non-hex escape, or when the decoded bytes are not UTF-8.
pub fn decode_component(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_value)?;
                let lo = bytes.get(i + 2).copied().and_then(hex_value)?;
                out.push(hi << 4 | lo);
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8(out).ok()
}

/// Percent-encode a value for use inside a query string.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through; every other
/// byte of the UTF-8 encoding is written as `%XX`.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_id() {
        assert_eq!(resolve("?id=abc123").as_deref(), Some("abc123"));
        assert_eq!(resolve("id=abc123").as_deref(), Some("abc123"));
        assert_eq!(resolve("?lang=es&id=sp").as_deref(), Some("sp"));
    }

    #[test]
    fn resolves_from_full_url() {
        assert_eq!(
            resolve("https://example.org/es/map?id=ba#top").as_deref(),
            Some("ba")
        );
        assert_eq!(resolve("https://example.org/es/map"), None);
    }

    #[test]
    fn absent_or_empty_is_none() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("?"), None);
        assert_eq!(resolve("?id="), None);
        assert_eq!(resolve("?id"), None);
        assert_eq!(resolve("?identity=ba"), None);
        assert_eq!(resolve("?zoom=3"), None);
    }

    #[test]
    fn malformed_degrades_to_none() {
        assert_eq!(resolve("?id=%"), None);
        assert_eq!(resolve("?id=%zz"), None);
        assert_eq!(resolve("?id=%ff"), None);
        assert_eq!(resolve("?&&=&id=ba").as_deref(), Some("ba"));
    }

    #[test]
    fn repeated_key_is_none() {
        assert_eq!(resolve("?id=ba&id=sp"), None);
    }

    #[test]
    fn decodes_escapes() {
        assert_eq!(resolve("?id=s%C3%A3o+paulo").as_deref(), Some("são paulo"));
        assert_eq!(resolve("?%69d=ba").as_deref(), Some("ba"));
    }

    #[test]
    fn custom_key() {
        assert_eq!(resolve_key("?city=lp&id=ba", "city").as_deref(), Some("lp"));
    }

    #[test]
    fn encode_then_decode_preserves_value() {
        let raw = "São Paulo & más";
        assert_eq!(decode_component(&encode_component(raw)).as_deref(), Some(raw));
    }
}
