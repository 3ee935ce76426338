use aho_corasick::AhoCorasick;
use memchr::memchr;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// Used for both attribute values and character data, so quotes are escaped too.
///
/// # Examples
///
/// ```
/// use docweave::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    if !s.bytes().any(|b| matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'')) {
        return s.to_string();
    }
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape XML entity and character references.
///
/// Resolves the five predefined entities and numeric character references in a
/// single pass, so `&amp;lt;` becomes `&lt;` rather than `<`. Unknown or
/// malformed references are left unchanged.
///
/// # Examples
///
/// ```
/// use docweave::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&quot;hello&apos;"), "\"hello'");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&#x2611; done"), "\u{2611} done");
/// assert_eq!(unescape_xml("a & b"), "a & b"); // unchanged
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;"); // unknown entity
/// ```
pub fn unescape_xml(s: &str) -> String {
    if memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let resolved = memchr(b';', tail.as_bytes())
            .and_then(|end| resolve_entity(&tail[..end]).map(|value| (end, value)));
        match resolved {
            Some((end, value)) => {
                out.push_str(&value);
                rest = &tail[end + 1..];
            },
            None => {
                out.push('&');
                rest = tail;
            },
        }
    }
    out.push_str(rest);
    out
}

/// Resolve the body of a general entity reference (the part between `&` and `;`).
///
/// Handles the five predefined entities plus decimal (`#65`) and hexadecimal
/// (`#x41`) character references. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use docweave::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp").as_deref(), Some("&"));
/// assert_eq!(resolve_entity("#x2713").as_deref(), Some("\u{2713}"));
/// assert_eq!(resolve_entity("#65").as_deref(), Some("A"));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
pub fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let reference = name.strip_prefix('#')?;
            let code = match reference.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => reference.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        },
    };
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_round_trip() {
        let raw = r#"Tom & "Jerry" <cartoon> 'classic'"#;
        assert_eq!(unescape_xml(&escape_xml(raw)), raw);
    }

    #[test]
    fn test_escape_plain_text_is_unchanged() {
        assert_eq!(escape_xml("plain text"), "plain text");
        assert_eq!(unescape_xml("plain text"), "plain text");
    }

    #[test]
    fn test_unescape_keeps_dangling_ampersand() {
        assert_eq!(unescape_xml("fish & chips &amp"), "fish & chips &amp");
    }

    #[test]
    fn test_resolve_entity_rejects_invalid_code_points() {
        assert_eq!(resolve_entity("#xD800"), None);
        assert_eq!(resolve_entity("#zz"), None);
        assert_eq!(resolve_entity(""), None);
    }
}
