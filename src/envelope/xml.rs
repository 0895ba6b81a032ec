//! XML entity escaping.

/// Undo the three entities the caller is expected to use inside the wrapper tag.
///
/// Replacement order is `&lt;`, `&gt;`, then `&amp;`, so `&amp;lt;` becomes `&lt;`
/// rather than `<`.
pub fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Escape the five XML special characters for embedding text in an element.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_each_special_character() {
        assert_eq!(escape_text("<"), "&lt;");
        assert_eq!(escape_text(">"), "&gt;");
        assert_eq!(escape_text("&"), "&amp;");
        assert_eq!(escape_text("\""), "&quot;");
        assert_eq!(escape_text("'"), "&apos;");
    }

    #[test]
    fn test_escape_does_not_double_escape() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_text("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_unescape_order() {
        assert_eq!(unescape_entities("&lt;a&gt;x &amp; y&lt;/a&gt;"), "<a>x & y</a>");
        // `&amp;` is undone last, so an escaped entity survives one level
        assert_eq!(unescape_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_unescape_leaves_other_entities() {
        assert_eq!(unescape_entities("&quot;&apos;"), "&quot;&apos;");
    }
}
