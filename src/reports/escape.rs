//! Escaping for Markdown reports.
//!
//! Business names, addresses and recommendation texts can contain characters
//! with Markdown meaning (`Cafe | Bar`, `*Star* Salon`). They are escaped
//! before being embedded so they cannot break table layout or add markup.

/// Escape a string for safe inclusion in Markdown table cells.
///
/// # Examples
///
/// ```
/// use gbp_score::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("Cafe | Bar"), "Cafe \\| Bar");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// ```
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in Markdown inline content.
///
/// # Examples
///
/// ```
/// use gbp_score::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("*Star* Salon"), "\\*Star\\* Salon");
/// ```
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '#' => result.push_str("\\#"),
            '|' => result.push_str("\\|"),
            '<' => result.push_str("\\<"),
            '>' => result.push_str("\\>"),
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_escaping() {
        assert_eq!(escape_markdown_table("a|b|c"), "a\\|b\\|c");
        assert_eq!(escape_markdown_table("[link](x)"), "\\[link\\](x)");
        assert_eq!(escape_markdown_table("a\r\nb"), "a b");
    }

    #[test]
    fn test_inline_escaping() {
        assert_eq!(escape_markdown_inline("# Heading"), "\\# Heading");
        assert_eq!(escape_markdown_inline("<b>"), "\\<b\\>");
        assert_eq!(escape_markdown_inline("Mia by Tanishq"), "Mia by Tanishq");
    }
}
