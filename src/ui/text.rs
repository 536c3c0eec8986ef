// Display-width aware text helpers
//
// Labels are clipped by terminal columns, not bytes, so that CJK table
// names and emoji don't overflow node boxes or split a character.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Clip `text` to at most `max_width` terminal columns
///
/// Appends an ellipsis when clipped. The result never exceeds
/// `max_width` columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_to_width("FakeSource", 20), "FakeSource");
    }

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("FakeSource", 5), "Fake…");
    }

    #[test]
    fn test_wide_chars_not_split() {
        // Each CJK char is two columns wide
        let clipped = truncate_to_width("数据源表", 5);
        assert_eq!(clipped, "数据…");
        assert!(UnicodeWidthStr::width(clipped.as_str()) <= 5);
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_width(text in "\\PC{0,40}", max in 0usize..30) {
            let clipped = truncate_to_width(&text, max);
            prop_assert!(UnicodeWidthStr::width(clipped.as_str()) <= max);
        }
    }
}
