//! Unicode-aware width measurement and truncation for menu labels.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, ending with `tail` when
/// anything was cut. Wide characters are never split.
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width >= max_width {
        return take_width(tail, max_width);
    }
    let mut result = take_width(s, max_width - tail_width);
    result.push_str(tail);
    result
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + cw > max_width {
            break;
        }
        result.push(c);
        width += cw;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("Alice", 10, "…"), "Alice");
    }

    #[test]
    fn long_text_gets_tail() {
        assert_eq!(truncate("Engineering", 6, "…"), "Engin…");
    }

    #[test]
    fn wide_chars_are_not_split() {
        // each CJK char is two columns
        assert_eq!(truncate("所有人員工", 5, "…"), "所有…");
        assert_eq!(display_width("所有"), 4);
    }

    #[test]
    fn tail_wider_than_budget() {
        assert_eq!(truncate("Engineering", 2, "..."), "..");
    }
}
