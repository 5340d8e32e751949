//! Measurement-driven text wrapping and truncation.
//!
//! CJK text has no whitespace-delimited words, so wrapping walks the text one
//! character at a time against an injected measurement function. The engine
//! is pure: identical inputs always produce identical output, and nothing is
//! drawn here.

/// Marker appended to a truncated final line.
pub const ELLIPSIS: &str = "...";

/// Wrapped display lines plus a truncation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    /// At most `max_lines` display lines, in order.
    pub lines: Vec<String>,
    /// True when the source text needed more lines than the cap allowed.
    pub truncated: bool,
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// A line is committed whenever appending the next character would exceed
/// `max_width` (a line already holding text is never widened past the cap;
/// a single over-wide character still occupies its own line). The final
/// accumulated line is always committed, so empty input yields one empty
/// line — no line is ever dropped.
pub fn wrap_chars<F>(text: &str, measure: &mut F, max_width: f32) -> Vec<String>
where
    F: FnMut(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);

        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current = candidate;
        }
    }
    lines.push(current);

    lines
}

/// Wrap `text` and cap the result at `max_lines`, ellipsis-fitting the final
/// retained line when the source was cut.
pub fn layout<F>(text: &str, measure: &mut F, max_width: f32, max_lines: usize) -> LayoutResult
where
    F: FnMut(&str) -> f32,
{
    debug_assert!(max_lines > 0, "layout requires at least one line");

    let mut lines = wrap_chars(text, measure, max_width);
    let truncated = lines.len() > max_lines;

    if truncated {
        lines.truncate(max_lines);
        if let Some(last) = lines.pop() {
            lines.push(fit_ellipsis(last, measure, max_width));
        }
    }

    LayoutResult { lines, truncated }
}

/// Append the ellipsis to `line`, dropping trailing characters until the
/// combined text measures within `max_width` (or the line is empty).
///
/// Re-measuring after every removed character is O(n²) in the worst case,
/// which is fine for the short caption-length inputs this engine handles.
fn fit_ellipsis<F>(mut line: String, measure: &mut F, max_width: f32) -> String
where
    F: FnMut(&str) -> f32,
{
    loop {
        let candidate = format!("{line}{ELLIPSIS}");
        if measure(&candidate) <= max_width || line.is_empty() {
            return candidate;
        }
        line.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Synthetic measurement: every character is 10 units wide.
    fn ten_per_char(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn short_text_is_a_single_untruncated_line() {
        let result = layout("平安", &mut ten_per_char, 100.0, 4);
        assert_eq!(result.lines, vec!["平安".to_string()]);
        assert!(!result.truncated);
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        let result = layout("", &mut ten_per_char, 100.0, 4);
        assert_eq!(result.lines, vec![String::new()]);
        assert!(!result.truncated);
    }

    #[test]
    fn wrap_breaks_at_width_boundary() {
        // 5 characters fit per 50-unit line
        let lines = wrap_chars("一二三四五六七八九十一二", &mut ten_per_char, 50.0);
        assert_eq!(
            lines,
            vec![
                "一二三四五".to_string(),
                "六七八九十".to_string(),
                "一二".to_string(),
            ]
        );
    }

    #[test]
    fn overwide_single_char_occupies_its_own_line() {
        let lines = wrap_chars("好运", &mut ten_per_char, 5.0);
        assert_eq!(lines, vec!["好".to_string(), "运".to_string()]);
    }

    #[rstest]
    #[case(4)]
    #[case(3)]
    #[case(1)]
    fn never_exceeds_max_lines(#[case] max_lines: usize) {
        let text = "心想事成万事如意新的一年身体健康平安喜乐";
        let result = layout(text, &mut ten_per_char, 50.0, max_lines);
        assert!(result.lines.len() <= max_lines);
        assert!(result.truncated);
    }

    #[test]
    fn truncated_last_line_carries_ellipsis_and_fits() {
        let text = "心想事成万事如意新的一年身体健康平安喜乐";
        let max_width = 50.0;
        let result = layout(text, &mut ten_per_char, max_width, 4);

        assert_eq!(result.lines.len(), 4);
        assert!(result.truncated);
        let last = result.lines.last().unwrap();
        assert!(last.ends_with(ELLIPSIS));
        assert!(ten_per_char(last) <= max_width);
    }

    #[test]
    fn ellipsis_fit_pops_chars_until_it_fits() {
        // 5 chars per line; "..." costs 30, so only 2 content chars survive
        let fitted = fit_ellipsis("一二三四五".to_string(), &mut ten_per_char, 50.0);
        assert_eq!(fitted, "一二...");
    }

    #[test]
    fn ellipsis_fit_on_empty_line_is_just_the_marker() {
        let fitted = fit_ellipsis(String::new(), &mut ten_per_char, 10.0);
        assert_eq!(fitted, ELLIPSIS);
    }

    #[test]
    fn exact_fit_is_not_split() {
        let lines = wrap_chars("一二三四五", &mut ten_per_char, 50.0);
        assert_eq!(lines, vec!["一二三四五".to_string()]);
    }
}
