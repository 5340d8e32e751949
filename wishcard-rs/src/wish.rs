//! The wish data model.

/// Label rendered for wishes without an author.
pub const ANONYMOUS_AUTHOR: &str = "匿名";

/// Maximum number of characters shown for a wish in the compact marquee.
///
/// This cap applies before any layout and is independent of the multi-line
/// card layout; callers must pick the cap matching their render target.
pub const MARQUEE_MAX_CHARS: usize = 20;

/// A user-submitted wish: free-form content plus an optional author.
///
/// Owned by the caller's wish list; the pipeline borrows it and never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wish {
    /// The wish text, unbounded length.
    pub content: String,
    /// The author name; empty means anonymous.
    pub author: String,
}

impl Wish {
    /// Create a wish from content and author strings.
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
        }
    }

    /// The author name to render, substituting the anonymous label for
    /// missing authors.
    pub fn display_author(&self) -> &str {
        let author = self.author.trim();
        if author.is_empty() {
            ANONYMOUS_AUTHOR
        } else {
            author
        }
    }
}

/// Cap wish content for the compact marquee render target.
pub fn marquee_snippet(content: &str) -> String {
    content.chars().take(MARQUEE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_author_renders_anonymous() {
        let wish = Wish::new("平安", "");
        assert_eq!(wish.display_author(), ANONYMOUS_AUTHOR);

        let wish = Wish::new("平安", "   ");
        assert_eq!(wish.display_author(), ANONYMOUS_AUTHOR);
    }

    #[test]
    fn named_author_renders_as_is() {
        let wish = Wish::new("心想事成", "小明");
        assert_eq!(wish.display_author(), "小明");
    }

    #[test]
    fn marquee_snippet_caps_at_twenty_chars() {
        let long = "心想事成万事如意新的一年身体健康平安喜乐福星高照";
        let snippet = marquee_snippet(long);
        assert_eq!(snippet.chars().count(), MARQUEE_MAX_CHARS);
        assert!(long.starts_with(&snippet));
    }

    #[test]
    fn marquee_snippet_keeps_short_content() {
        assert_eq!(marquee_snippet("平安"), "平安");
        assert_eq!(marquee_snippet(""), "");
    }
}
