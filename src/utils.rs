use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "New Conversation";

const TITLE_LEN: usize = 30;

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// First 30 characters of `content`, with "..." appended when it was cut.
pub fn derive_title(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(TITLE_LEN).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_are_kept_whole() {
        assert_eq!(derive_title("How did they meet?"), "How did they meet?");
        assert_eq!(derive_title(&"a".repeat(30)), "a".repeat(30));
    }

    #[test]
    fn long_titles_are_cut_at_thirty_chars() {
        let title = derive_title("Hello there, this is a long first message exceeding thirty chars");
        assert_eq!(title, "Hello there, this is a long fi...");
    }

    #[test]
    fn titles_count_chars_not_bytes() {
        let input = "é".repeat(31);
        assert_eq!(derive_title(&input), format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
