//! Plain-text cleanup for tracker HTML fields.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG_RE regex should compile"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL_RE regex should compile"));

// `&amp;` goes last so `&amp;lt;` decodes to `&lt;`, not `<`.
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Strip markup and links from `raw` and collapse whitespace.
///
/// Returns an empty string when fewer than `min_words` words remain.
#[must_use]
pub fn clean_text(raw: &str, min_words: usize) -> String {
    let mut text = TAG_RE.replace_all(raw, " ").into_owned();
    for (entity, plain) in ENTITIES {
        text = text.replace(entity, plain);
    }
    let text = URL_RE.replace_all(&text, "");

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < min_words {
        return String::new();
    }
    words.join(" ")
}

/// [`clean_text`] for titles, with square brackets turned into parentheses
/// so the title can sit inside Markdown link text.
#[must_use]
pub fn clean_title(raw: &str) -> String {
    clean_text(raw, 0).replace('[', "(").replace(']', ")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_tags() {
        assert_eq!(clean_text("<p>This is a test</p>", 3), "This is a test");
    }

    #[test]
    fn adjacent_blocks_keep_a_space() {
        assert_eq!(
            clean_text("<div>First line</div><div>Second&nbsp;line</div>", 0),
            "First line Second line"
        );
    }

    #[test]
    fn removes_urls() {
        assert_eq!(
            clean_text("Visit https://example.com for more info.", 0),
            "Visit for more info."
        );
    }

    #[test]
    fn too_short_is_empty() {
        assert_eq!(clean_text("Short", 10), "");
        assert_eq!(clean_text("", 0), "");
    }

    #[test]
    fn decodes_entities_once() {
        assert_eq!(
            clean_text("a &lt;b&gt; &quot;c&quot; d&#39;s &amp;lt;", 0),
            "a <b> \"c\" d's &lt;"
        );
    }

    #[test]
    fn title_brackets_become_parens() {
        assert_eq!(
            clean_title("[UI] Fix <b>checkout</b> [again]"),
            "(UI) Fix checkout (again)"
        );
    }
}
