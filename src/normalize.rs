use regex::Regex;

/// Converts raw (possibly HTML) email content into plain text for lexical
/// analysis. Must never fail on malformed markup; anything the regexes do
/// not recognize passes through untouched.
pub struct TextNormalizer {
    block_regex: Regex,
    tag_regex: Regex,
    comment_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            // script/style bodies are noise, not message text
            block_regex: Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)\s*>").unwrap(),
            tag_regex: Regex::new(r"(?s)<[^>]*>").unwrap(),
            comment_regex: Regex::new(r"(?s)<!--.*?-->").unwrap(),
        }
    }

    /// Best-effort HTML-to-text conversion, whitespace-joined.
    pub fn normalize(&self, raw: &str) -> String {
        let stripped = self.comment_regex.replace_all(raw, " ");
        let stripped = self.block_regex.replace_all(&stripped, " ");
        let stripped = self.tag_regex.replace_all(&stripped, " ");
        let decoded = decode_entities(&stripped);

        decoded.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn decode_entities(text: &str) -> String {
    let entities = [
        ("&nbsp;", " "),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&#34;", "\""),
        ("&amp;", "&"),
    ];

    let mut result = text.to_string();
    for (entity, replacement) in &entities {
        result = result.replace(entity, replacement);
    }
    result
}
