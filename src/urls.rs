use regex::Regex;
use url::Url;

/// Scans email content for URL-like substrings.
pub struct UrlExtractor {
    url_regex: Regex,
    scheme_regex: Regex,
}

impl Default for UrlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlExtractor {
    pub fn new() -> Self {
        Self {
            url_regex: Regex::new(r#"(?i)\bhttps?://[^\s<>"]+|www\.[^\s<>"]+"#).unwrap(),
            scheme_regex: Regex::new(r"(?i)^https?://").unwrap(),
        }
    }

    /// Extract distinct URLs from raw content, falling back to the
    /// normalized text when the raw scan finds nothing. The fallback covers
    /// URLs visible only after markup removal, and vice versa; changing it
    /// would alter scoring outcomes.
    pub fn extract(&self, raw: &str, text: &str) -> Vec<String> {
        let urls = self.scan(raw);
        if urls.is_empty() {
            return self.scan(text);
        }
        urls
    }

    fn scan(&self, content: &str) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        for m in self.url_regex.find_iter(content) {
            let candidate = m.as_str().to_string();
            if !urls.contains(&candidate) {
                urls.push(candidate);
            }
        }
        urls
    }

    /// URLs eligible for reputation lookup: scheme-qualified only.
    pub fn scheme_qualified<'a>(&self, urls: &'a [String]) -> Vec<&'a String> {
        urls.iter().filter(|u| self.scheme_regex.is_match(u)).collect()
    }
}

/// Derives hostnames and public-suffix-aware top-level labels from URLs.
pub struct HostResolver;

impl HostResolver {
    /// Lowercase hostname of a URL, or empty string when parsing fails.
    /// Empty hosts must be filtered out before host-based feature counting.
    pub fn host_of(url: &str) -> String {
        let candidate = if Self::has_scheme(url) {
            url.to_string()
        } else {
            format!("http://{url}")
        };

        match Url::parse(&candidate) {
            Ok(parsed) => parsed
                .host_str()
                .map(|h| h.to_lowercase())
                .unwrap_or_default(),
            Err(_) => String::new(),
        }
    }

    /// Whether the string starts with an explicit scheme. Anchored at the
    /// front: a "://" later in the string (say, inside a query parameter)
    /// does not count.
    fn has_scheme(url: &str) -> bool {
        match url.split_once("://") {
            Some((scheme, _)) => {
                !scheme.is_empty()
                    && scheme
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
            }
            None => false,
        }
    }

    /// The rightmost label of the registered-domain suffix, resolved against
    /// the public suffix list ("example.co.uk" -> "uk", "example.ru" ->
    /// "ru"). Naive last-dot splitting misclassifies multi-label suffixes.
    pub fn top_level_label(host: &str) -> String {
        if host.is_empty() {
            return String::new();
        }

        match psl::suffix(host.as_bytes()) {
            Some(suffix) => match std::str::from_utf8(suffix.as_bytes()) {
                Ok(s) => s.rsplit('.').next().unwrap_or("").to_lowercase(),
                Err(_) => String::new(),
            },
            None => String::new(),
        }
    }

    /// Internationalized-hostname check, a homograph-attack signal. The url
    /// crate punycodes Unicode hosts, so an `xn--` label counts as IDN just
    /// like a raw non-ASCII code point.
    pub fn is_idn(host: &str) -> bool {
        host.chars().any(|c| !c.is_ascii())
            || host.split('.').any(|label| label.starts_with("xn--"))
    }

    /// First label of a host, the part compared against brand names.
    pub fn first_label(host: &str) -> &str {
        host.split('.').next().unwrap_or("")
    }
}
