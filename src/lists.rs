//! Static reference data used by the feature extractor.
//!
//! These are process-wide, read-only lists. Scoring semantics depend on
//! their exact contents, so additions should be deliberate.

/// Keywords that indicate urgency or coercion in the message body.
/// Matched as substrings against the lowercased normalized text.
pub const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "immediately",
    "action required",
    "verify",
    "password",
    "unusual activity",
    "suspend",
    "limited",
    "reset",
    "confirm",
    "failed delivery",
    "past due",
    "overdue",
];

/// URL shortener hosts, matched exactly against resolved link hosts.
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "cutt.ly",
    "rb.gy",
];

/// Top-level labels with high abuse rates in the wild.
pub const SUSPICIOUS_TLDS: &[&str] = &[
    "zip", "mov", "tk", "gq", "ml", "ga", "ru", "top", "icu", "cn",
];

/// Brands commonly impersonated in credential-phishing campaigns.
pub const KNOWN_BRANDS: &[&str] = &[
    "google",
    "microsoft",
    "apple",
    "amazon",
    "paypal",
    "netflix",
    "sbi",
    "icici",
    "paytm",
    "facebook",
    "instagram",
    "flipkart",
];

/// File extensions that make a direct link risky (droppers, HTML smuggling,
/// archive payloads). Matched case-insensitively as URL suffixes.
pub const RISKY_EXTENSIONS: &[&str] = &[
    ".html", ".htm", ".exe", ".scr", ".js", ".jar", ".bat", ".zip", ".7z", ".rar",
];
