use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// Heuristic link finder run over plain text.
pub trait LinkDetector {
    /// Byte ranges of every link-like run in `text`, in order of appearance.
    fn find_links(&self, text: &str) -> Vec<Range<usize>>;
}

/// Detects scheme URLs (`http://`, `https://`), `www.` hosts and bare
/// `domain.tld/path` forms.
///
/// Bare forms only count when the last host label is a known top-level
/// domain, so file names such as `config.toml` stay plain text. Runs glued
/// to an `@` belong to an email address and are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexLinkDetector;

/// Top-level domains accepted without a scheme or `www.` prefix.
const KNOWN_TLDS: &[&str] = &[
    "ai", "app", "at", "au", "be", "biz", "br", "ca", "ch", "cn", "co", "com", "de", "dev",
    "dk", "edu", "es", "eu", "fi", "fm", "fr", "gg", "gov", "ie", "in", "info", "int", "io",
    "it", "jp", "kr", "me", "mil", "net", "nl", "no", "nz", "online", "org", "pl", "pt", "ru",
    "rs", "se", "sh", "site", "so", "tech", "tv", "uk", "us", "xyz",
];

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?i)\b(?:https?://[^\s<>"]+|www\.[^\s<>"]+|(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(?::\d+)?(?:/[^\s<>"]*)?)"#,
        )
        .expect("Invalid link regex")
    })
}

impl LinkDetector for RegexLinkDetector {
    fn find_links(&self, text: &str) -> Vec<Range<usize>> {
        link_regex()
            .find_iter(text)
            .filter_map(|m| {
                let start = m.start();
                let end = trim_trailing_punctuation(text, start, m.end());
                if end <= start || touches_at_sign(text, start, end) {
                    return None;
                }
                has_known_host(&text[start..end]).then_some(start..end)
            })
            .collect()
    }
}

/// `user@host` parts on either side of the `@`.
fn touches_at_sign(text: &str, start: usize, end: usize) -> bool {
    text[..start].ends_with('@') || text[end..].starts_with('@')
}

fn has_known_host(candidate: &str) -> bool {
    let lowercased = candidate.to_ascii_lowercase();
    if ["http://", "https://", "www."]
        .iter()
        .any(|prefix| lowercased.starts_with(prefix))
    {
        return true;
    }
    let host = lowercased.split([':', '/']).next().unwrap_or_default();
    host.rsplit('.')
        .next()
        .is_some_and(|tld| KNOWN_TLDS.contains(&tld))
}

/// Drops sentence punctuation that ends up glued to the end of a match.
///
/// A closing bracket stays when the match also holds its opener, as in
/// `wiki/Rust_(programming_language)`.
fn trim_trailing_punctuation(text: &str, start: usize, mut end: usize) -> usize {
    while let Some(last_char) = text[start..end].chars().last() {
        let trim = match last_char {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '"' => true,
            ')' => is_unbalanced(&text[start..end], '(', ')'),
            ']' => is_unbalanced(&text[start..end], '[', ']'),
            '}' => is_unbalanced(&text[start..end], '{', '}'),
            _ => false,
        };
        if !trim {
            break;
        }
        end -= last_char.len_utf8();
    }
    end
}

fn is_unbalanced(candidate: &str, open: char, close: char) -> bool {
    let count = |wanted: char| candidate.chars().filter(|&c| c == wanted).count();
    count(close) > count(open)
}

impl<F> LinkDetector for F
where
    F: Fn(&str) -> Vec<Range<usize>>,
{
    fn find_links(&self, text: &str) -> Vec<Range<usize>> {
        self(text)
    }
}
