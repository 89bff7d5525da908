//! Inline pass: one left-to-right scan that turns a block's raw text into
//! text runs, bold spans and links.
//!
//! At every cursor position the matchers below are tried in order and the
//! first hit wins, so a markdown link beats bold text, which beats a bare
//! autolink. When nothing matches the cursor moves one character forward.

use super::{Inline, Link};
use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\]\n]+)\]\(([^)\s]+)\)").expect("MARKDOWN_LINK regex pattern is valid")
});

static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\*([^*\n]+)\*\*").expect("BOLD regex pattern is valid"));

// Autolink candidates, in priority order.
static AUTOLINK_CANDIDATES: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"^https?://[^\s<>()]+").expect("http candidate pattern is valid"),
        Regex::new(r"^www\.[^\s<>()]+").expect("www candidate pattern is valid"),
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("email candidate pattern is valid"),
        Regex::new(r"^\+?[0-9][0-9\s().-]{6,}[0-9]").expect("phone candidate pattern is valid"),
    ]
});

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("EMAIL_SHAPE regex pattern is valid")
});

const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];
const MIN_PHONE_DIGITS: usize = 8;

/// Transient parse unit; consumed immediately into [`Inline`] nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    MarkdownLink { label: &'a str, href: &'a str },
    Bold(&'a str),
    AutoLink(&'a str),
}

struct Match<'a> {
    token: Token<'a>,
    len: usize,
}

type Matcher = for<'a> fn(&'a str) -> Option<Match<'a>>;

const MATCHERS: [Matcher; 3] = [match_markdown_link, match_bold, match_autolink];

fn match_markdown_link(rest: &str) -> Option<Match<'_>> {
    let caps = MARKDOWN_LINK.captures(rest)?;
    let whole = caps.get(0)?;
    Some(Match {
        token: Token::MarkdownLink {
            label: caps.get(1)?.as_str(),
            href: caps.get(2)?.as_str(),
        },
        len: whole.end(),
    })
}

fn match_bold(rest: &str) -> Option<Match<'_>> {
    let caps = BOLD.captures(rest)?;
    Some(Match {
        token: Token::Bold(caps.get(1)?.as_str()),
        len: caps.get(0)?.end(),
    })
}

fn match_autolink(rest: &str) -> Option<Match<'_>> {
    AUTOLINK_CANDIDATES.iter().find_map(|pattern| {
        pattern.find(rest).map(|found| Match {
            token: Token::AutoLink(found.as_str()),
            len: found.end(),
        })
    })
}

/// Accumulates nodes, merging adjacent text runs.
#[derive(Default)]
struct InlineBuilder {
    nodes: Vec<Inline>,
}

impl InlineBuilder {
    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = self.nodes.last_mut() {
            last.push_str(text);
        } else {
            self.nodes.push(Inline::Text(text.to_string()));
        }
    }

    fn push(&mut self, node: Inline) {
        self.nodes.push(node);
    }

    fn emit(&mut self, token: Token<'_>, raw: &str) {
        match token {
            Token::MarkdownLink { label, href } => match normalize_href(href) {
                Some(href) => self.push(Inline::Link(Link::new(label, href))),
                None => self.text(raw),
            },
            Token::Bold(text) => self.push(Inline::Strong(text.to_string())),
            Token::AutoLink(candidate) => {
                let (clean, trailing) = strip_trailing_punctuation(candidate);
                match href_for_token(clean) {
                    Some(href) => self.push(Inline::Link(Link::new(clean, href))),
                    None => self.text(clean),
                }
                self.text(trailing);
            }
        }
    }
}

/// Runs the inline pass over `text`.
///
/// Never fails: anything malformed stays as plain text. An empty input
/// yields a single empty text run.
pub fn render_inline(text: &str) -> Vec<Inline> {
    let mut builder = InlineBuilder::default();
    let mut cursor = 0;
    let mut plain_start = 0;

    while cursor < text.len() {
        let rest = &text[cursor..];
        match MATCHERS.iter().find_map(|matcher| matcher(rest)) {
            Some(found) => {
                builder.text(&text[plain_start..cursor]);
                builder.emit(found.token, &rest[..found.len]);
                cursor += found.len;
                plain_start = cursor;
            }
            None => {
                cursor += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    builder.text(&text[plain_start..]);

    if builder.nodes.is_empty() {
        return vec![Inline::Text(text.to_string())];
    }
    builder.nodes
}

/// Splits a trailing run of `. , ! ? ; :` off the token.
pub fn strip_trailing_punctuation(token: &str) -> (&str, &str) {
    let clean = token.trim_end_matches(TRAILING_PUNCTUATION);
    (clean, &token[clean.len()..])
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

pub(crate) fn is_http_link(href: &str) -> bool {
    starts_with_ignore_case(href, "http://") || starts_with_ignore_case(href, "https://")
}

/// A web link with something after the scheme to navigate to.
fn is_web_address(href: &str) -> bool {
    is_http_link(href)
        && href
            .split_once("://")
            .and_then(|(_, rest)| rest.chars().next())
            .is_some_and(char::is_alphanumeric)
}

/// Validates the href of a `[label](href)` link.
///
/// Web, mail, phone and in-page anchor targets pass unchanged, `www.` hosts
/// get an `https://` prefix, anything else is rejected.
pub fn normalize_href(raw: &str) -> Option<String> {
    let href = raw.trim();
    if href.is_empty() {
        return None;
    }
    if is_web_address(href)
        || starts_with_ignore_case(href, "mailto:")
        || starts_with_ignore_case(href, "tel:")
        || href.starts_with('#')
    {
        return Some(href.to_string());
    }
    if starts_with_ignore_case(href, "www.") {
        return Some(format!("https://{href}"));
    }
    None
}

fn is_likely_phone(token: &str) -> bool {
    let digits = token.chars().filter(char::is_ascii_digit).count();
    digits >= MIN_PHONE_DIGITS
        && token
            .chars()
            .any(|c| c == '+' || c.is_whitespace() || matches!(c, '(' | ')' | '.' | '-'))
}

fn tel_href(token: &str) -> Option<String> {
    let digits: String = token.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    if token.trim().starts_with('+') {
        Some(format!("tel:+{digits}"))
    } else {
        Some(format!("tel:{digits}"))
    }
}

/// Resolves a bare token (already stripped of trailing punctuation).
pub fn href_for_token(token: &str) -> Option<String> {
    if is_web_address(token) {
        return Some(token.to_string());
    }
    if starts_with_ignore_case(token, "www.") {
        return Some(format!("https://{token}"));
    }
    if EMAIL_SHAPE.is_match(token) {
        return Some(format!("mailto:{token}"));
    }
    if is_likely_phone(token) {
        return tel_href(token);
    }
    None
}
