//! Safe rendering of assistant replies.
//!
//! Replies are plain text sprinkled with a few markdown-ish conventions
//! (`# heading`, `- bullet`, `**bold**`, `[label](href)`) plus bare URLs,
//! emails and phone numbers. [`render`] turns that text into a tree of
//! [`Block`]s and [`Inline`]s. No HTML is ever produced or interpreted here;
//! the view layer binds node fields to element attributes.

mod inline;

use once_cell::sync::Lazy;
use regex::Regex;

pub use inline::{href_for_token, normalize_href, render_inline, strip_trailing_punctuation};

static BULLET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s+(.*)$").expect("BULLET_LINE regex pattern is valid"));

static HEADING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+)$").expect("HEADING_LINE regex pattern is valid")
});

/// Where a link opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// `http(s)` links: new browsing context, no referrer.
    NewContext,
    /// `mailto:`, `tel:` and `#anchor` links.
    SameContext,
}

impl LinkTarget {
    pub fn target_attr(self) -> Option<&'static str> {
        match self {
            LinkTarget::NewContext => Some("_blank"),
            LinkTarget::SameContext => None,
        }
    }

    pub fn rel_attr(self) -> Option<&'static str> {
        match self {
            LinkTarget::NewContext => Some("noreferrer"),
            LinkTarget::SameContext => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
    pub target: LinkTarget,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        let target = if inline::is_http_link(&href) {
            LinkTarget::NewContext
        } else {
            LinkTarget::SameContext
        };
        Self {
            label: label.into(),
            href,
            target,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Link(Link),
}

impl Inline {
    pub fn plain_text(&self) -> &str {
        match self {
            Inline::Text(text) | Inline::Strong(text) => text,
            Inline::Link(link) => &link.label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph { content: Vec<Inline> },
    /// Consecutive bullet lines; one entry per item.
    List { items: Vec<Vec<Inline>> },
    /// A blank line.
    Spacer,
}

impl Block {
    /// Visible text of the block. List items are joined with newlines.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { content, .. } | Block::Paragraph { content } => join_inline(content),
            Block::List { items } => items
                .iter()
                .map(|item| join_inline(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Spacer => String::new(),
        }
    }
}

fn join_inline(nodes: &[Inline]) -> String {
    nodes.iter().map(Inline::plain_text).collect()
}

fn bullet_item(line: &str) -> Option<&str> {
    BULLET_LINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|item| item.as_str())
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_LINE.captures(line)?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    Some((level, caps.get(2)?.as_str()))
}

fn flush_list(blocks: &mut Vec<Block>, pending: &mut Vec<Vec<Inline>>) {
    if pending.is_empty() {
        return;
    }
    blocks.push(Block::List {
        items: std::mem::take(pending),
    });
}

/// Renders one message into display blocks, in input line order.
///
/// Empty content renders to no blocks at all.
pub fn render(content: &str) -> Vec<Block> {
    if content.is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut pending_items = Vec::new();

    for line in content.split('\n') {
        let trimmed = line.trim();

        if let Some(item) = bullet_item(trimmed) {
            pending_items.push(render_inline(item));
            continue;
        }

        flush_list(&mut blocks, &mut pending_items);

        if trimmed.is_empty() {
            blocks.push(Block::Spacer);
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            blocks.push(Block::Heading {
                level,
                content: render_inline(text),
            });
            continue;
        }

        blocks.push(Block::Paragraph {
            content: render_inline(trimmed),
        });
    }

    flush_list(&mut blocks, &mut pending_items);
    debug_assert!(!blocks.is_empty(), "every line yields a block");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Inline {
        Inline::Text(value.to_string())
    }

    #[test]
    fn empty_renders_nothing() {
        assert!(render("").is_empty());
    }

    #[test]
    fn whitespace_only_renders_spacers() {
        assert_eq!(render("\n"), vec![Block::Spacer, Block::Spacer]);
        assert_eq!(render("   "), vec![Block::Spacer]);
    }

    #[test]
    fn bullets_group_into_one_list() {
        assert_eq!(
            render("- a\n* b"),
            vec![Block::List {
                items: vec![vec![text("a")], vec![text("b")]]
            }]
        );
    }

    #[test]
    fn list_flushes_on_paragraph() {
        let blocks = render("- a\nafter\n- b");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::List { .. }));
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                content: vec![text("after")]
            }
        );
        assert!(matches!(blocks[2], Block::List { .. }));
    }

    #[test]
    fn heading_needs_whitespace() {
        assert_eq!(
            render("## Skills"),
            vec![Block::Heading {
                level: 2,
                content: vec![text("Skills")]
            }]
        );
        assert_eq!(
            render("#contacto"),
            vec![Block::Paragraph {
                content: vec![text("#contacto")]
            }]
        );
        assert_eq!(
            render("####### seven"),
            vec![Block::Paragraph {
                content: vec![text("####### seven")]
            }]
        );
    }

    #[test]
    fn blank_lines_become_spacers() {
        assert_eq!(
            render("one\n\ntwo"),
            vec![
                Block::Paragraph {
                    content: vec![text("one")]
                },
                Block::Spacer,
                Block::Paragraph {
                    content: vec![text("two")]
                },
            ]
        );
    }

    #[test]
    fn bold_line_is_not_a_bullet() {
        assert_eq!(
            render("**Stack** Rust"),
            vec![Block::Paragraph {
                content: vec![Inline::Strong("Stack".into()), text(" Rust")]
            }]
        );
    }

    #[test]
    fn crlf_lines_are_trimmed() {
        assert_eq!(
            render("- a\r\n- b\r\n"),
            vec![
                Block::List {
                    items: vec![vec![text("a")], vec![text("b")]]
                },
                Block::Spacer,
            ]
        );
    }

    #[test]
    fn plain_text_of_list() {
        let blocks = render("- [Mail](mailto:a@b.co)\n- **x**");
        assert_eq!(blocks[0].plain_text(), "Mail\nx");
    }
}
