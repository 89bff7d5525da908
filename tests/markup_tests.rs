use folio::markup::{Block, Inline, Link, LinkTarget, render, render_inline};

fn text(value: &str) -> Inline {
    Inline::Text(value.to_string())
}

fn link(label: &str, href: &str) -> Inline {
    Inline::Link(Link::new(label, href))
}

fn visible_text(nodes: &[Inline]) -> String {
    nodes.iter().map(Inline::plain_text).collect()
}

#[test]
fn two_bullets_make_one_list() {
    assert_eq!(
        render("- a\n- b"),
        vec![Block::List {
            items: vec![vec![text("a")], vec![text("b")]]
        }]
    );
}

#[test]
fn contact_line_autolinks_email_and_phone() {
    assert_eq!(
        render("Contact me at a@b.com or +54 9 11 5991-0666."),
        vec![Block::Paragraph {
            content: vec![
                text("Contact me at "),
                link("a@b.com", "mailto:a@b.com"),
                text(" or "),
                link("+54 9 11 5991-0666", "tel:+5491159910666"),
                text("."),
            ]
        }]
    );
}

#[test]
fn markdown_link_to_www_gets_https() {
    assert_eq!(
        render("[Site](www.example.com)"),
        vec![Block::Paragraph {
            content: vec![link("Site", "https://www.example.com")]
        }]
    );
}

#[test]
fn unsupported_scheme_stays_literal() {
    assert_eq!(
        render("[Bad](ftp://x)"),
        vec![Block::Paragraph {
            content: vec![text("[Bad](ftp://x)")]
        }]
    );
}

#[test]
fn plain_text_survives_unchanged() {
    let samples = [
        "Hello, world!",
        "Reach me: hello@alex.dev, or www.alex.dev.",
        "See https://github.com/alex/folio?tab=readme; thanks!",
        "Numbers 12345678 and 2024-01-15 stay text.",
        "Call (011) 4444-5555 or +1 (555) 010-9999!",
        "<script>alert('x')</script>",
        "ünïcødé — emoji 🚀 and a lone [bracket",
        "Half **bold and [half](link",
    ];
    for sample in samples {
        assert_eq!(visible_text(&render_inline(sample)), sample, "{sample}");
    }
}

#[test]
fn only_markdown_syntax_is_removed() {
    let rendered = render_inline("**Rust** dev, see [repo](https://git.dev/r) or [top](#inicio).");
    assert_eq!(visible_text(&rendered), "Rust dev, see repo or top.");
}

#[test]
fn html_is_never_interpreted() {
    let blocks = render("<b>hi</b> <a href=\"javascript:x\">x</a>");
    assert_eq!(
        blocks,
        vec![Block::Paragraph {
            content: vec![text("<b>hi</b> <a href=\"javascript:x\">x</a>")]
        }]
    );
}

#[test]
fn link_targets_follow_scheme() {
    let rendered = render_inline(
        "[Web](https://a.dev) [Mail](mailto:a@b.co) [Call](tel:+1234) [Top](#inicio)",
    );
    let targets: Vec<LinkTarget> = rendered
        .iter()
        .filter_map(|node| match node {
            Inline::Link(link) => Some(link.target),
            _ => None,
        })
        .collect();
    assert_eq!(
        targets,
        vec![
            LinkTarget::NewContext,
            LinkTarget::SameContext,
            LinkTarget::SameContext,
            LinkTarget::SameContext
        ]
    );
    assert_eq!(LinkTarget::NewContext.target_attr(), Some("_blank"));
    assert_eq!(LinkTarget::NewContext.rel_attr(), Some("noreferrer"));
    assert_eq!(LinkTarget::SameContext.target_attr(), None);
}

#[test]
fn mixed_reply_keeps_line_order() {
    let reply = "## Projects\nTwo highlights:\n- **Folio** at www.folio.dev\n- Data pipelines\n\nWrite to [Email](mailto:alex@example.com).";
    let blocks = render(reply);
    assert_eq!(blocks.len(), 5);
    assert_eq!(
        blocks[0],
        Block::Heading {
            level: 2,
            content: vec![text("Projects")]
        }
    );
    assert_eq!(blocks[1].plain_text(), "Two highlights:");
    assert_eq!(
        blocks[2],
        Block::List {
            items: vec![
                vec![
                    Inline::Strong("Folio".into()),
                    text(" at "),
                    link("www.folio.dev", "https://www.folio.dev"),
                ],
                vec![text("Data pipelines")],
            ]
        }
    );
    assert_eq!(blocks[3], Block::Spacer);
    assert_eq!(
        blocks[4],
        Block::Paragraph {
            content: vec![
                text("Write to "),
                link("Email", "mailto:alex@example.com"),
                text("."),
            ]
        }
    );
}

#[test]
fn empty_and_whitespace_messages() {
    assert!(render("").is_empty());
    assert_eq!(render("   "), vec![Block::Spacer]);
}
