use crate::markup::{self, Block, Inline};
use dioxus::prelude::*;

/// A chat message rendered through [`markup::render`]. Text is always bound
/// as text nodes; links get their attributes from the node's target.
#[component]
pub fn MessageContent(content: String) -> Element {
    let blocks = markup::render(&content);
    rsx! {
        div { class: "message-content",
            for block in blocks.iter() {
                {block_node(block)}
            }
        }
    }
}

fn block_node(block: &Block) -> Element {
    match block {
        Block::Heading { level, content } => rsx! {
            p { class: "message-heading", "data-level": "{level}", {inline_nodes(content)} }
        },
        Block::Paragraph { content } => rsx! {
            p { {inline_nodes(content)} }
        },
        Block::List { items } => rsx! {
            ul {
                for item in items.iter() {
                    li { {inline_nodes(item)} }
                }
            }
        },
        Block::Spacer => rsx! {
            div { class: "message-spacer" }
        },
    }
}

fn inline_nodes(nodes: &[Inline]) -> Element {
    rsx! {
        for node in nodes.iter() {
            {inline_node(node)}
        }
    }
}

fn inline_node(node: &Inline) -> Element {
    match node {
        Inline::Text(text) => rsx! { "{text}" },
        Inline::Strong(text) => rsx! {
            strong { "{text}" }
        },
        Inline::Link(link) => rsx! {
            a {
                href: "{link.href}",
                target: link.target.target_attr(),
                rel: link.target.rel_attr(),
                "{link.label}"
            }
        },
    }
}
