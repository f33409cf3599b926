use ego_tree::iter::Edge;
use scraper::node::Node;
use scraper::Html;
use ticket_core::{Attribute, TokenEvent};

/// Elements that never have content. They are reported as a single
/// self-closing event, with or without a trailing `/>` in the source.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Linearizes a markup document into its token stream.
///
/// The document is parsed by the HTML5 tree builder and walked depth first,
/// so unclosed or misnested tags come out already repaired. Comments and the
/// doctype are dropped.
pub fn tokenize(html: &str) -> Vec<TokenEvent> {
    let document = Html::parse_document(html);
    let mut events = Vec::new();

    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) => {
                    let name = element.name().to_string();
                    let attrs = element
                        .attrs()
                        .map(|(key, value)| Attribute::new(key, value))
                        .collect();
                    if is_void(&name) {
                        events.push(TokenEvent::SelfClosing { name, attrs });
                    } else {
                        events.push(TokenEvent::Open { name, attrs });
                    }
                }
                Node::Text(text) => {
                    let data: &str = text;
                    events.push(TokenEvent::text(data));
                }
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    if !is_void(element.name()) {
                        events.push(TokenEvent::close(element.name()));
                    }
                }
            }
        }
    }

    events
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}
