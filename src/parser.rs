use html5ever::tendril::TendrilSink;
use html5ever::{parse_fragment as parse_html_fragment, LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use std::sync::OnceLock;

use crate::node::{Children, Element, Node, PropValue};
use crate::style;

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Prop name that replaces the HTML `for` attribute.
pub const LABEL_TARGET_PROP: &str = "htmlFor";

/// Prop name that carries a class string the style resolver could not translate.
pub const CLASS_NAME_PROP: &str = "className";

// ─── Public parse functions ──────────────────────────────────────────────────

/// Parse an HTML fragment into a node tree.
///
/// The fragment is parsed as the content of a `<body>` element, so HTML
/// recovery rules apply: unquoted and boolean attributes, named entities,
/// implied end tags and unclosed elements all yield a best-effort tree.
///
/// A single top-level node is returned as-is; several are wrapped in a
/// [`Node::Fragment`]; none yields an empty fragment.
pub fn parse_fragment(fragment: &str) -> Node {
    let context = QualName::new(None, Namespace::from(XHTML_NAMESPACE), LocalName::from("body"));
    let dom = parse_html_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .one(fragment);

    if !dom.errors.is_empty() {
        tracing::debug!(errors = dom.errors.len(), "recovered from markup errors");
    }

    // The fragment's nodes hang off a synthetic <html> element
    let document_children = dom.document.children.borrow();
    let mut top_level: Vec<Node> = document_children
        .iter()
        .find(|handle| matches!(handle.data, NodeData::Element { .. }))
        .map(|root| root.children.borrow().iter().filter_map(convert_node).collect())
        .unwrap_or_default();

    if top_level.len() == 1 {
        tracing::debug!("single root element found, returning directly");
        return top_level.remove(0);
    }

    tracing::debug!(roots = top_level.len(), "multiple root nodes found, wrapping in a fragment");
    Node::fragment(top_level)
}

/// Returns the inner markup of the first `<body>` element, or the whole input
/// when the template has no body.
pub fn extract_body(html: &str) -> &str {
    static BODY_REGEX: OnceLock<Regex> = OnceLock::new();
    let body_regex = BODY_REGEX
        .get_or_init(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").unwrap());

    body_regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or(html, |m| m.as_str())
}

// ─── Node conversion ─────────────────────────────────────────────────────────

/// Classify one parsed node. Comments, doctypes and processing instructions
/// yield `None`.
fn convert_node(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Text { contents } => Some(Node::text(contents.borrow().to_string())),
        NodeData::Element { name, attrs, .. } => {
            let attrs: Vec<(String, String)> = attrs
                .borrow()
                .iter()
                .map(|attr| (qualified_name(&attr.name), attr.value.to_string()))
                .collect();
            Some(Node::Element(convert_element(handle, &name.local, &attrs)))
        }
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}

/// `prefix:local` for namespaced attributes (`xlink:href`, `xml:lang`,
/// `xmlns:xlink`), the bare local name otherwise.
fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{}:{}", prefix, name.local),
        None => name.local.to_string(),
    }
}

fn convert_element(handle: &Handle, tag: &str, attrs: &[(String, String)]) -> Element {
    let mut element = Element::new(tag);

    let lookup = |wanted: &str| {
        attrs
            .iter()
            .find(|(name, _)| name == wanted)
            .map(|(_, value)| value.as_str())
    };
    let resolved = style::resolve(lookup("class"), lookup("style"));
    let mut style = resolved.style;
    let mut class_name = resolved.class_name;

    for (name, value) in attrs {
        match name.as_str() {
            "class" | "style" => {
                if name == "class" {
                    if let Some(raw) = class_name.take() {
                        element.props.insert(CLASS_NAME_PROP.into(), PropValue::Text(raw));
                    }
                }
                // The merged style sits where the first of class/style appeared
                if let Some(map) = style.take() {
                    element.props.insert("style".into(), PropValue::Style(map));
                }
            }
            "for" => {
                element
                    .props
                    .insert(LABEL_TARGET_PROP.into(), PropValue::Text(value.clone()));
            }
            _ => {
                element.props.insert(name.clone(), PropValue::Text(value.clone()));
            }
        }
    }

    let children: Vec<Node> = handle.children.borrow().iter().filter_map(convert_node).collect();
    if !children.is_empty() {
        element.children = Some(Children::Nodes(children));
    }

    element
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::StyleMap;
    use pretty_assertions::assert_eq;

    fn element(node: &Node) -> &Element {
        node.as_element().expect("expected element")
    }

    fn child_nodes(el: &Element) -> &[Node] {
        match &el.children {
            Some(Children::Nodes(nodes)) => nodes,
            other => panic!("expected child nodes, got {:?}", other),
        }
    }

    fn prop_names(el: &Element) -> Vec<&str> {
        el.props.keys().map(String::as_str).collect()
    }

    #[test]
    fn single_root_is_unwrapped() {
        let tree = parse_fragment(r#"<div id="card"><span>hi</span></div>"#);
        let div = element(&tree);
        assert_eq!(div.tag, "div");
        assert_eq!(div.id(), Some("card"));
        assert_eq!(child_nodes(div).len(), 1);
    }

    #[test]
    fn multiple_roots_become_a_fragment_in_order() {
        let tree = parse_fragment("<p>a</p><p>b</p>tail");
        let Node::Fragment { children } = &tree else {
            panic!("expected fragment, got {:?}", tree);
        };
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].text_content(), "a");
        assert_eq!(children[1].text_content(), "b");
        assert_eq!(children[2], Node::text("tail"));
    }

    #[test]
    fn empty_input_is_an_empty_fragment() {
        assert_eq!(parse_fragment(""), Node::fragment(vec![]));
        assert_eq!(parse_fragment("<!-- only -->"), Node::fragment(vec![]));
    }

    #[test]
    fn whitespace_text_is_kept_verbatim() {
        let tree = parse_fragment("<div>\n  <b>x</b>\n</div>");
        let nodes = child_nodes(element(&tree));
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], Node::text("\n  "));
        assert_eq!(nodes[2], Node::text("\n"));
    }

    #[test]
    fn comments_are_dropped() {
        let tree = parse_fragment("<div><!-- note --><i>x</i></div>");
        let nodes = child_nodes(element(&tree));
        assert_eq!(nodes.len(), 1);
        assert_eq!(element(&nodes[0]).tag, "i");
    }

    #[test]
    fn childless_elements_omit_children() {
        let tree = parse_fragment("<span></span>");
        assert_eq!(element(&tree).children, None);
    }

    #[test]
    fn for_is_renamed() {
        let tree = parse_fragment(r#"<label for="x">L</label>"#);
        let label = element(&tree);
        assert_eq!(label.attr("htmlFor"), Some("x"));
        assert!(label.prop("for").is_none());
    }

    #[test]
    fn class_and_style_fold_into_one_style_prop() {
        let tree = parse_fragment(r#"<div id="a" class="flex p-4" style="padding:0" title="t"></div>"#);
        let div = element(&tree);
        assert_eq!(prop_names(div), vec!["id", "style", "title"]);

        let mut expected = StyleMap::new();
        expected.insert("display".into(), "flex".into());
        expected.insert("padding".into(), "0".into());
        assert_eq!(div.style(), Some(&expected));
    }

    #[test]
    fn untranslatable_class_is_kept_as_class_name() {
        let tree = parse_fragment(r#"<div class="hover:flex" style="color:red"><b>x</b></div>"#);
        let div = element(&tree);
        assert_eq!(div.attr("className"), Some("hover:flex"));
        assert_eq!(div.style().and_then(|s| s.get("color")).map(String::as_str), Some("red"));
        assert_eq!(child_nodes(div).len(), 1);
    }

    #[test]
    fn mixed_case_tags_are_lowercased() {
        let tree = parse_fragment("<DIV>x</div>");
        let div = element(&tree);
        assert_eq!(div.tag, "div");
        assert_eq!(div.children, Some(Children::Nodes(vec![Node::text("x")])));
    }

    #[test]
    fn hyphenated_custom_tags_are_kept() {
        let tree = parse_fragment(r#"<track-list id="name">x</track-list>"#);
        let list = element(&tree);
        assert_eq!(list.tag, "track-list");
        assert_eq!(list.id(), Some("name"));
        assert_eq!(tree.text_content(), "x");
    }

    #[test]
    fn unquoted_and_boolean_attributes_are_read() {
        let tree = parse_fragment("<div><div id=name>x</div><input disabled></div>");
        let nodes = child_nodes(element(&tree));
        assert_eq!(element(&nodes[0]).id(), Some("name"));
        assert_eq!(element(&nodes[1]).tag, "input");
        assert_eq!(element(&nodes[1]).attr("disabled"), Some(""));
        assert_eq!(element(&nodes[1]).children, None);
    }

    #[test]
    fn unclosed_void_elements_parse() {
        let tree = parse_fragment(r#"<div><img id="image" src="a.png"><br></div>"#);
        let nodes = child_nodes(element(&tree));
        assert_eq!(nodes.len(), 2);
        assert_eq!(element(&nodes[0]).attr("src"), Some("a.png"));
        assert_eq!(element(&nodes[1]).tag, "br");
    }

    #[test]
    fn html_entities_are_decoded() {
        assert_eq!(parse_fragment("<p>a&nbsp;&mdash;&amp;b</p>").text_content(), "a\u{a0}\u{2014}&b");
        assert_eq!(parse_fragment("<p>caf&eacute;</p>").text_content(), "café");
    }

    #[test]
    fn implied_end_tags_close_siblings() {
        let tree = parse_fragment("<ul><li>a<li>b</ul>");
        let items = child_nodes(element(&tree));
        assert_eq!(items.len(), 2);
        assert_eq!(element(&items[0]).tag, "li");
        assert_eq!(items[0].text_content(), "a");
        assert_eq!(items[1].text_content(), "b");
    }

    #[test]
    fn unclosed_elements_are_closed_at_the_end() {
        let tree = parse_fragment("<div>\n  <p>unclosed\n</div>");
        let div = element(&tree);
        let p = element(&child_nodes(div)[1]);
        assert_eq!(p.tag, "p");
        assert_eq!(p.children, Some(Children::Nodes(vec![Node::text("unclosed\n")])));

        let tree = parse_fragment("<p>unclosed");
        assert_eq!(element(&tree).tag, "p");
        assert_eq!(tree.text_content(), "unclosed");
    }

    #[test]
    fn namespaced_attributes_keep_their_prefix() {
        let tree = parse_fragment(
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xml:lang="en" width="4"><use xlink:href="#a"/></svg>"##,
        );
        let svg = element(&tree);
        assert_eq!(prop_names(svg), vec!["xmlns", "xmlns:xlink", "xml:lang", "width"]);
        assert_eq!(svg.attr("xml:lang"), Some("en"));

        let use_el = element(&child_nodes(svg)[0]);
        assert_eq!(use_el.tag, "use");
        assert_eq!(use_el.attr("xlink:href"), Some("#a"));
    }

    #[test]
    fn svg_tags_keep_their_canonical_case() {
        let tree = parse_fragment(r#"<svg viewbox="0 0 1 1"><foreignobject></foreignobject></svg>"#);
        let svg = element(&tree);
        assert_eq!(svg.attr("viewBox"), Some("0 0 1 1"));
        assert_eq!(element(&child_nodes(svg)[0]).tag, "foreignObject");
    }

    #[test]
    fn extract_body_finds_inner_markup() {
        let html = "<html><head><title>x</title></head><BODY class=\"a\">\n<div></div>\n</BODY></html>";
        assert_eq!(extract_body(html), "\n<div></div>\n");
        assert_eq!(extract_body("<div></div>"), "<div></div>");
    }
}
