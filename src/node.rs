use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping of style property name to value, e.g. `backgroundColor → #000`.
pub type StyleMap = IndexMap<String, String>;

/// Ordered element properties, in source attribute order.
pub type Props = IndexMap<String, PropValue>;

/// A node of a parsed template fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text { value: String },
    Element(Element),
    Fragment { children: Vec<Node> },
}

/// An element node: lowercase tag, properties and optional children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    pub props: Props,
    /// `None` means "no children", which renderers treat differently from an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
}

/// The value shapes an element property may take.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Text(String),
    Style(StyleMap),
}

/// The shapes an element's children may take.
///
/// The parser only produces `Nodes`; substitution writes `Text` into slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Children {
    Nodes(Vec<Node>),
    Node(Box<Node>),
    Text(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text { value: value.into() }
    }

    pub fn fragment(children: Vec<Node>) -> Self {
        Node::Fragment { children }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Pre-order search for the first element whose `id` prop equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        match self {
            Node::Text { .. } => None,
            Node::Fragment { children } => children.iter().find_map(|c| c.find_by_id(id)),
            Node::Element(el) => {
                if el.id() == Some(id) {
                    return Some(el);
                }
                match &el.children {
                    Some(Children::Nodes(nodes)) => nodes.iter().find_map(|c| c.find_by_id(id)),
                    Some(Children::Node(node)) => node.find_by_id(id),
                    Some(Children::Text(_)) | None => None,
                }
            }
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { value } => out.push_str(value),
            Node::Fragment { children } => children.iter().for_each(|c| c.collect_text(out)),
            Node::Element(el) => {
                if let Some(children) = &el.children {
                    children.collect_text(out);
                }
            }
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::new(),
            children: None,
        }
    }

    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// String value of a prop; `None` for missing or style-map props.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self.props.get(name) {
            Some(PropValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn style(&self) -> Option<&StyleMap> {
        match self.props.get("style") {
            Some(PropValue::Style(map)) => Some(map),
            _ => None,
        }
    }
}

impl Children {
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Children::Nodes(nodes) => nodes.iter().for_each(|n| n.collect_text(out)),
            Children::Node(node) => node.collect_text(out),
            Children::Text(s) => out.push_str(s),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(id: &str, text: &str) -> Node {
        let mut el = Element::new("span");
        el.props.insert("id".into(), PropValue::Text(id.into()));
        el.children = Some(Children::Nodes(vec![Node::text(text)]));
        el.into()
    }

    #[test]
    fn find_by_id_walks_fragments_and_nested_children() {
        let mut outer = Element::new("div");
        outer.children = Some(Children::Node(Box::new(span("inner", "hi"))));
        let tree = Node::fragment(vec![span("first", "a"), outer.into()]);

        assert_eq!(tree.find_by_id("inner").map(|e| e.tag.as_str()), Some("span"));
        assert!(tree.find_by_id("missing").is_none());
    }

    #[test]
    fn text_content_concatenates_in_order() {
        let tree = Node::fragment(vec![span("a", "one "), Node::text("two")]);
        assert_eq!(tree.text_content(), "one two");
    }

    #[test]
    fn serializes_without_absent_children() {
        let el = Element::new("img");
        let json = serde_json::to_value(Node::from(el)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "element", "tag": "img", "props": {} }));
    }
}
