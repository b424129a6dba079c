//! Fills the template's named slots with live track data.
//!
//! Slots are elements whose `id` matches one of the [`Slot`] markers. The pass
//! is pure: it returns a new tree and never fails; missing data falls back to
//! fixed text.

use crate::node::{Children, Element, Node, PropValue};
use crate::track::{non_empty, TrackRecord};

pub const PLAYING_GLYPH: &str = "▶️";
pub const PAUSED_GLYPH: &str = "⏸️";
pub const PLAYING_TEXT: &str = "Now playing...";
pub const PAUSED_TEXT: &str = "Last played...";
pub const TITLE_FALLBACK: &str = "Something went wrong";
pub const ARTIST_FALLBACK: &str = "Various artist";
pub const ALBUM_FALLBACK: &str = "Various album";

/// A named substitution point in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Cover,
    StatusIcon,
    StatusText,
    Title,
    Artist,
    Album,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Cover,
        Slot::StatusIcon,
        Slot::StatusText,
        Slot::Title,
        Slot::Artist,
        Slot::Album,
    ];

    /// The `id` value that marks this slot.
    pub fn marker(self) -> &'static str {
        match self {
            Slot::Cover => "image",
            Slot::StatusIcon => "status-icon",
            Slot::StatusText => "status-text",
            Slot::Title => "name",
            Slot::Artist => "artist",
            Slot::Album => "album",
        }
    }

    /// Which slot, if any, an element fills. The cover slot also requires an `img` tag.
    pub fn of(element: &Element) -> Option<Slot> {
        let id = element.id()?;
        let slot = Slot::ALL.into_iter().find(|s| s.marker() == id)?;
        if slot == Slot::Cover && element.tag != "img" {
            return None;
        }
        Some(slot)
    }
}

/// Status glyph for the playing state.
pub fn status_glyph(is_playing: bool) -> &'static str {
    if is_playing {
        PLAYING_GLYPH
    } else {
        PAUSED_GLYPH
    }
}

/// Status line for the playing state.
pub fn status_text(is_playing: bool) -> &'static str {
    if is_playing {
        PLAYING_TEXT
    } else {
        PAUSED_TEXT
    }
}

/// Returns a copy of `tree` with every slot filled from `data`.
pub fn substitute(tree: &Node, data: &TrackRecord) -> Node {
    match tree {
        Node::Text { .. } => tree.clone(),
        Node::Fragment { children } => Node::Fragment {
            children: children.iter().map(|c| substitute(c, data)).collect(),
        },
        Node::Element(element) => Node::Element(substitute_element(element, data)),
    }
}

fn substitute_element(element: &Element, data: &TrackRecord) -> Element {
    let mut out = Element {
        tag: element.tag.clone(),
        props: element.props.clone(),
        children: None,
    };
    let replaced;
    let mut children = element.children.as_ref();

    if let Some(slot) = Slot::of(element) {
        match slot {
            Slot::Cover => {
                if let Some(url) = non_empty(data.image_url.as_deref()) {
                    out.props.insert("src".into(), PropValue::Text(url.to_string()));
                }
            }
            _ => {
                replaced = Children::Text(slot_text(slot, data).to_string());
                children = Some(&replaced);
            }
        }
    }

    out.children = children.map(|c| substitute_children(c, data));
    out
}

fn slot_text(slot: Slot, data: &TrackRecord) -> &str {
    match slot {
        Slot::StatusIcon => status_glyph(data.is_playing),
        Slot::StatusText => status_text(data.is_playing),
        Slot::Title => non_empty(data.title.as_deref()).unwrap_or(TITLE_FALLBACK),
        Slot::Artist => non_empty(data.artist.as_deref()).unwrap_or(ARTIST_FALLBACK),
        Slot::Album => non_empty(data.album.as_deref()).unwrap_or(ALBUM_FALLBACK),
        Slot::Cover => "",
    }
}

fn substitute_children(children: &Children, data: &TrackRecord) -> Children {
    match children {
        Children::Nodes(nodes) => Children::Nodes(nodes.iter().map(|n| substitute(n, data)).collect()),
        Children::Node(node) => Children::Node(Box::new(substitute(node, data))),
        Children::Text(text) => Children::Text(text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;
    use pretty_assertions::assert_eq;

    fn slot_children(tree: &Node, id: &str) -> Option<Children> {
        tree.find_by_id(id).and_then(|el| el.children.clone())
    }

    fn text(s: &str) -> Option<Children> {
        Some(Children::Text(s.to_string()))
    }

    #[test]
    fn fills_title_and_cover() {
        let tree = parse_fragment(r#"<div><img id="image"/><span id="name"></span></div>"#);
        let data = TrackRecord {
            image_url: Some("u".into()),
            title: Some("Song".into()),
            ..Default::default()
        };
        let out = substitute(&tree, &data);

        assert_eq!(out.find_by_id("image").and_then(|e| e.attr("src")), Some("u"));
        assert_eq!(slot_children(&out, "name"), text("Song"));
    }

    #[test]
    fn empty_fields_fall_back() {
        let tree = parse_fragment(
            r#"<div><p id="name">old</p><p id="artist"></p><p id="album"></p></div>"#,
        );
        let data = TrackRecord {
            title: Some(String::new()),
            ..Default::default()
        };
        let out = substitute(&tree, &data);

        assert_eq!(slot_children(&out, "name"), text(TITLE_FALLBACK));
        assert_eq!(slot_children(&out, "artist"), text(ARTIST_FALLBACK));
        assert_eq!(slot_children(&out, "album"), text(ALBUM_FALLBACK));
    }

    #[test]
    fn status_slots_follow_playing_state() {
        let tree = parse_fragment(r#"<div><i id="status-icon"></i><b id="status-text"></b></div>"#);

        let playing = substitute(&tree, &TrackRecord { is_playing: true, ..Default::default() });
        assert_eq!(slot_children(&playing, "status-icon"), text(PLAYING_GLYPH));
        assert_eq!(slot_children(&playing, "status-text"), text(PLAYING_TEXT));

        let paused = substitute(&tree, &TrackRecord::default());
        assert_eq!(slot_children(&paused, "status-icon"), text(PAUSED_GLYPH));
        assert_eq!(slot_children(&paused, "status-text"), text(PAUSED_TEXT));
    }

    #[test]
    fn cover_keeps_existing_src_without_url() {
        let tree = parse_fragment(r#"<img id="image" src="placeholder.png"/>"#);
        let out = substitute(&tree, &TrackRecord::default());
        assert_eq!(out, tree);
    }

    #[test]
    fn cover_marker_on_other_tags_is_ignored() {
        let tree = parse_fragment(r#"<div id="image"><span>x</span></div>"#);
        let data = TrackRecord {
            image_url: Some("u".into()),
            ..Default::default()
        };
        assert_eq!(substitute(&tree, &data), tree);
    }

    #[test]
    fn rewrites_deeply_nested_slot_and_keeps_ancestors() {
        let tree = parse_fragment(
            r#"<section class="flex" data-x="1"><div id="outer"><p><span id="album">x</span></p></div></section>"#,
        );
        let data = TrackRecord {
            album: Some("on Album".into()),
            ..Default::default()
        };
        let out = substitute(&tree, &data);

        let (before, after) = (tree.as_element().unwrap(), out.as_element().unwrap());
        assert_eq!(after.tag, before.tag);
        assert_eq!(after.props, before.props);
        assert_eq!(out.find_by_id("outer").map(|e| &e.props), tree.find_by_id("outer").map(|e| &e.props));
        assert_eq!(slot_children(&out, "album"), text("on Album"));
    }

    #[test]
    fn substitutes_every_fragment_root() {
        let tree = parse_fragment(r#"<p id="name"></p><p id="artist"></p>"#);
        let data = TrackRecord {
            title: Some("T".into()),
            artist: Some("A".into()),
            ..Default::default()
        };
        let out = substitute(&tree, &data);
        assert_eq!(slot_children(&out, "name"), text("T"));
        assert_eq!(slot_children(&out, "artist"), text("A"));
    }

    #[test]
    fn recurses_into_single_nested_node_children() {
        let mut inner = Element::new("span");
        inner.props.insert("id".into(), PropValue::Text("name".into()));
        let mut outer = Element::new("div");
        outer.children = Some(Children::Node(Box::new(inner.into())));
        let tree = Node::from(outer);

        let out = substitute(&tree, &TrackRecord::default());
        assert_eq!(slot_children(&out, "name"), text(TITLE_FALLBACK));
    }

    #[test]
    fn input_tree_is_untouched_and_output_is_deterministic() {
        let tree = parse_fragment(r#"<div><span id="name">old</span></div>"#);
        let snapshot = tree.clone();
        let data = TrackRecord {
            title: Some("new".into()),
            ..Default::default()
        };
        let a = substitute(&tree, &data);
        let b = substitute(&tree, &data);
        assert_eq!(tree, snapshot);
        assert_eq!(a, b);
    }
}
