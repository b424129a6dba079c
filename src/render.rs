//! Serializes a node tree into a standalone SVG: the tree becomes XHTML inside
//! a `<foreignObject>`, fonts are embedded as `@font-face` rules and configured
//! glyphs are drawn as inline images.

use std::fmt::Write as _;

use crate::assets::{Assets, FontConfig};
use crate::error::BannerResult;
use crate::node::{Children, Element, Node, PropValue};
use crate::parser::{CLASS_NAME_PROP, LABEL_TARGET_PROP};
use crate::tailwind::kebab_case;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Elements written as `<tag/>` when they have no children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 850,
            height: 510,
        }
    }
}

/// Render `tree` as an SVG document. Same inputs give byte-identical output.
pub fn render_svg(tree: &Node, assets: &Assets, options: &RenderOptions) -> String {
    let RenderOptions { width, height } = *options;
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    if !assets.fonts.is_empty() {
        out.push_str("<style>");
        for font in &assets.fonts {
            write_font_face(&mut out, font);
        }
        out.push_str("</style>");
    }

    let _ = write!(
        out,
        r#"<foreignObject x="0" y="0" width="{width}" height="{height}"><div xmlns="{XHTML_NS}" style="display:flex;width:{width}px;height:{height}px">"#
    );

    let mut writer = Writer {
        out: &mut out,
        glyphs: GlyphTable::new(assets),
    };
    writer.node(tree);

    out.push_str("</div></foreignObject></svg>");
    out
}

/// The tree as pretty JSON, for an external renderer.
pub fn to_json(tree: &Node) -> BannerResult<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

fn write_font_face(out: &mut String, font: &FontConfig) {
    let _ = write!(out, "@font-face{{font-family:'{}';", escape_text(&font.family));
    if let Some(weight) = font.weight {
        let _ = write!(out, "font-weight:{};", weight);
    }
    if let Some(style) = &font.style {
        let _ = write!(out, "font-style:{};", escape_text(style));
    }
    let _ = write!(out, "src:url({});}}", font.data_uri());
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Configured glyphs, longest first so multi-codepoint glyphs win.
struct GlyphTable<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> GlyphTable<'a> {
    fn new(assets: &'a Assets) -> Self {
        let mut entries: Vec<(&str, &str)> = assets
            .grapheme_images
            .iter()
            .filter(|(glyph, _)| !glyph.is_empty())
            .map(|(glyph, uri)| (glyph.as_str(), uri.as_str()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries }
    }

    fn match_at(&self, text: &str) -> Option<(&'a str, &'a str)> {
        self.entries
            .iter()
            .find(|(glyph, _)| text.starts_with(glyph))
            .copied()
    }
}

struct Writer<'o, 'a> {
    out: &'o mut String,
    glyphs: GlyphTable<'a>,
}

impl Writer<'_, '_> {
    fn node(&mut self, node: &Node) {
        match node {
            Node::Text { value } => self.text(value),
            Node::Fragment { children } => children.iter().for_each(|c| self.node(c)),
            Node::Element(element) => self.element(element),
        }
    }

    fn element(&mut self, element: &Element) {
        let _ = write!(self.out, "<{}", element.tag);
        for (name, value) in &element.props {
            let name = match name.as_str() {
                LABEL_TARGET_PROP => "for",
                CLASS_NAME_PROP => "class",
                other => other,
            };
            let value = match value {
                PropValue::Text(text) => escape_attr(text),
                PropValue::Style(style) => {
                    let css: Vec<String> = style
                        .iter()
                        .map(|(k, v)| format!("{}:{}", kebab_case(k), v))
                        .collect();
                    escape_attr(&css.join(";"))
                }
            };
            let _ = write!(self.out, r#" {}="{}""#, name, value);
        }

        match &element.children {
            None if is_void(&element.tag) => self.out.push_str("/>"),
            children => {
                self.out.push('>');
                match children {
                    Some(Children::Nodes(nodes)) => nodes.iter().for_each(|n| self.node(n)),
                    Some(Children::Node(node)) => self.node(node),
                    Some(Children::Text(text)) => self.text(text),
                    None => {}
                }
                let _ = write!(self.out, "</{}>", element.tag);
            }
        }
    }

    /// Escaped text with configured glyphs swapped for images.
    fn text(&mut self, text: &str) {
        let mut rest = text;
        let mut plain_start = 0;
        let mut offset = 0;

        while !rest.is_empty() {
            if let Some((glyph, uri)) = self.glyphs.match_at(rest) {
                self.out.push_str(&escape_text(&text[plain_start..offset]));
                let _ = write!(
                    self.out,
                    r#"<img src="{}" alt="{}" style="width:1em;height:1em"/>"#,
                    escape_attr(uri),
                    escape_attr(glyph)
                );
                offset += glyph.len();
                plain_start = offset;
            } else {
                let step = rest.chars().next().map_or(1, char::len_utf8);
                offset += step;
            }
            rest = &text[offset..];
        }
        self.out.push_str(&escape_text(&text[plain_start..]));
    }
}

/// Escape character data for XML text content.
pub(crate) fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape a value for a double-quoted XML attribute.
pub(crate) fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
