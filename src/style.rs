use crate::node::StyleMap;
use crate::tailwind::{self, camel_case};

/// Outcome of folding an element's `class` and `style` attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyle {
    /// Merged style mapping; `None` when the element had neither attribute
    /// (or only a class string that could not be translated).
    pub style: Option<StyleMap>,
    /// Raw class string kept when translation failed.
    pub class_name: Option<String>,
}

/// Fold a utility-class string and an inline style string into one mapping.
///
/// Inline declarations override class-derived properties of the same name.
/// A class string that fails to translate is kept verbatim in `class_name`
/// and does not affect the inline styles.
pub fn resolve(class_attr: Option<&str>, style_attr: Option<&str>) -> ResolvedStyle {
    let mut resolved = ResolvedStyle::default();

    if let Some(classes) = class_attr {
        match tailwind::translate(classes) {
            Ok(style) => resolved.style = Some(style),
            Err(err) => {
                tracing::warn!(classes, error = %err, "failed to convert utility classes, keeping className");
                resolved.class_name = Some(classes.to_string());
            }
        }
    }

    if let Some(inline) = style_attr {
        let style = resolved.style.get_or_insert_with(StyleMap::new);
        for (key, val) in parse_inline_style(inline) {
            style.insert(key, val);
        }
    }

    resolved
}

/// Parse `"key:val; key2:val2"` into declarations, skipping entries with an
/// empty key or value. Keys are normalized to camelCase.
pub fn parse_inline_style(s: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for entry in s.split(';') {
        let Some((key, val)) = entry.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let val = val.trim();
        if key.is_empty() || val.is_empty() {
            continue;
        }
        out.push((camel_case(key), val.to_string()));
    }
    out
}
