//! # Tailwind utility classes → inline styles
//!
//! Translates a `class="..."` string into a [`StyleMap`] that can be handed to
//! an inline-style renderer. Only utilities that have a plain inline-style
//! equivalent are supported; state and responsive variants (`hover:`, `md:`)
//! need a stylesheet and are rejected.
//!
//! ## Covered
//! - **Layout**: display, position, inset, z-index, overflow, object-fit/position
//! - **Flexbox**: direction, wrap, grow/shrink, basis, order, justify/items/self, gap
//! - **Spacing**: p-*, px-*, py-*, pt/r/b/l-*, m-*, mx-*, my-*, negative margins
//! - **Sizing**: w-*, h-*, min/max-*, size-*, fractions, arbitrary `[value]`
//! - **Typography**: size, weight, family, style, tracking, leading, alignment, transform
//! - **Borders & effects**: width, style, radius, opacity, box shadow
//! - **Colors**: bg-/text-/border-{color}-{shade}, opacity modifiers (/50)

pub mod colors;
pub mod registry;
pub mod spacing;

use crate::error::TranslateError;
use crate::node::StyleMap;

/// Translate a whitespace-separated list of utility classes into inline styles.
///
/// Later classes override earlier ones for the same property. Classes that are
/// not recognised are skipped. A malformed token or a variant prefix fails the
/// whole string.
pub fn translate(classes: &str) -> Result<StyleMap, TranslateError> {
    let mut style = StyleMap::new();

    for token in classes.split_whitespace() {
        check_token(token)?;
        // `!` (important) has no meaning for inline styles
        let class = token.strip_prefix('!').unwrap_or(token);

        match registry::resolve_class(class) {
            Some(declarations) => {
                for (prop, val) in declarations {
                    style.insert(camel_case(&prop), val);
                }
            }
            None => tracing::debug!(class, "skipping unknown utility class"),
        }
    }

    Ok(style)
}

/// Rejects tokens that cannot be expressed as inline declarations.
fn check_token(token: &str) -> Result<(), TranslateError> {
    let mut depth = 0i32;
    for (i, ch) in token.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(malformed(token, "unexpected ']'"));
                }
            }
            ':' if depth == 0 => {
                return Err(TranslateError::UnsupportedVariant {
                    token: token.to_string(),
                    variant: token[..=i].to_string(),
                });
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(malformed(token, "unclosed '['"));
    }
    if token.contains("[]") {
        return Err(malformed(token, "empty arbitrary value"));
    }
    Ok(())
}

fn malformed(token: &str, reason: &str) -> TranslateError {
    TranslateError::Malformed {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}

/// `background-color` → `backgroundColor`. Custom properties (`--x`) are kept as-is.
pub fn camel_case(prop: &str) -> String {
    if prop.starts_with("--") {
        return prop.to_string();
    }
    let mut out = String::with_capacity(prop.len());
    let mut upper = false;
    for ch in prop.chars() {
        if ch == '-' {
            upper = !out.is_empty();
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// `backgroundColor` → `background-color`. Inverse of [`camel_case`].
pub fn kebab_case(prop: &str) -> String {
    if prop.starts_with("--") {
        return prop.to_string();
    }
    let mut out = String::with_capacity(prop.len() + 4);
    for ch in prop.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_to_camel_case_declarations() {
        let style = translate("flex flex-col p-4 bg-blue-500 text-white").unwrap();
        assert_eq!(style.get("display").map(String::as_str), Some("flex"));
        assert_eq!(style.get("flexDirection").map(String::as_str), Some("column"));
        assert_eq!(style.get("padding").map(String::as_str), Some("1rem"));
        assert_eq!(style.get("backgroundColor").map(String::as_str), Some("#3b82f6"));
        assert_eq!(style.get("color").map(String::as_str), Some("#ffffff"));
    }

    #[test]
    fn later_classes_win() {
        let style = translate("p-4 p-2").unwrap();
        assert_eq!(style.get("padding").map(String::as_str), Some("0.5rem"));
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn unknown_classes_are_skipped() {
        let style = translate("group flex").unwrap();
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn variants_fail_the_whole_string() {
        let err = translate("flex hover:bg-red-500").unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnsupportedVariant {
                token: "hover:bg-red-500".into(),
                variant: "hover:".into(),
            }
        );
    }

    #[test]
    fn colon_inside_arbitrary_value_is_not_a_variant() {
        let style = translate("bg-[url(data:x)]").unwrap();
        assert_eq!(style.get("backgroundImage").map(String::as_str), Some("url(data:x)"));
        assert!(!style.contains_key("backgroundColor"));

        let style = translate("bg-[rgb(0_0_0)]").unwrap();
        assert_eq!(style.get("backgroundColor").map(String::as_str), Some("rgb(0 0 0)"));
    }

    #[test]
    fn malformed_brackets_fail() {
        assert!(matches!(translate("w-[10px"), Err(TranslateError::Malformed { .. })));
        assert!(matches!(translate("w-10px]"), Err(TranslateError::Malformed { .. })));
        assert!(matches!(translate("w-[]"), Err(TranslateError::Malformed { .. })));
    }

    #[test]
    fn case_conversion() {
        assert_eq!(camel_case("border-top-left-radius"), "borderTopLeftRadius");
        assert_eq!(camel_case("color"), "color");
        assert_eq!(camel_case("--brand"), "--brand");
        assert_eq!(kebab_case("backgroundColor"), "background-color");
    }
}
