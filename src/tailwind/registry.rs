use super::colors;
use super::spacing;

/// Declarations for one utility class, e.g. `[("display", "flex")]`.
/// Property names are CSS (kebab-case); the caller decides the final naming.
pub type Declarations = Vec<(String, String)>;

fn decls(props: &[(&str, &str)]) -> Declarations {
    props
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn single(prop: &str, val: impl Into<String>) -> Declarations {
    vec![(prop.to_string(), val.into())]
}

fn spread(props: &[&str], val: &str) -> Declarations {
    props.iter().map(|p| (p.to_string(), val.to_string())).collect()
}

// ─── Public resolver ────────────────────────────────────────────────────────

/// Resolves a single utility class (without variant prefix) to its declarations.
///
/// Returns `None` if the class is not recognised.
pub fn resolve_class(class: &str) -> Option<Declarations> {
    resolve_display(class)
        .or_else(|| resolve_position(class))
        .or_else(|| resolve_inset(class))
        .or_else(|| resolve_z_index(class))
        .or_else(|| resolve_overflow(class))
        .or_else(|| resolve_object(class))
        .or_else(|| resolve_flex(class))
        .or_else(|| resolve_alignment(class))
        .or_else(|| resolve_spacing(class))
        .or_else(|| resolve_sizing(class))
        .or_else(|| resolve_typography(class))
        .or_else(|| resolve_border(class))
        .or_else(|| resolve_effects(class))
        .or_else(|| resolve_bg_color(class))
        .or_else(|| resolve_text_color(class))
        .or_else(|| resolve_border_color(class))
}

// ─── Display ────────────────────────────────────────────────────────────────

fn resolve_display(class: &str) -> Option<Declarations> {
    let val = match class {
        "block"        => "block",
        "inline-block" => "inline-block",
        "inline"       => "inline",
        "flex"         => "flex",
        "inline-flex"  => "inline-flex",
        "grid"         => "grid",
        "contents"     => "contents",
        "hidden"       => "none",
        _ => return None,
    };
    Some(single("display", val))
}

// ─── Position ───────────────────────────────────────────────────────────────

fn resolve_position(class: &str) -> Option<Declarations> {
    let pos = match class {
        "static"   => "static",
        "fixed"    => "fixed",
        "absolute" => "absolute",
        "relative" => "relative",
        "sticky"   => "sticky",
        _ => return None,
    };
    Some(single("position", pos))
}

// ─── Inset (top / right / bottom / left) ────────────────────────────────────

fn resolve_inset(class: &str) -> Option<Declarations> {
    let (neg, rest) = match class.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, class),
    };

    let (props, val_str): (&[&str], &str) =
        if let Some(v) = rest.strip_prefix("inset-x-") {
            (&["left", "right"], v)
        } else if let Some(v) = rest.strip_prefix("inset-y-") {
            (&["top", "bottom"], v)
        } else if let Some(v) = rest.strip_prefix("inset-") {
            (&["top", "right", "bottom", "left"], v)
        } else if let Some(v) = rest.strip_prefix("top-") {
            (&["top"], v)
        } else if let Some(v) = rest.strip_prefix("right-") {
            (&["right"], v)
        } else if let Some(v) = rest.strip_prefix("bottom-") {
            (&["bottom"], v)
        } else if let Some(v) = rest.strip_prefix("left-") {
            (&["left"], v)
        } else {
            return None;
        };

    let base_val = resolve_size_value(val_str)?;
    Some(spread(props, &negate(neg, base_val)))
}

// ─── Z-Index ─────────────────────────────────────────────────────────────────

fn resolve_z_index(class: &str) -> Option<Declarations> {
    let val = class.strip_prefix("z-")?;
    let css_val = match val {
        "auto" => "auto".to_string(),
        _ => match arbitrary(val) {
            Some(inner) => inner,
            None => {
                val.parse::<i32>().ok()?;
                val.to_string()
            }
        },
    };
    Some(single("z-index", css_val))
}

// ─── Overflow ────────────────────────────────────────────────────────────────

fn resolve_overflow(class: &str) -> Option<Declarations> {
    let (prop, val_str) = if let Some(v) = class.strip_prefix("overflow-x-") {
        ("overflow-x", v)
    } else if let Some(v) = class.strip_prefix("overflow-y-") {
        ("overflow-y", v)
    } else if let Some(v) = class.strip_prefix("overflow-") {
        ("overflow", v)
    } else {
        return None;
    };

    let css_val = match val_str {
        "auto"    => "auto",
        "hidden"  => "hidden",
        "clip"    => "clip",
        "visible" => "visible",
        "scroll"  => "scroll",
        _ => return None,
    };
    Some(single(prop, css_val))
}

// ─── Object Fit & Position ───────────────────────────────────────────────────

fn resolve_object(class: &str) -> Option<Declarations> {
    let val = class.strip_prefix("object-")?;

    let fit = match val {
        "contain"    => Some("contain"),
        "cover"      => Some("cover"),
        "fill"       => Some("fill"),
        "none"       => Some("none"),
        "scale-down" => Some("scale-down"),
        _ => None,
    };
    if let Some(f) = fit {
        return Some(single("object-fit", f));
    }

    let pos = match val {
        "center"       => "center",
        "top"          => "top",
        "bottom"       => "bottom",
        "left"         => "left",
        "right"        => "right",
        "left-top"     => "left top",
        "left-bottom"  => "left bottom",
        "right-top"    => "right top",
        "right-bottom" => "right bottom",
        _ => return None,
    };
    Some(single("object-position", pos))
}

// ─── Flexbox ────────────────────────────────────────────────────────────────

fn resolve_flex(class: &str) -> Option<Declarations> {
    let rule = match class {
        "flex-row"          => decls(&[("flex-direction", "row")]),
        "flex-row-reverse"  => decls(&[("flex-direction", "row-reverse")]),
        "flex-col"          => decls(&[("flex-direction", "column")]),
        "flex-col-reverse"  => decls(&[("flex-direction", "column-reverse")]),
        "flex-wrap"         => decls(&[("flex-wrap", "wrap")]),
        "flex-wrap-reverse" => decls(&[("flex-wrap", "wrap-reverse")]),
        "flex-nowrap"       => decls(&[("flex-wrap", "nowrap")]),
        "flex-1"            => decls(&[("flex", "1 1 0%")]),
        "flex-auto"         => decls(&[("flex", "1 1 auto")]),
        "flex-initial"      => decls(&[("flex", "0 1 auto")]),
        "flex-none"         => decls(&[("flex", "none")]),
        "grow"              => decls(&[("flex-grow", "1")]),
        "grow-0"            => decls(&[("flex-grow", "0")]),
        "shrink"            => decls(&[("flex-shrink", "1")]),
        "shrink-0"          => decls(&[("flex-shrink", "0")]),
        _ => {
            if let Some(n_str) = class.strip_prefix("order-") {
                let n: i32 = n_str.parse().ok()?;
                return Some(single("order", n.to_string()));
            }
            if let Some(val) = class.strip_prefix("basis-") {
                return resolve_size_value(val).map(|v| single("flex-basis", v));
            }
            return None;
        }
    };
    Some(rule)
}

// ─── Alignment & Gap ────────────────────────────────────────────────────────

fn resolve_alignment(class: &str) -> Option<Declarations> {
    let rule = match class {
        "justify-start"   => decls(&[("justify-content", "flex-start")]),
        "justify-end"     => decls(&[("justify-content", "flex-end")]),
        "justify-center"  => decls(&[("justify-content", "center")]),
        "justify-between" => decls(&[("justify-content", "space-between")]),
        "justify-around"  => decls(&[("justify-content", "space-around")]),
        "justify-evenly"  => decls(&[("justify-content", "space-evenly")]),
        "items-start"     => decls(&[("align-items", "flex-start")]),
        "items-end"       => decls(&[("align-items", "flex-end")]),
        "items-center"    => decls(&[("align-items", "center")]),
        "items-baseline"  => decls(&[("align-items", "baseline")]),
        "items-stretch"   => decls(&[("align-items", "stretch")]),
        "self-auto"       => decls(&[("align-self", "auto")]),
        "self-start"      => decls(&[("align-self", "flex-start")]),
        "self-end"        => decls(&[("align-self", "flex-end")]),
        "self-center"     => decls(&[("align-self", "center")]),
        "self-stretch"    => decls(&[("align-self", "stretch")]),
        "content-start"   => decls(&[("align-content", "flex-start")]),
        "content-end"     => decls(&[("align-content", "flex-end")]),
        "content-center"  => decls(&[("align-content", "center")]),
        "content-between" => decls(&[("align-content", "space-between")]),
        "content-around"  => decls(&[("align-content", "space-around")]),
        _ => {
            let (prop, val) = if let Some(v) = class.strip_prefix("gap-x-") {
                ("column-gap", v)
            } else if let Some(v) = class.strip_prefix("gap-y-") {
                ("row-gap", v)
            } else if let Some(v) = class.strip_prefix("gap-") {
                ("gap", v)
            } else {
                return None;
            };
            return resolve_spacing_or_arbitrary(val).map(|v| single(prop, v));
        }
    };
    Some(rule)
}

// ─── Spacing (padding & margin) ─────────────────────────────────────────────

fn resolve_spacing(class: &str) -> Option<Declarations> {
    let (neg, rest) = match class.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, class),
    };

    let (props, val_str): (&[&str], &str) = if let Some(v) = rest.strip_prefix("p-") {
        (&["padding"], v)
    } else if let Some(v) = rest.strip_prefix("px-") {
        (&["padding-left", "padding-right"], v)
    } else if let Some(v) = rest.strip_prefix("py-") {
        (&["padding-top", "padding-bottom"], v)
    } else if let Some(v) = rest.strip_prefix("pt-") {
        (&["padding-top"], v)
    } else if let Some(v) = rest.strip_prefix("pr-") {
        (&["padding-right"], v)
    } else if let Some(v) = rest.strip_prefix("pb-") {
        (&["padding-bottom"], v)
    } else if let Some(v) = rest.strip_prefix("pl-") {
        (&["padding-left"], v)
    } else if let Some(v) = rest.strip_prefix("m-") {
        (&["margin"], v)
    } else if let Some(v) = rest.strip_prefix("mx-") {
        (&["margin-left", "margin-right"], v)
    } else if let Some(v) = rest.strip_prefix("my-") {
        (&["margin-top", "margin-bottom"], v)
    } else if let Some(v) = rest.strip_prefix("mt-") {
        (&["margin-top"], v)
    } else if let Some(v) = rest.strip_prefix("mr-") {
        (&["margin-right"], v)
    } else if let Some(v) = rest.strip_prefix("mb-") {
        (&["margin-bottom"], v)
    } else if let Some(v) = rest.strip_prefix("ml-") {
        (&["margin-left"], v)
    } else {
        return None;
    };

    let is_padding = props.iter().any(|p| p.starts_with("padding"));
    // Negative padding doesn't exist
    if neg && is_padding {
        return None;
    }

    if val_str == "auto" {
        if is_padding {
            return None;
        }
        return Some(spread(props, "auto"));
    }

    let base_val = resolve_spacing_or_arbitrary(val_str)?;
    Some(spread(props, &negate(neg, base_val)))
}

// ─── Sizing ─────────────────────────────────────────────────────────────────

fn resolve_sizing(class: &str) -> Option<Declarations> {
    if let Some(val) = class.strip_prefix("w-") {
        let css_val = match val {
            "screen" => "100vw".to_string(),
            _ => resolve_size_value(val)?,
        };
        return Some(single("width", css_val));
    }
    if let Some(val) = class.strip_prefix("h-") {
        let css_val = match val {
            "screen" => "100vh".to_string(),
            _ => resolve_size_value(val)?,
        };
        return Some(single("height", css_val));
    }
    if let Some(val) = class.strip_prefix("min-w-") {
        return resolve_size_value(val).map(|v| single("min-width", v));
    }
    if let Some(val) = class.strip_prefix("max-w-") {
        let css_val = match val {
            "none" => "none".to_string(),
            _ => resolve_size_value(val)?,
        };
        return Some(single("max-width", css_val));
    }
    if let Some(val) = class.strip_prefix("min-h-") {
        return resolve_size_value(val).map(|v| single("min-height", v));
    }
    if let Some(val) = class.strip_prefix("max-h-") {
        let css_val = match val {
            "none" => "none".to_string(),
            _ => resolve_size_value(val)?,
        };
        return Some(single("max-height", css_val));
    }
    if let Some(val) = class.strip_prefix("size-") {
        let css_val = resolve_size_value(val)?;
        return Some(spread(&["width", "height"], &css_val));
    }
    None
}

/// Resolves a size token: keywords, container sizes, fractions, arbitrary
/// `[value]` and the spacing scale.
fn resolve_size_value(val: &str) -> Option<String> {
    let keyword = match val {
        "auto" => "auto",
        "px"   => "1px",
        "full" => "100%",
        "min"  => "min-content",
        "max"  => "max-content",
        "fit"  => "fit-content",
        "xs"   => "20rem",
        "sm"   => "24rem",
        "md"   => "28rem",
        "lg"   => "32rem",
        "xl"   => "36rem",
        "2xl"  => "42rem",
        "3xl"  => "48rem",
        "4xl"  => "56rem",
        "5xl"  => "64rem",
        "6xl"  => "72rem",
        "7xl"  => "80rem",
        _ => "",
    };
    if !keyword.is_empty() {
        return Some(keyword.to_string());
    }

    if let Some(inner) = arbitrary(val) {
        return Some(inner);
    }

    // Fraction: "1/2", "2/3", ...
    if let Some((num, den)) = val.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den == 0.0 {
            return None;
        }
        return Some(format!("{}%", spacing::format_number(num / den * 100.0)));
    }

    spacing::spacing_value(val)
}

// ─── Typography ─────────────────────────────────────────────────────────────

fn resolve_typography(class: &str) -> Option<Declarations> {
    let rule = match class {
        "text-xs"   => decls(&[("font-size", "0.75rem"), ("line-height", "1rem")]),
        "text-sm"   => decls(&[("font-size", "0.875rem"), ("line-height", "1.25rem")]),
        "text-base" => decls(&[("font-size", "1rem"), ("line-height", "1.5rem")]),
        "text-lg"   => decls(&[("font-size", "1.125rem"), ("line-height", "1.75rem")]),
        "text-xl"   => decls(&[("font-size", "1.25rem"), ("line-height", "1.75rem")]),
        "text-2xl"  => decls(&[("font-size", "1.5rem"), ("line-height", "2rem")]),
        "text-3xl"  => decls(&[("font-size", "1.875rem"), ("line-height", "2.25rem")]),
        "text-4xl"  => decls(&[("font-size", "2.25rem"), ("line-height", "2.5rem")]),
        "text-5xl"  => decls(&[("font-size", "3rem"), ("line-height", "1")]),
        "text-6xl"  => decls(&[("font-size", "3.75rem"), ("line-height", "1")]),
        "text-7xl"  => decls(&[("font-size", "4.5rem"), ("line-height", "1")]),
        "text-8xl"  => decls(&[("font-size", "6rem"), ("line-height", "1")]),
        "text-9xl"  => decls(&[("font-size", "8rem"), ("line-height", "1")]),

        "text-left"    => decls(&[("text-align", "left")]),
        "text-center"  => decls(&[("text-align", "center")]),
        "text-right"   => decls(&[("text-align", "right")]),
        "text-justify" => decls(&[("text-align", "justify")]),

        "font-thin"       => decls(&[("font-weight", "100")]),
        "font-extralight" => decls(&[("font-weight", "200")]),
        "font-light"      => decls(&[("font-weight", "300")]),
        "font-normal"     => decls(&[("font-weight", "400")]),
        "font-medium"     => decls(&[("font-weight", "500")]),
        "font-semibold"   => decls(&[("font-weight", "600")]),
        "font-bold"       => decls(&[("font-weight", "700")]),
        "font-extrabold"  => decls(&[("font-weight", "800")]),
        "font-black"      => decls(&[("font-weight", "900")]),

        "font-sans" => decls(&[(
            "font-family",
            "ui-sans-serif, system-ui, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\"",
        )]),
        "font-serif" => decls(&[(
            "font-family",
            "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif",
        )]),
        "font-mono" => decls(&[(
            "font-family",
            "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, monospace",
        )]),

        "italic"     => decls(&[("font-style", "italic")]),
        "not-italic" => decls(&[("font-style", "normal")]),

        "uppercase"   => decls(&[("text-transform", "uppercase")]),
        "lowercase"   => decls(&[("text-transform", "lowercase")]),
        "capitalize"  => decls(&[("text-transform", "capitalize")]),
        "normal-case" => decls(&[("text-transform", "none")]),

        "underline"    => decls(&[("text-decoration-line", "underline")]),
        "line-through" => decls(&[("text-decoration-line", "line-through")]),
        "no-underline" => decls(&[("text-decoration-line", "none")]),

        "tracking-tighter" => decls(&[("letter-spacing", "-0.05em")]),
        "tracking-tight"   => decls(&[("letter-spacing", "-0.025em")]),
        "tracking-normal"  => decls(&[("letter-spacing", "0em")]),
        "tracking-wide"    => decls(&[("letter-spacing", "0.025em")]),
        "tracking-wider"   => decls(&[("letter-spacing", "0.05em")]),
        "tracking-widest"  => decls(&[("letter-spacing", "0.1em")]),

        "leading-none"    => decls(&[("line-height", "1")]),
        "leading-tight"   => decls(&[("line-height", "1.25")]),
        "leading-snug"    => decls(&[("line-height", "1.375")]),
        "leading-normal"  => decls(&[("line-height", "1.5")]),
        "leading-relaxed" => decls(&[("line-height", "1.625")]),
        "leading-loose"   => decls(&[("line-height", "2")]),

        "whitespace-normal"   => decls(&[("white-space", "normal")]),
        "whitespace-nowrap"   => decls(&[("white-space", "nowrap")]),
        "whitespace-pre"      => decls(&[("white-space", "pre")]),
        "whitespace-pre-line" => decls(&[("white-space", "pre-line")]),
        "whitespace-pre-wrap" => decls(&[("white-space", "pre-wrap")]),

        "truncate" => decls(&[
            ("overflow", "hidden"),
            ("text-overflow", "ellipsis"),
            ("white-space", "nowrap"),
        ]),
        "text-ellipsis" => decls(&[("text-overflow", "ellipsis")]),
        "text-clip"     => decls(&[("text-overflow", "clip")]),
        _ => {
            // leading-{n}: spacing scale line heights
            if let Some(val) = class.strip_prefix("leading-") {
                return resolve_spacing_or_arbitrary(val).map(|v| single("line-height", v));
            }
            if let Some(val) = class.strip_prefix("tracking-") {
                return arbitrary(val).map(|v| single("letter-spacing", v));
            }
            // text-[14px] is a font size; text-[#fff] falls through to colors
            if let Some(inner) = class.strip_prefix("text-").and_then(arbitrary) {
                if !looks_like_color(&inner) {
                    return Some(single("font-size", inner));
                }
            }
            return None;
        }
    };
    Some(rule)
}

// ─── Borders ────────────────────────────────────────────────────────────────

fn resolve_border(class: &str) -> Option<Declarations> {
    if let Some(rest) = class.strip_prefix("rounded") {
        let (props, size): (&[&str], &str) = match rest.strip_prefix('-') {
            None if rest.is_empty() => (&["border-radius"], ""),
            None => return None,
            Some(r) => split_radius_side(r),
        };
        let val = match size {
            ""     => "0.25rem".to_string(),
            "none" => "0px".to_string(),
            "sm"   => "0.125rem".to_string(),
            "md"   => "0.375rem".to_string(),
            "lg"   => "0.5rem".to_string(),
            "xl"   => "0.75rem".to_string(),
            "2xl"  => "1rem".to_string(),
            "3xl"  => "1.5rem".to_string(),
            "full" => "9999px".to_string(),
            other => arbitrary(other)?,
        };
        return Some(spread(props, &val));
    }

    let style = match class {
        "border-solid"  => Some("solid"),
        "border-dashed" => Some("dashed"),
        "border-dotted" => Some("dotted"),
        "border-double" => Some("double"),
        "border-none"   => Some("none"),
        _ => None,
    };
    if let Some(s) = style {
        return Some(single("border-style", s));
    }

    let rest = class.strip_prefix("border")?;
    let (props, width): (&[&str], &str) = match rest {
        "" => (&["border-width"], ""),
        _ => {
            let r = rest.strip_prefix('-')?;
            if let Some(w) = r.strip_prefix("x") {
                (&["border-left-width", "border-right-width"], w.strip_prefix('-').unwrap_or(w))
            } else if let Some(w) = r.strip_prefix("y") {
                (&["border-top-width", "border-bottom-width"], w.strip_prefix('-').unwrap_or(w))
            } else if let Some(w) = r.strip_prefix("t") {
                (&["border-top-width"], w.strip_prefix('-').unwrap_or(w))
            } else if let Some(w) = r.strip_prefix("r") {
                (&["border-right-width"], w.strip_prefix('-').unwrap_or(w))
            } else if let Some(w) = r.strip_prefix("b") {
                (&["border-bottom-width"], w.strip_prefix('-').unwrap_or(w))
            } else if let Some(w) = r.strip_prefix("l") {
                (&["border-left-width"], w.strip_prefix('-').unwrap_or(w))
            } else {
                (&["border-width"], r)
            }
        }
    };
    let val = match width {
        "" => "1px".to_string(),
        "0" | "2" | "4" | "8" => format!("{}px", width),
        // Anything else (e.g. border-red-500) is a color, not a width
        _ => return None,
    };
    Some(spread(props, &val))
}

fn split_radius_side(rest: &str) -> (&'static [&'static str], &str) {
    const SIDES: &[(&str, &[&str])] = &[
        ("tl", &["border-top-left-radius"]),
        ("tr", &["border-top-right-radius"]),
        ("bl", &["border-bottom-left-radius"]),
        ("br", &["border-bottom-right-radius"]),
        ("t", &["border-top-left-radius", "border-top-right-radius"]),
        ("r", &["border-top-right-radius", "border-bottom-right-radius"]),
        ("b", &["border-bottom-left-radius", "border-bottom-right-radius"]),
        ("l", &["border-top-left-radius", "border-bottom-left-radius"]),
    ];
    for &(side, props) in SIDES {
        if rest == side {
            return (props, "");
        }
        if let Some(size) = rest.strip_prefix(side).and_then(|r| r.strip_prefix('-')) {
            return (props, size);
        }
    }
    (&["border-radius"], rest)
}

// ─── Effects ────────────────────────────────────────────────────────────────

fn resolve_effects(class: &str) -> Option<Declarations> {
    if let Some(val) = class.strip_prefix("opacity-") {
        let css_val = match arbitrary(val) {
            Some(inner) => inner,
            None => {
                let n: u32 = val.parse().ok()?;
                if n > 100 {
                    return None;
                }
                spacing::format_number(n as f64 / 100.0)
            }
        };
        return Some(single("opacity", css_val));
    }

    let shadow = match class {
        "shadow-sm"   => "0 1px 2px 0 rgb(0 0 0 / 0.05)",
        "shadow"      => "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)",
        "shadow-md"   => "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
        "shadow-lg"   => "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
        "shadow-xl"   => "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)",
        "shadow-2xl"  => "0 25px 50px -12px rgb(0 0 0 / 0.25)",
        "shadow-none" => "0 0 #0000",
        _ => return None,
    };
    Some(single("box-shadow", shadow))
}

// ─── Colors ─────────────────────────────────────────────────────────────────

fn resolve_bg_color(class: &str) -> Option<Declarations> {
    let val = class.strip_prefix("bg-")?;
    // bg-[url(...)] is an image, any other arbitrary value a color
    if let Some(inner) = arbitrary(val).filter(|inner| inner.starts_with("url(")) {
        return Some(single("background-image", inner));
    }
    resolve_color_value(val, "background-color")
}

fn resolve_text_color(class: &str) -> Option<Declarations> {
    // Sizes and alignment were already claimed by resolve_typography.
    let val = class.strip_prefix("text-")?;
    resolve_color_value(val, "color")
}

fn resolve_border_color(class: &str) -> Option<Declarations> {
    let val = class.strip_prefix("border-")?;
    resolve_color_value(val, "border-color")
}

/// Shared color resolution for `bg-`, `text-` and `border-` prefixes.
fn resolve_color_value(val: &str, property: &str) -> Option<Declarations> {
    let flat = match val {
        "transparent" => Some("transparent"),
        "current"     => Some("currentColor"),
        "inherit"     => Some("inherit"),
        "black"       => Some("#000000"),
        "white"       => Some("#ffffff"),
        _ => None,
    };
    if let Some(color) = flat {
        return Some(single(property, color));
    }

    if let Some(inner) = arbitrary(val) {
        return Some(single(property, inner));
    }

    // Opacity modifier: "blue-500/50"
    let (color_part, opacity) = match val.rsplit_once('/') {
        Some((c, o)) => (c, Some(o)),
        None => (val, None),
    };

    let (color_name, shade_str) = color_part.rsplit_once('-')?;
    let shade: u16 = shade_str.parse().ok()?;
    let hex = colors::lookup(color_name, shade)?;

    let css_val = match opacity {
        Some(op_str) => {
            let op_pct: f64 = op_str.parse().ok()?;
            let (r, g, b) = colors::hex_to_rgb(hex)?;
            format!("rgba({}, {}, {}, {})", r, g, b, spacing::format_number(op_pct / 100.0))
        }
        None => hex.to_string(),
    };
    Some(single(property, css_val))
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Inner value of an arbitrary `[value]` token, with `_` standing for a space.
fn arbitrary(val: &str) -> Option<String> {
    let inner = val.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner.replace('_', " "))
}

/// Resolves a value that can be a spacing scale token or an arbitrary `[value]`.
fn resolve_spacing_or_arbitrary(val: &str) -> Option<String> {
    arbitrary(val).or_else(|| spacing::spacing_value(val))
}

fn negate(neg: bool, val: String) -> String {
    if neg && val != "0px" {
        format!("-{}", val)
    } else {
        val
    }
}

fn looks_like_color(val: &str) -> bool {
    val.starts_with('#')
        || val.starts_with("rgb")
        || val.starts_with("hsl")
        || val.starts_with("color:")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
