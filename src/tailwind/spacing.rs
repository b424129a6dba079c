//! Tailwind spacing scale: `1` is `0.25rem`, `px` is `1px`.

const SCALE: &[&str] = &[
    "0", "0.5", "1", "1.5", "2", "2.5", "3", "3.5", "4", "5", "6", "7", "8", "9", "10", "11",
    "12", "14", "16", "20", "24", "28", "32", "36", "40", "44", "48", "52", "56", "60", "64",
    "72", "80", "96",
];

/// Resolves a spacing-scale token to a CSS length.
pub fn spacing_value(token: &str) -> Option<String> {
    match token {
        "px" => return Some("1px".into()),
        "0" => return Some("0px".into()),
        _ => {}
    }
    if !SCALE.contains(&token) {
        return None;
    }
    let n: f64 = token.parse().ok()?;
    Some(format!("{}rem", format_number(n / 4.0)))
}

/// Formats a float without trailing zeros (`0.125`, `1`, `2.5`).
pub fn format_number(n: f64) -> String {
    let s = format!("{:.4}", n);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_values() {
        assert_eq!(spacing_value("4").as_deref(), Some("1rem"));
        assert_eq!(spacing_value("0.5").as_deref(), Some("0.125rem"));
        assert_eq!(spacing_value("px").as_deref(), Some("1px"));
        assert_eq!(spacing_value("0").as_deref(), Some("0px"));
        assert_eq!(spacing_value("13"), None);
    }
}
