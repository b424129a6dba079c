//! # Now-playing banner renderer
//!
//! Turns an HTML template and the latest track from a listening-history
//! service into a static SVG banner.
//!
//! ## Features
//! - HTML fragment → node tree, with Tailwind utility classes and inline
//!   styles folded into one style mapping per element
//! - Slot substitution by element `id` (`image`, `status-icon`, `status-text`,
//!   `name`, `artist`, `album`)
//! - SVG output with embedded fonts and glyph images
//! - In-place update of an existing banner SVG
//!
//! ## Example
//! ```ignore
//! use nowplaying_banner::{render_template, TrackRecord};
//!
//! let html = r#"<div class="flex gap-4"><img id="image"/><p id="name"></p></div>"#;
//! let track = TrackRecord { title: Some("Stellar Stellar".into()), ..Default::default() };
//!
//! let tree = render_template(html, &track);
//! ```

pub mod assets;
pub mod banner;
pub mod config;
pub mod error;
pub mod fetch;
pub mod node;
pub mod parser;
pub mod render;
pub mod style;
pub mod substitute;
pub mod tailwind;
pub mod track;

// --- Core types ---
pub use error::{BannerError, BannerResult, TranslateError};
pub use node::{Children, Element, Node, PropValue, Props, StyleMap};
pub use track::TrackRecord;

// --- Pipeline ---
pub use assets::Assets;
pub use banner::{update_banner, BannerImages};
pub use config::Config;
pub use fetch::TrackClient;
pub use parser::{extract_body, parse_fragment};
pub use render::{render_svg, to_json, RenderOptions};
pub use substitute::substitute;

/// Parse a template (a full HTML document or a bare fragment) and fill its
/// slots with `track`. Artist and album get their `by`/`on` prefixes.
pub fn render_template(template: &str, track: &TrackRecord) -> Node {
    let tree = parse_fragment(extract_body(template));
    substitute(&tree, &track.with_credit_prefixes())
}
