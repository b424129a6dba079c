//! In-place update of an existing banner SVG.
//!
//! Elements are located by `id` and only their `src` attribute or text
//! content is rewritten; every other byte of the document is preserved.

use std::ops::Range;

use crate::assets::{to_data_uri, DataUriKind};
use crate::config::Config;
use crate::error::{BannerError, BannerResult};
use crate::render::{escape_attr, escape_text};
use crate::substitute::{status_text, Slot, ALBUM_FALLBACK, ARTIST_FALLBACK, TITLE_FALLBACK};
use crate::track::{non_empty, TrackRecord};

/// 1×1 transparent GIF used when no cover image can be loaded at all.
pub const FALLBACK_COVER_URI: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Data URIs written into the banner's image slots.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerImages {
    pub cover: String,
    pub play_icon: Option<String>,
    pub pause_icon: Option<String>,
}

impl BannerImages {
    /// Load the cover and status icons for `data`.
    ///
    /// An empty cover URL or the service's default image is replaced by the
    /// configured placeholder; a cover that cannot be loaded falls back to
    /// [`FALLBACK_COVER_URI`]. Icons that fail to load are left unset.
    pub async fn resolve(client: &reqwest::Client, config: &Config, data: &TrackRecord) -> Self {
        let cover_source = match non_empty(data.image_url.as_deref()) {
            Some(url) if !data.is_placeholder_image(&config.placeholder_sentinel) => url.to_string(),
            _ => config.placeholder_image.to_string_lossy().into_owned(),
        };
        let cover_kind = DataUriKind::from_path(&cover_source).unwrap_or(DataUriKind::Webp);

        let (cover, play_icon, pause_icon) = tokio::join!(
            to_data_uri(client, &cover_source, cover_kind),
            load_icon(client, &config.play_icon),
            load_icon(client, &config.pause_icon),
        );

        let cover = cover.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "cover image unavailable, using fallback");
            FALLBACK_COVER_URI.to_string()
        });

        Self {
            cover,
            play_icon,
            pause_icon,
        }
    }

    fn status_icon(&self, is_playing: bool) -> Option<&str> {
        if is_playing {
            self.play_icon.as_deref()
        } else {
            self.pause_icon.as_deref()
        }
    }
}

async fn load_icon(client: &reqwest::Client, source: &str) -> Option<String> {
    let kind = DataUriKind::from_path(source).unwrap_or(DataUriKind::Svg);
    match to_data_uri(client, source, kind).await {
        Ok(uri) => Some(uri),
        Err(err) => {
            tracing::warn!(source, error = %err, "status icon unavailable");
            None
        }
    }
}

/// A replacement of `range` in the source document.
#[derive(Debug)]
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Rewrite the slot elements of `svg` with `data`.
///
/// Ids that do not occur in the document are skipped.
pub fn update_banner(svg: &str, data: &TrackRecord, images: &BannerImages) -> BannerResult<String> {
    if svg.trim().is_empty() {
        return Err(BannerError::EmptySvg);
    }

    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(svg, options)?;

    let artist = format!("by {}", non_empty(data.artist.as_deref()).unwrap_or(ARTIST_FALLBACK));
    let album = format!("on {}", non_empty(data.album.as_deref()).unwrap_or(ALBUM_FALLBACK));

    let mut edits = Vec::new();
    for slot in Slot::ALL {
        let Some(node) = doc
            .descendants()
            .find(|n| n.is_element() && n.attribute("id") == Some(slot.marker()))
        else {
            tracing::debug!(id = slot.marker(), "slot not present in banner");
            continue;
        };

        let edit = match slot {
            Slot::Cover => Some(set_src(svg, node, &images.cover)),
            Slot::StatusIcon => images
                .status_icon(data.is_playing)
                .map(|icon| set_src(svg, node, icon)),
            Slot::StatusText => set_text(svg, node, status_text(data.is_playing)),
            Slot::Title => set_text(
                svg,
                node,
                non_empty(data.title.as_deref()).unwrap_or(TITLE_FALLBACK),
            ),
            Slot::Artist => set_text(svg, node, &artist),
            Slot::Album => set_text(svg, node, &album),
        };
        edits.extend(edit);
    }

    Ok(apply_edits(svg, edits))
}

fn apply_edits(svg: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.range.start);

    let mut out = String::with_capacity(svg.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.range.start < cursor {
            tracing::warn!(at = edit.range.start, "skipping edit nested inside another slot");
            continue;
        }
        out.push_str(&svg[cursor..edit.range.start]);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    out.push_str(&svg[cursor..]);
    out
}

/// Tag name as written in the start tag at `start`.
fn qualified_name(svg: &str, start: usize) -> &str {
    let rest = &svg[start + 1..];
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Replace the value of the element's own `src` attribute, quotes included,
/// or append one after the last attribute.
fn set_src(svg: &str, node: roxmltree::Node, value: &str) -> Edit {
    let quoted = format!("\"{}\"", escape_attr(value));

    let existing = node
        .attributes()
        .find(|attr| attr.name() == "src" && attr.namespace().is_none());
    if let Some(attr) = existing {
        let value_range = attr.range_value();
        return Edit {
            range: value_range.start - 1..value_range.end + 1,
            text: quoted,
        };
    }

    let insert_at = match node.attributes().last() {
        Some(last) => last.range_value().end + 1,
        None => {
            let start = node.range().start;
            start + 1 + qualified_name(svg, start).len()
        }
    };
    Edit {
        range: insert_at..insert_at,
        text: format!(" src={}", quoted),
    }
}

/// Replace everything between the element's start and end tags with `text`.
/// A self-closing element is expanded into a start/end pair.
fn set_text(svg: &str, node: roxmltree::Node, text: &str) -> Option<Edit> {
    let element = node.range();
    let escaped = escape_text(text);

    if let (Some(first), Some(last)) = (node.first_child(), node.last_child()) {
        return Some(Edit {
            range: first.range().start..last.range().end,
            text: escaped,
        });
    }

    let source = &svg[element.clone()];
    if source.ends_with("/>") {
        return Some(Edit {
            range: element.end - 2..element.end,
            text: format!(">{}</{}>", escaped, qualified_name(svg, element.start)),
        });
    }

    // `<p></p>`: the end tag starts at the last `</`
    let close_start = element.start + source.rfind("</")?;
    let open_end = element.start + source[..close_start - element.start].rfind('>')? + 1;
    Some(Edit {
        range: open_end..close_start,
        text: escaped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BANNER: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <foreignObject width="10" height="10">
    <div xmlns="http://www.w3.org/1999/xhtml">
      <img id="image" class="cover" src="old.png" />
      <img id="status-icon"/>
      <span id="status-text">?</span>
      <p id="name"><b>old</b></p>
      <p id="artist"/>
      <p id="album">x</p>
    </div>
  </foreignObject>
</svg>"#;

    fn images() -> BannerImages {
        BannerImages {
            cover: "data:image/webp;base64,COVER".into(),
            play_icon: Some("data:image/gif;base64,PLAY".into()),
            pause_icon: None,
        }
    }

    #[test]
    fn rewrites_every_slot_and_preserves_the_rest() {
        let data = TrackRecord {
            title: Some("Song & Dance".into()),
            artist: Some("Artist".into()),
            is_playing: true,
            ..Default::default()
        };
        let out = update_banner(BANNER, &data, &images()).unwrap();

        let expected = BANNER
            .replace(r#"src="old.png""#, r#"src="data:image/webp;base64,COVER""#)
            .replace(
                r#"<img id="status-icon"/>"#,
                r#"<img id="status-icon" src="data:image/gif;base64,PLAY"/>"#,
            )
            .replace(">?</span>", ">Now playing...</span>")
            .replace("<b>old</b>", "Song &amp; Dance")
            .replace(r#"<p id="artist"/>"#, r#"<p id="artist">by Artist</p>"#)
            .replace(">x</p>", ">on Various album</p>");
        assert_eq!(out, expected);
    }

    #[test]
    fn paused_without_icon_leaves_status_icon_alone() {
        let out = update_banner(BANNER, &TrackRecord::default(), &images()).unwrap();
        assert!(out.contains(r#"<img id="status-icon"/>"#));
        assert!(out.contains(">Last played...</span>"));
        assert!(out.contains(">Something went wrong</p>"));
        assert!(out.contains(">by Various artist</p>"));
    }

    #[test]
    fn missing_ids_are_skipped() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><text id="other">keep</text></svg>"#;
        let out = update_banner(svg, &TrackRecord::default(), &images()).unwrap();
        assert_eq!(out, svg);
    }

    #[test]
    fn single_quoted_src_is_replaced() {
        let svg = r#"<svg><image id="image" src='a.png' width="4"/></svg>"#;
        let out = update_banner(svg, &TrackRecord::default(), &images()).unwrap();
        assert_eq!(out, r#"<svg><image id="image" src="data:image/webp;base64,COVER" width="4"/></svg>"#);
    }

    #[test]
    fn empty_and_broken_documents_fail() {
        assert!(matches!(
            update_banner("  ", &TrackRecord::default(), &images()),
            Err(BannerError::EmptySvg)
        ));
        assert!(matches!(
            update_banner("<svg><p></svg>", &TrackRecord::default(), &images()),
            Err(BannerError::Markup { .. })
        ));
    }

    #[test]
    fn src_inside_another_attribute_value_is_left_alone() {
        let svg = r#"<svg><image id="image" alt="old src='a.png'" src="b.png"/></svg>"#;
        let out = update_banner(svg, &TrackRecord::default(), &images()).unwrap();
        assert_eq!(
            out,
            r#"<svg><image id="image" alt="old src='a.png'" src="data:image/webp;base64,COVER"/></svg>"#
        );
    }

    #[test]
    fn missing_src_is_appended_after_the_last_attribute() {
        let svg = r#"<svg><image id="image" alt="src='x'" data-src="keep"/></svg>"#;
        let out = update_banner(svg, &TrackRecord::default(), &images()).unwrap();
        assert_eq!(
            out,
            r#"<svg><image id="image" alt="src='x'" data-src="keep" src="data:image/webp;base64,COVER"/></svg>"#
        );
    }

    #[test]
    fn empty_element_with_bracket_in_attribute_gets_text() {
        let svg = r#"<svg><text id="name" data-note="a>b"></text></svg>"#;
        let out = update_banner(svg, &TrackRecord::default(), &images()).unwrap();
        assert_eq!(out, r#"<svg><text id="name" data-note="a>b">Something went wrong</text></svg>"#);
    }

    #[tokio::test]
    async fn placeholder_cover_falls_back_when_unreadable() {
        let config = Config {
            placeholder_image: "/nonexistent/placeholder.webp".into(),
            play_icon: "/nonexistent/play.gif".into(),
            pause_icon: "/nonexistent/pause.svg".into(),
            ..Default::default()
        };
        let data = TrackRecord {
            image_url: Some(format!("https://img/{}.png", config.placeholder_sentinel)),
            ..Default::default()
        };
        let images = BannerImages::resolve(&reqwest::Client::new(), &config, &data).await;
        assert_eq!(images.cover, FALLBACK_COVER_URI);
        assert_eq!(images.play_icon, None);
        assert_eq!(images.pause_icon, None);
    }

    #[tokio::test]
    async fn placeholder_file_is_used_for_default_cover() {
        let path = std::env::temp_dir().join("nowplaying-banner-placeholder.webp");
        tokio::fs::write(&path, b"RIFF").await.unwrap();
        let config = Config {
            placeholder_image: path.clone(),
            ..Default::default()
        };
        let images = BannerImages::resolve(&reqwest::Client::new(), &config, &TrackRecord::default()).await;
        assert_eq!(images.cover, "data:image/webp;base64,UklGRg==");
        let _ = tokio::fs::remove_file(&path).await;
    }
}
