use serde::{Deserialize, Serialize};

use crate::error::{BannerError, BannerResult};

/// The currently (or most recently) playing track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackRecord {
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub is_playing: bool,
    pub source_url: Option<String>,
}

// ─── Listening-history service response ─────────────────────────────────────

/// Body of the `latest-song` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestSong {
    pub track: Option<LastFmTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmTrack {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub artist: Option<TextField>,
    #[serde(default)]
    pub album: Option<TextField>,
    #[serde(default)]
    pub image: Vec<TextField>,
    #[serde(rename = "@attr", default)]
    pub attr: Option<TrackAttr>,
}

/// Objects of the shape `{ "#text": "..." }`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextField {
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAttr {
    pub nowplaying: Option<String>,
}

/// Index of the largest image size the service returns (`extralarge`).
const COVER_IMAGE_INDEX: usize = 3;

impl TrackRecord {
    /// Build a record from the service response.
    pub fn from_response(response: LatestSong) -> BannerResult<Self> {
        let track = response
            .track
            .ok_or(BannerError::MissingTrackField { field: "track" })?;

        let image_url = track
            .image
            .get(COVER_IMAGE_INDEX)
            .or_else(|| track.image.last())
            .map(|img| img.text.clone());

        Ok(Self {
            image_url,
            title: track.name,
            artist: track.artist.map(|a| a.text),
            album: track.album.map(|a| a.text),
            is_playing: track
                .attr
                .and_then(|a| a.nowplaying)
                .is_some_and(|v| v == "true"),
            source_url: track.url,
        })
    }

    /// Copy whose artist and album read `by <artist>` / `on <album>`.
    ///
    /// Empty fields stay empty so substitution still falls back.
    pub fn with_credit_prefixes(&self) -> Self {
        Self {
            artist: prefixed("by", self.artist.as_deref()),
            album: prefixed("on", self.album.as_deref()),
            ..self.clone()
        }
    }

    /// True when there is no usable cover: the URL is empty or it is the
    /// service's default-avatar image identified by `sentinel`.
    pub fn is_placeholder_image(&self, sentinel: &str) -> bool {
        match non_empty(self.image_url.as_deref()) {
            None => true,
            Some(url) => !sentinel.is_empty() && url.contains(sentinel),
        }
    }
}

/// `Some(s)` only when `s` is present and non-empty.
pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn prefixed(prefix: &str, value: Option<&str>) -> Option<String> {
    non_empty(value).map(|v| format!("{} {}", prefix, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RESPONSE: &str = r##"{
      "track": {
        "artist": { "mbid": "", "#text": "Hoshimachi Suisei" },
        "album": { "mbid": "", "#text": "Still Still Stellar" },
        "image": [
          { "size": "small", "#text": "https://img/34s.png" },
          { "size": "medium", "#text": "https://img/64s.png" },
          { "size": "large", "#text": "https://img/174s.png" },
          { "size": "extralarge", "#text": "https://img/300x300.png" }
        ],
        "name": "Stellar Stellar",
        "url": "https://www.last.fm/music/x",
        "@attr": { "nowplaying": "true" }
      }
    }"##;

    #[test]
    fn converts_service_response() {
        let response: LatestSong = serde_json::from_str(RESPONSE).unwrap();
        let record = TrackRecord::from_response(response).unwrap();
        assert_eq!(
            record,
            TrackRecord {
                image_url: Some("https://img/300x300.png".into()),
                title: Some("Stellar Stellar".into()),
                artist: Some("Hoshimachi Suisei".into()),
                album: Some("Still Still Stellar".into()),
                is_playing: true,
                source_url: Some("https://www.last.fm/music/x".into()),
            }
        );
    }

    #[test]
    fn missing_attr_means_not_playing() {
        let response: LatestSong =
            serde_json::from_str(r#"{ "track": { "name": "x", "image": [] } }"#).unwrap();
        let record = TrackRecord::from_response(response).unwrap();
        assert!(!record.is_playing);
        assert_eq!(record.image_url, None);
        assert_eq!(record.artist, None);
    }

    #[test]
    fn missing_track_is_an_error() {
        let response: LatestSong = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            TrackRecord::from_response(response),
            Err(BannerError::MissingTrackField { field: "track" })
        ));
    }

    #[test]
    fn credit_prefixes_skip_empty_fields() {
        let record = TrackRecord {
            artist: Some("Mori Calliope".into()),
            album: Some(String::new()),
            ..Default::default()
        };
        let prefixed = record.with_credit_prefixes();
        assert_eq!(prefixed.artist.as_deref(), Some("by Mori Calliope"));
        assert_eq!(prefixed.album, None);
    }

    #[test]
    fn placeholder_detection() {
        let sentinel = "2a96cbd8b46e442fc41c2b86b821562f";
        let mut record = TrackRecord::default();
        assert!(record.is_placeholder_image(sentinel));

        record.image_url = Some(format!("https://img/{}.png", sentinel));
        assert!(record.is_placeholder_image(sentinel));

        record.image_url = Some("https://img/cover.png".into());
        assert!(!record.is_placeholder_image(sentinel));
    }

    #[test]
    fn record_json_uses_camel_case() {
        let record: TrackRecord =
            serde_json::from_str(r#"{ "imageUrl": "u", "title": "Song", "isPlaying": true }"#)
                .unwrap();
        assert_eq!(record.image_url.as_deref(), Some("u"));
        assert!(record.is_playing);
    }
}
