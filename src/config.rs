use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BannerError, BannerResult};

const TWEMOJI: &str = "https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/svg";

/// Banner generator settings, loaded from YAML. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint returning the latest track as JSON.
    pub track_endpoint: String,
    pub request_timeout_secs: u64,
    /// HTML template whose `<body>` is rendered.
    pub template: PathBuf,
    /// SVG written by `render`.
    pub output: PathBuf,
    /// Existing SVG rewritten in place by `update`.
    pub banner: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Web-font stylesheet listing the font files to embed.
    pub font_css: Option<String>,
    /// Substring identifying the service's default cover image.
    pub placeholder_sentinel: String,
    pub placeholder_image: PathBuf,
    pub play_icon: String,
    pub pause_icon: String,
    /// Glyph → image source (URL or path) drawn in place of that glyph.
    pub graphemes: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let graphemes = [
            ("🎵", format!("{}/1f3b5.svg", TWEMOJI)),
            ("🩵", "https://upload.wikimedia.org/wikipedia/commons/3/3b/Hololive_triangles_logo.svg".to_string()),
            ("🍵", format!("{}/2615.svg", TWEMOJI)),
            ("🌄", format!("{}/1f304.svg", TWEMOJI)),
            ("😎", format!("{}/1f60e.svg", TWEMOJI)),
            ("🤓", format!("{}/1f913.svg", TWEMOJI)),
            ("🛠️", format!("{}/1f6e0.svg", TWEMOJI)),
            ("💻", format!("{}/1f4bb.svg", TWEMOJI)),
            ("▶️", "public/now-playing.gif".to_string()),
            ("⏸️", "public/last-played.svg".to_string()),
        ]
        .into_iter()
        .map(|(glyph, src)| (glyph.to_string(), src))
        .collect();

        Self {
            track_endpoint: "https://lastfm-last-played.biancarosa.com.br/brandonmai/latest-song"
                .to_string(),
            request_timeout_secs: 20,
            template: PathBuf::from("test.html"),
            output: PathBuf::from("profile.svg"),
            banner: PathBuf::from("banner.svg"),
            width: 850,
            height: 510,
            font_css: Some(
                "https://fonts.googleapis.com/css2?family=JetBrains+Mono:wght@100..800&family=Noto+Sans+JP:wght@100..900&display=swap"
                    .to_string(),
            ),
            placeholder_sentinel: "2a96cbd8b46e442fc41c2b86b821562f".to_string(),
            placeholder_image: PathBuf::from("public/album-placeholder.webp"),
            play_icon: "public/now-playing.gif".to_string(),
            pause_icon: "public/last-played.svg".to_string(),
            graphemes,
        }
    }
}

impl Config {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> BannerResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub async fn load(path: &Path) -> BannerResult<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(yaml) => Self::from_yaml(&yaml),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn validate(&self) -> BannerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BannerError::Config(format!(
                "banner size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.track_endpoint.starts_with("http://") && !self.track_endpoint.starts_with("https://") {
            return Err(BannerError::Config(format!(
                "track_endpoint must be an http(s) URL, got '{}'",
                self.track_endpoint
            )));
        }
        Ok(())
    }
}
