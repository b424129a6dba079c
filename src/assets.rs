//! One-time asset loading: fonts and glyph images are fetched (or read from
//! disk) and embedded as base64 data URIs before any markup is rendered.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use indexmap::IndexMap;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{BannerError, BannerResult};

/// Image formats that can be embedded as data URIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUriKind {
    Svg,
    Gif,
    Webp,
    Png,
    Jpeg,
}

impl DataUriKind {
    pub fn mime(self) -> &'static str {
        match self {
            DataUriKind::Svg => "image/svg+xml",
            DataUriKind::Gif => "image/gif",
            DataUriKind::Webp => "image/webp",
            DataUriKind::Png => "image/png",
            DataUriKind::Jpeg => "image/jpeg",
        }
    }

    /// Guess from the extension of a path or URL (query strings ignored).
    pub fn from_path(source: &str) -> Option<Self> {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(DataUriKind::Svg),
            "gif" => Some(DataUriKind::Gif),
            "webp" => Some(DataUriKind::Webp),
            "png" => Some(DataUriKind::Png),
            "jpg" | "jpeg" => Some(DataUriKind::Jpeg),
            _ => None,
        }
    }
}

/// A font face ready to embed.
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    pub family: String,
    pub weight: Option<u16>,
    pub style: Option<String>,
    pub url: String,
    pub data: Vec<u8>,
}

impl FontConfig {
    pub fn mime(&self) -> &'static str {
        let path = self.url.split('?').next().unwrap_or(&self.url);
        if path.ends_with(".woff2") {
            "font/woff2"
        } else if path.ends_with(".woff") {
            "font/woff"
        } else if path.ends_with(".otf") {
            "font/otf"
        } else {
            "font/ttf"
        }
    }

    pub fn data_uri(&self) -> String {
        encode_data_uri(self.mime(), &self.data)
    }
}

/// Everything the renderer embeds, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub fonts: Vec<FontConfig>,
    /// Glyph → image data URI, in configuration order.
    pub grapheme_images: IndexMap<String, String>,
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes))
}

/// Download a URL into memory, treating non-2xx statuses as errors.
async fn fetch_bytes(client: &reqwest::Client, url: &str) -> BannerResult<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BannerError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

/// Read `source` (an http(s) URL or a local path) and encode it as a data URI.
pub async fn to_data_uri(
    client: &reqwest::Client,
    source: &str,
    kind: DataUriKind,
) -> BannerResult<String> {
    let bytes = if is_remote(source) {
        fetch_bytes(client, source).await
    } else {
        tokio::fs::read(source).await.map_err(BannerError::from)
    }
    .map_err(|err| BannerError::Asset {
        source_path: source.to_string(),
        reason: err.to_string(),
    })?;

    Ok(encode_data_uri(kind.mime(), &bytes))
}

// ─── Fonts ───────────────────────────────────────────────────────────────────

/// A `@font-face` rule before its file is downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub family: String,
    pub weight: Option<u16>,
    pub style: Option<String>,
    pub url: String,
}

/// Extract every `@font-face` rule that names a source URL.
pub fn parse_font_faces(css: &str) -> Vec<FontFace> {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    static URL: OnceLock<Regex> = OnceLock::new();
    static WEIGHT: OnceLock<Regex> = OnceLock::new();
    static FAMILY: OnceLock<Regex> = OnceLock::new();
    static STYLE: OnceLock<Regex> = OnceLock::new();

    let block = BLOCK.get_or_init(|| Regex::new(r"@font-face\s*\{([^}]*)\}").unwrap());
    let url = URL.get_or_init(|| Regex::new(r"url\(([^)]+)\)").unwrap());
    let weight = WEIGHT.get_or_init(|| Regex::new(r"font-weight:\s*(\d+)").unwrap());
    let family = FAMILY.get_or_init(|| Regex::new(r"font-family:\s*([^;]+)").unwrap());
    let style = STYLE.get_or_init(|| Regex::new(r"font-style:\s*([^;]+)").unwrap());

    let unquote = |s: &str| s.replace(['"', '\''], "").trim().to_string();

    block
        .captures_iter(css)
        .filter_map(|caps| {
            let body = caps.get(1)?.as_str();
            let src = url.captures(body)?;
            Some(FontFace {
                family: family
                    .captures(body)
                    .map(|c| unquote(&c[1]))
                    .unwrap_or_default(),
                weight: weight.captures(body).and_then(|c| c[1].parse().ok()),
                style: style.captures(body).map(|c| unquote(&c[1])),
                url: unquote(&src[1]),
            })
        })
        .collect()
}

/// Fetch a web-font stylesheet and download every face it declares, concurrently.
pub async fn load_fonts(client: &reqwest::Client, css_url: &str) -> BannerResult<Vec<FontConfig>> {
    let css = fetch_bytes(client, css_url)
        .await
        .map_err(|err| BannerError::Asset {
            source_path: css_url.to_string(),
            reason: err.to_string(),
        })?;
    let css = String::from_utf8_lossy(&css);
    let faces = parse_font_faces(&css);
    tracing::info!(count = faces.len(), "fetching font variations");

    let mut tasks = JoinSet::new();
    for (index, face) in faces.into_iter().enumerate() {
        let client = client.clone();
        tasks.spawn(async move {
            let data = fetch_bytes(&client, &face.url).await;
            (index, face, data)
        });
    }

    let mut fonts = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, face, data) = joined.map_err(|err| BannerError::Asset {
            source_path: css_url.to_string(),
            reason: err.to_string(),
        })?;
        let data = data.map_err(|err| BannerError::Asset {
            source_path: face.url.clone(),
            reason: err.to_string(),
        })?;
        fonts.push((
            index,
            FontConfig {
                family: face.family,
                weight: face.weight,
                style: face.style,
                url: face.url,
                data,
            },
        ));
    }

    fonts.sort_by_key(|(index, _)| *index);
    tracing::info!(count = fonts.len(), "loaded font variations");
    Ok(fonts.into_iter().map(|(_, font)| font).collect())
}

// ─── Initialization ──────────────────────────────────────────────────────────

impl Assets {
    /// Load fonts and glyph images once, before any template is rendered.
    ///
    /// A font failure is fatal. A glyph image that cannot be loaded is logged
    /// and left out, so that glyph renders as plain text.
    pub async fn load(client: &reqwest::Client, config: &Config) -> BannerResult<Self> {
        let fonts = {
            let client = client.clone();
            let css_url = config.font_css.clone();
            tokio::spawn(async move {
                match css_url {
                    Some(url) => load_fonts(&client, &url).await,
                    None => Ok(Vec::new()),
                }
            })
        };

        let mut icons = JoinSet::new();
        for (index, (glyph, source)) in config.graphemes.iter().enumerate() {
            let client = client.clone();
            let glyph = glyph.clone();
            let source = source.clone();
            icons.spawn(async move {
                let kind = DataUriKind::from_path(&source).unwrap_or(DataUriKind::Svg);
                let uri = to_data_uri(&client, &source, kind).await;
                (index, glyph, uri)
            });
        }

        let mut loaded = Vec::new();
        while let Some(joined) = icons.join_next().await {
            match joined {
                Ok((index, glyph, Ok(uri))) => loaded.push((index, glyph, uri)),
                Ok((_, glyph, Err(err))) => {
                    tracing::warn!(glyph = %glyph, error = %err, "glyph image unavailable, rendering as text");
                }
                Err(err) => tracing::warn!(error = %err, "glyph image task failed"),
            }
        }
        loaded.sort_by_key(|(index, _, _)| *index);

        let fonts = fonts.await.map_err(|err| BannerError::Asset {
            source_path: config.font_css.clone().unwrap_or_default(),
            reason: err.to_string(),
        })??;

        Ok(Self {
            fonts,
            grapheme_images: loaded.into_iter().map(|(_, glyph, uri)| (glyph, uri)).collect(),
        })
    }
}
