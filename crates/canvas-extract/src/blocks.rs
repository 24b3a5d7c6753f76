use serde::{Deserialize, Serialize};

/// Name assigned to an artifact payload that omits its own.
pub const DEFAULT_ARTIFACT_NAME: &str = "artifact";
/// Name assigned to HTML blocks recovered from unmarked raw text.
pub const HTML_PAGE_NAME: &str = "page.html";
/// Name assigned to GeoJSON blocks recovered from unmarked raw text.
pub const GEOJSON_DOCUMENT_NAME: &str = "data.geojson";

/// Typed, renderer-agnostic unit of extracted step output.
///
/// Blocks are pure transformation results: created fresh on every
/// extraction call and owned solely by the caller. Renderers consume one
/// block per invocation and must not mutate it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Prose or Markdown, rendered as-is.
    Text { value: String },
    /// Base64-encoded raster image payload. `data` may be empty or carry a
    /// truncation marker; the image renderer decides how to surface that.
    Image { name: String, data: String },
    /// A GeoJSON document as raw text, neither parsed nor validated here.
    #[serde(rename = "geojson")]
    GeoJson { name: String, data: String },
    /// A complete HTML document destined for an isolated frame.
    Html { name: String, data: String },
}

impl ContentBlock {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn image(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Image {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn geojson(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self::GeoJson {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn html(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Html {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::GeoJson { .. } => "geojson",
            Self::Html { .. } => "html",
        }
    }
}

/// Wire shape of an artifact payload emitted by a tool or agent step:
/// `{"type": ..., "name"?: ..., "data"?: ...}`. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ArtifactPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub data: Option<String>,
}

impl ArtifactPayload {
    /// Maps a recognized payload type to its block, applying the `name` and
    /// `data` defaults. Returns `None` for unrecognized types so the caller
    /// can degrade the original text rather than drop it.
    pub(crate) fn into_block(self) -> Option<ContentBlock> {
        let name = self
            .name
            .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());
        let data = self.data.unwrap_or_default();
        match self.kind.as_str() {
            "image" => Some(ContentBlock::image(name, data)),
            "geojson" => Some(ContentBlock::geojson(name, data)),
            "html" | "zip" => Some(ContentBlock::html(name, data)),
            _ => None,
        }
    }
}
