use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output format a pipeline step declares for its own result text.
///
/// Only [`OutputFormat::Map`] and [`OutputFormat::Html`] bias extraction;
/// every other format leaves the result text to speak for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
    Map,
    Html,
    File,
    Email,
    Pdf,
    Csv,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown output format '{0}'")]
pub struct UnknownFormatError(pub String);

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Map => "map",
            Self::Html => "html",
            Self::File => "file",
            Self::Email => "email",
            Self::Pdf => "pdf",
            Self::Csv => "csv",
        }
    }

    /// True for the formats that override block classification.
    pub fn biases_extraction(self) -> bool {
        matches!(self, Self::Map | Self::Html)
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormatError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "map" => Ok(Self::Map),
            "html" => Ok(Self::Html),
            "file" => Ok(Self::File),
            "email" => Ok(Self::Email),
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            _ => Err(UnknownFormatError(raw.trim().to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_declared_format() {
        let names = [
            "text", "markdown", "json", "map", "html", "file", "email", "pdf", "csv",
        ];
        for name in names {
            let format: OutputFormat = name.parse().expect("declared format should parse");
            assert_eq!(format.as_str(), name);
        }
    }

    #[test]
    fn parsing_trims_and_lowercases() {
        assert_eq!(" Map ".parse::<OutputFormat>(), Ok(OutputFormat::Map));
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
    }

    #[test]
    fn unknown_format_reports_original_name() {
        let error = "spreadsheet"
            .parse::<OutputFormat>()
            .expect_err("unknown format should fail");
        assert_eq!(error.to_string(), "unknown output format 'spreadsheet'");
    }

    #[test]
    fn only_map_and_html_bias_extraction() {
        assert!(OutputFormat::Map.biases_extraction());
        assert!(OutputFormat::Html.biases_extraction());
        assert!(!OutputFormat::Markdown.biases_extraction());
        assert!(!OutputFormat::Json.biases_extraction());
    }
}
