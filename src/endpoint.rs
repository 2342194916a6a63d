use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_ICS_URL, DEFAULT_PDF_URL, DEFAULT_PNG_URL, DEFAULT_SVG_URL, ParseError,
    encode::RenderRequest, prelude::*,
};

/// A renderer endpoint; all of them take the same query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    /// One month as a raster image
    #[display(fmt = "png")]
    Png,
    /// One month as a vector image, for thumbnails
    #[display(fmt = "svg")]
    Svg,
    /// The whole plan as a printable document
    #[display(fmt = "pdf")]
    Pdf,
    /// The whole plan as a calendar subscription
    #[display(fmt = "ics")]
    Ics,
}

impl Endpoint {
    pub const ALL: [Self; 4] = [Self::Png, Self::Svg, Self::Pdf, Self::Ics];

    /// Whether the endpoint renders a single month rather than the plan
    pub const fn is_per_month(self) -> bool {
        matches!(self, Self::Png | Self::Svg)
    }
}

impl FromStr for Endpoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|endpoint| endpoint.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::InvalidCode {
                field: "endpoint",
                value: trimmed.to_owned(),
            })
    }
}

/// Base URLs of the renderer endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Endpoints {
    pub png: String,
    pub svg: String,
    pub pdf: String,
    pub ics: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            png: DEFAULT_PNG_URL.to_owned(),
            svg: DEFAULT_SVG_URL.to_owned(),
            pdf: DEFAULT_PDF_URL.to_owned(),
            ics: DEFAULT_ICS_URL.to_owned(),
        }
    }
}

impl Endpoints {
    pub fn base(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Png => &self.png,
            Endpoint::Svg => &self.svg,
            Endpoint::Pdf => &self.pdf,
            Endpoint::Ics => &self.ics,
        }
    }

    /// Full URL of `request` at `endpoint`
    pub fn url(&self, endpoint: Endpoint, request: &RenderRequest) -> String {
        format!("{}?{}", self.base(endpoint), request.to_query())
    }
}
