//! Wire encodings understood by KIE Server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Header the server reads to pick its marshaller (`X-KIE-ContentType`).
pub const CONTENT_TYPE_HEADER: &str = "x-kie-contenttype";

/// Marshalling format used between client and server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarshallingFormat {
    /// JSON (Jackson on the server side).
    #[default]
    Json,
    /// JAXB annotated XML.
    Jaxb,
    /// XStream XML.
    Xstream,
}

impl MarshallingFormat {
    /// All formats the server understands.
    pub const ALL: [MarshallingFormat; 3] = [Self::Json, Self::Jaxb, Self::Xstream];

    /// Name sent in the content type header.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Jaxb => "JAXB",
            Self::Xstream => "XSTREAM",
        }
    }

    /// Media type for `Accept` and `Content-Type`.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Jaxb | Self::Xstream => "application/xml",
        }
    }

    /// Whether this crate can encode and decode bodies in this format.
    pub fn has_codec(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Formats this crate can actually talk.
    pub fn supported() -> impl Iterator<Item = MarshallingFormat> {
        Self::ALL.into_iter().filter(|f| f.has_codec())
    }
}

impl fmt::Display for MarshallingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for MarshallingFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "JSON" => Ok(Self::Json),
            "JAXB" => Ok(Self::Jaxb),
            "XSTREAM" => Ok(Self::Xstream),
            other => Err(format!(
                "unknown marshalling format '{other}' (expected json, jaxb or xstream)"
            )),
        }
    }
}
