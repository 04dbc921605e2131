//! The values a customer fills in for one card, and the request that carries them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Identifier of a catalog template.
///
/// The identifier is opaque to the composition engine; it deserializes from
/// either a JSON string or a JSON number.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TemplateId(Arc<str>);

impl TemplateId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank identifier carries no template and is treated like a missing one.
    /// Catalog ids start at 1, so `0` is blank too.
    pub fn is_blank(&self) -> bool {
        let id = self.0.trim();
        id.is_empty() || id == "0"
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<u32> for TemplateId {
    fn from(n: u32) -> Self {
        Self(n.to_string().into())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TemplateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IdDef {
            Num(u64),
            Str(String),
        }

        Ok(match IdDef::deserialize(deserializer)? {
            IdDef::Num(n) => TemplateId(n.to_string().into()),
            IdDef::Str(s) => TemplateId(s.into()),
        })
    }
}

/// A logo as it arrives from the UI layer.
#[derive(Clone, Default, PartialEq)]
pub enum LogoAsset {
    /// A self-describing `data:` URL.
    InlineDataUrl(String),
    /// Raw bytes already in memory, with the mime type the uploader declared.
    RawBytesWithMimeHint {
        bytes: Vec<u8>,
        mime_hint: Option<String>,
    },
    /// A raw upload that still has to be read from an upload store.
    UploadedFile {
        key: PathBuf,
        mime_hint: Option<String>,
    },
    #[default]
    Absent,
}

impl LogoAsset {
    pub fn is_absent(&self) -> bool {
        matches!(self, LogoAsset::Absent)
    }
}

// Payloads are elided; a data URL can be megabytes long.
impl fmt::Debug for LogoAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoAsset::InlineDataUrl(url) => f
                .debug_struct("InlineDataUrl")
                .field("len", &url.len())
                .finish(),
            LogoAsset::RawBytesWithMimeHint { bytes, mime_hint } => f
                .debug_struct("RawBytesWithMimeHint")
                .field("len", &bytes.len())
                .field("mime_hint", mime_hint)
                .finish(),
            LogoAsset::UploadedFile { key, mime_hint } => f
                .debug_struct("UploadedFile")
                .field("key", key)
                .field("mime_hint", mime_hint)
                .finish(),
            LogoAsset::Absent => f.write_str("Absent"),
        }
    }
}

impl<'de> Deserialize<'de> for LogoAsset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LogoDef {
            DataUrl(String),
            Upload {
                path: PathBuf,
                #[serde(default)]
                mime: Option<String>,
            },
        }

        Ok(match Option::<LogoDef>::deserialize(deserializer)? {
            None => LogoAsset::Absent,
            Some(LogoDef::DataUrl(url)) => LogoAsset::InlineDataUrl(url),
            Some(LogoDef::Upload { path, mime }) => LogoAsset::UploadedFile {
                key: path,
                mime_hint: mime,
            },
        })
    }
}

/// Display strings for one card. No validation happens at this level.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardFieldValues {
    pub name: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo: LogoAsset,
}

impl CardFieldValues {
    /// Names of the fields that carry a value, for diagnostics that must not
    /// leak the values themselves.
    pub fn populated_field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for (name, value) in [
            ("name", &self.name),
            ("title", &self.title),
            ("phone", &self.phone),
            ("email", &self.email),
        ] {
            if value.is_some() {
                names.push(name);
            }
        }
        if !self.logo.is_absent() {
            names.push("logo");
        }
        names
    }
}

/// What the UI layer hands over when the customer asks for a printable card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardRequest {
    #[serde(alias = "formData")]
    pub fields: Option<CardFieldValues>,
    pub template_id: Option<TemplateId>,
}

impl CardRequest {
    pub fn new(fields: CardFieldValues, template_id: impl Into<TemplateId>) -> Self {
        Self {
            fields: Some(fields),
            template_id: Some(template_id.into()),
        }
    }
}
