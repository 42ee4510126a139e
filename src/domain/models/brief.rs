//! Campaign brief and generated-content records.
//!
//! All wire-facing structs serialize in camelCase to match the generation
//! services and the persisted session layout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured campaign brief produced by the brief-parsing service.
///
/// Created once parsing succeeds; replaced wholesale, never partially
/// overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefData {
    pub title: String,
    pub objective: String,
    pub audience: String,
    #[serde(default)]
    pub key_messages: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
}

/// A raw uploaded brief document, prior to parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefDocument {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl BriefDocument {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// An AI-proposed strategic angle for campaign messaging.
///
/// After generation, `selected` is the only field the user may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motivation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub score: f64,
    #[serde(default)]
    pub selected: bool,
}

/// A platform-specific text draft derived from selected motivations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyVariation {
    pub id: String,
    pub text: String,
    pub platform: String,
    #[serde(default)]
    pub selected: bool,
}

/// Reference to an entry in the external asset library.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a render template.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateRef(pub String);

impl TemplateRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
