//! Payload types carried by listener events.

use serde::Serialize;
use std::fmt;
use url::Url;

/// Ordered string parameters attached to an event.
///
/// Insertion order is preserved. Setting an existing key replaces its value
/// in place, so the position of the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value:?}")?;
        }
        f.write_str("}")
    }
}

/// Document and metadata-block properties.
pub type MetaData = Parameters;

/// Heading depth, starting at 1.
///
/// The protocol puts no ceiling on the level; renderers clamp to whatever
/// their target can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HeaderLevel(usize);

impl HeaderLevel {
    pub const TOP: HeaderLevel = HeaderLevel(1);

    /// Returns `None` for level 0.
    pub fn new(level: usize) -> Option<Self> {
        (level >= 1).then_some(Self(level))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Cap this level at `max`, never going below 1.
    pub fn clamp_to(self, max: usize) -> usize {
        self.0.min(max.max(1))
    }
}

impl fmt::Display for HeaderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of list, including the numbering style of ordered lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListType {
    Bulleted,
    Numbered,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

impl ListType {
    /// Map an HTML `ol type` attribute to a list type.
    pub fn from_ordered_type(attr: Option<&str>) -> Self {
        match attr {
            Some("a") => ListType::LowerAlpha,
            Some("A") => ListType::UpperAlpha,
            Some("i") => ListType::LowerRoman,
            Some("I") => ListType::UpperRoman,
            _ => ListType::Numbered,
        }
    }

    pub fn is_ordered(self) -> bool {
        self != ListType::Bulleted
    }
}

/// Inline formatting applied by a format run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    Bold,
    Italic,
    Strikeout,
    Underline,
    Superscript,
    Subscript,
    Monospace,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Bold => "bold",
            Format::Italic => "italic",
            Format::Strikeout => "strikeout",
            Format::Underline => "underline",
            Format::Superscript => "superscript",
            Format::Subscript => "subscript",
            Format::Monospace => "monospace",
        };
        f.write_str(name)
    }
}

/// What a link or image reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Url,
    Mailto,
    Document,
    Attachment,
    Anchor,
    Unknown,
}

/// Target of a link or image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceReference {
    pub reference: String,
    pub kind: ResourceType,
}

impl ResourceReference {
    pub fn new(reference: impl Into<String>, kind: ResourceType) -> Self {
        Self {
            reference: reference.into(),
            kind,
        }
    }

    /// Classify a raw `href`/`src` value.
    ///
    /// Absolute URLs are recognised with the `url` crate; `mailto:` gets its
    /// own kind. Fragments are anchors, paths with a file extension are
    /// attachments, other relative references are documents.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        let kind = if trimmed.is_empty() {
            ResourceType::Unknown
        } else if trimmed.starts_with('#') {
            ResourceType::Anchor
        } else {
            match Url::parse(trimmed) {
                Ok(url) if url.scheme() == "mailto" => ResourceType::Mailto,
                Ok(url) if url.cannot_be_a_base() && url.scheme().len() == 1 => {
                    // Windows drive letters parse as one-letter schemes.
                    ResourceType::Attachment
                }
                Ok(_) => ResourceType::Url,
                Err(_) => {
                    let last_segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
                    if last_segment.contains('.') {
                        ResourceType::Attachment
                    } else {
                        ResourceType::Document
                    }
                }
            }
        };
        Self::new(trimmed, kind)
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}
