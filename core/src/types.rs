//! Domain DTOs for the clothing-item collection.
//!
//! # Design
//! Wire field names follow the backend collection (`nome`, `descricao`,
//! `tamanho`, `preco`, `imagem`); Rust field names are English. Read models
//! are lenient about missing optional fields because the backend is trusted
//! for reads, while `ItemDraft` only exists after validation passed.
//!
//! `ItemId` is opaque. It keeps whatever JSON form the backend assigned
//! (number or string) so a replace payload always echoes the id exactly as
//! the target resource holds it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use tracing::{debug, warn};

/// Server-assigned identifier of a clothing item.
///
/// Numeric ids keep their JSON number as sent, so negative or fractional ids
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(Number),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl ItemId {
    /// Equal, or spelled the same once printed. Ids read back from a URL or a
    /// `data-id` attribute are always text, even when the backend uses
    /// numbers.
    pub fn same_as(&self, other: &ItemId) -> bool {
        self == other || self.to_string() == other.to_string()
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId::Number(n.into())
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n.into())
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

/// Apparel sizes offered by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "PP")]
    ExtraSmall,
    #[serde(rename = "P")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "G")]
    Large,
    #[serde(rename = "GG")]
    ExtraLarge,
    #[serde(rename = "XG")]
    DoubleExtraLarge,
}

impl Size {
    pub const ALL: [Size; 6] = [
        Size::ExtraSmall,
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::ExtraLarge,
        Size::DoubleExtraLarge,
    ];

    /// Label used on the wire and in the size selector.
    pub fn as_str(self) -> &'static str {
        match self {
            Size::ExtraSmall => "PP",
            Size::Small => "P",
            Size::Medium => "M",
            Size::Large => "G",
            Size::ExtraLarge => "GG",
            Size::DoubleExtraLarge => "XG",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the catalogue sizes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown size {0:?}")]
pub struct UnknownSize(pub String);

impl FromStr for Size {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| UnknownSize(s.to_string()))
    }
}

/// A size as the backend holds it: a catalogue size, or any other label a
/// different client stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum SizeLabel {
    Known(Size),
    Other(String),
}

impl SizeLabel {
    pub fn as_str(&self) -> &str {
        match self {
            SizeLabel::Known(size) => size.as_str(),
            SizeLabel::Other(label) => label,
        }
    }

    /// The catalogue size, if this label names one.
    pub fn known(&self) -> Option<Size> {
        match self {
            SizeLabel::Known(size) => Some(*size),
            SizeLabel::Other(_) => None,
        }
    }
}

impl From<Size> for SizeLabel {
    fn from(size: Size) -> Self {
        SizeLabel::Known(size)
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clothing item as stored by the backend.
///
/// Reads never fail on a single odd field: an unrecognised size is kept as
/// [`SizeLabel::Other`] and a price that is not a number is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: ItemId,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "tamanho", default, deserialize_with = "lenient_size")]
    pub size: Option<SizeLabel>,
    #[serde(rename = "preco", default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
}

fn lenient_size<'de, D>(deserializer: D) -> Result<Option<SizeLabel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    let label = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            warn!(value = %other, "ignoring non-text size");
            return Ok(None);
        }
    };
    if label.is_empty() {
        return Ok(None);
    }
    Ok(Some(match label.parse::<Size>() {
        Ok(size) => SizeLabel::Known(size),
        Err(_) => {
            debug!(size = %label, "size outside the catalogue");
            SizeLabel::Other(label)
        }
    }))
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(other) => {
            let price = other
                .as_str()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|p| p.is_finite());
            if price.is_none() {
                warn!(value = %other, "ignoring unreadable price");
            }
            Ok(price)
        }
    }
}

/// A validated write payload. Carries no id; the backend assigns one on
/// create and the path names it on replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tamanho")]
    pub size: Size,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
}

impl ItemDraft {
    /// The record the backend should hold after storing this draft under `id`.
    pub fn into_item(self, id: ItemId) -> ClothingItem {
        ClothingItem {
            id,
            name: Some(self.name),
            description: Some(self.description),
            size: Some(self.size.into()),
            price: Some(self.price),
            image: self.image,
        }
    }
}

/// Body of a full-record replace: the draft plus the target's own id.
#[derive(Debug, Serialize)]
pub(crate) struct Replacement<'a> {
    pub id: &'a ItemId,
    #[serde(flatten)]
    pub draft: &'a ItemDraft,
}

/// Raw form inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub size: String,
    pub price: String,
    pub image: String,
}

impl ItemForm {
    /// Form values for editing an existing record.
    pub fn from_item(item: &ClothingItem) -> Self {
        Self {
            name: item.name.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
            size: item.size.as_ref().map(|s| s.as_str().to_string()).unwrap_or_default(),
            price: item.price.map(|p| p.to_string()).unwrap_or_default(),
            image: item.image.clone().unwrap_or_default(),
        }
    }

    /// Trim the text inputs and coerce the price.
    ///
    /// An empty price stays absent instead of becoming zero, so validation
    /// rejects it. Unparsable input is also absent.
    pub fn collect(&self) -> Candidate {
        let price = self.price.trim();
        let image = self.image.trim();
        Candidate {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            size: self.size.trim().to_string(),
            price: if price.is_empty() {
                None
            } else {
                price.parse::<f64>().ok()
            },
            image: (!image.is_empty()).then(|| image.to_string()),
        }
    }
}

/// A collected, not yet validated, record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub description: String,
    pub size: String,
    pub price: Option<f64>,
    pub image: Option<String>,
}
