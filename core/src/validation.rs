//! Field checks run before any write reaches the network.
//!
//! Rules are checked in a fixed order and the first failure wins, so the
//! user always sees a single cause.

use url::Url;

use crate::error::ValidationError;
use crate::types::{Candidate, ItemDraft, Size};

const MIN_NAME_CHARS: usize = 2;
const MIN_DESCRIPTION_CHARS: usize = 5;

/// Check `candidate` against the field rules. `None` means it is valid.
pub fn validate(candidate: &Candidate) -> Option<ValidationError> {
    if candidate.name.chars().count() < MIN_NAME_CHARS {
        return Some(ValidationError::NameTooShort);
    }
    if candidate.description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Some(ValidationError::DescriptionTooShort);
    }
    if candidate.size.parse::<Size>().is_err() {
        return Some(ValidationError::MissingSize);
    }
    match candidate.price {
        Some(price) if price.is_finite() && price >= 0.0 => {}
        _ => return Some(ValidationError::InvalidPrice),
    }
    if let Some(image) = candidate.image.as_deref() {
        if !image.is_empty() && !is_http_url(image) {
            return Some(ValidationError::InvalidImageUrl);
        }
    }
    None
}

/// Absolute URL with an `http` or `https` scheme.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

impl Candidate {
    /// Validate and convert into a write payload.
    pub fn into_draft(self) -> Result<ItemDraft, ValidationError> {
        if let Some(err) = validate(&self) {
            return Err(err);
        }
        let size = self
            .size
            .parse::<Size>()
            .map_err(|_| ValidationError::MissingSize)?;
        let price = self.price.ok_or(ValidationError::InvalidPrice)?;
        Ok(ItemDraft {
            name: self.name,
            description: self.description,
            size,
            price,
            image: self.image.filter(|image| !image.is_empty()),
        })
    }
}
