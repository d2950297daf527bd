use std::collections::HashMap;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::{
    assets::decode::{PreparedImage, decode_image},
    foundation::error::{FamtreeError, FamtreeResult},
    plan::builder::DrawingPlan,
};

/// Decode a photo reference.
///
/// `data:image/<fmt>;base64,<payload>` references are decoded; any other reference is not
/// something we can resolve and yields `Ok(None)`.
pub fn decode_photo(reference: &str) -> FamtreeResult<Option<PreparedImage>> {
    let Some(rest) = reference.trim().strip_prefix("data:") else {
        return Ok(None);
    };
    let Some((header, payload)) = rest.split_once(',') else {
        return Err(FamtreeError::asset("photo data url has no payload"));
    };
    if !header.starts_with("image/") || !header.ends_with(";base64") {
        return Err(FamtreeError::asset(format!(
            "unsupported photo data url header '{header}'"
        )));
    }

    // Payloads pasted from editors often carry line breaks.
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64_STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| FamtreeError::asset(format!("decode base64 photo payload: {e}")))?;
    decode_image(&bytes).map(Some)
}

/// Photos decoded once per distinct reference.
#[derive(Clone, Debug, Default)]
pub struct PhotoStore {
    images: HashMap<String, PreparedImage>,
}

impl PhotoStore {
    /// Decode every photo referenced by `plan`. Failures are logged and the photo is left out.
    pub fn prepare(plan: &DrawingPlan) -> Self {
        let mut store = Self::default();
        for node in &plan.nodes {
            let Some(reference) = node.photo.as_deref() else {
                continue;
            };
            if store.images.contains_key(reference) {
                continue;
            }
            match decode_photo(reference) {
                Ok(Some(img)) => {
                    store.images.insert(reference.to_string(), img);
                }
                Ok(None) => {
                    tracing::debug!(id = %node.id, "photo reference is not a data url, skipping");
                }
                Err(err) => {
                    tracing::warn!(id = %node.id, %err, "failed to decode photo, skipping");
                }
            }
        }
        store
    }

    /// Register a decoded image under `reference`.
    pub fn insert(&mut self, reference: impl Into<String>, image: PreparedImage) {
        self.images.insert(reference.into(), image);
    }

    /// Decoded image for a photo reference, if it was prepared.
    pub fn get(&self, reference: &str) -> Option<&PreparedImage> {
        self.images.get(reference)
    }

    /// Number of distinct decoded references.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when nothing was decoded.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/photo.rs"]
mod tests;
