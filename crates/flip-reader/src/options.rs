use crate::types::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rasterization scale over the page's natural point size. 2x balances
/// sharpness against memory.
pub const DEFAULT_SCALE_FACTOR: f32 = 2.0;

/// Fixed duration of a page-turn animation, in milliseconds.
pub const DEFAULT_TRANSITION_MS: u64 = 260;

/// Cover aspect ratio used when the document has no pages to copy it from.
pub const DEFAULT_COVER_ASPECT: f32 = 1.4;

/// Reader configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReaderOptions {
    /// Rasterization scale factor applied to every page
    pub scale_factor: f32,

    /// Page-turn animation duration in milliseconds
    pub transition_ms: u64,

    /// Cover aspect ratio fallback for empty documents
    pub default_cover_aspect: f32,

    /// Opaque asset identifier for the synthetic cover image
    pub cover_asset: String,

    /// Opaque asset identifier for the loading placeholder
    pub loading_asset: String,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            transition_ms: DEFAULT_TRANSITION_MS,
            default_cover_aspect: DEFAULT_COVER_ASPECT,
            cover_asset: "assets/cover.png".to_string(),
            loading_asset: "assets/loading.gif".to_string(),
        }
    }
}

impl ReaderOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_factor > 0.0) {
            return Err(Error::Config(
                "Scale factor must be positive".to_string(),
            ));
        }
        if !(self.default_cover_aspect > 0.0) {
            return Err(Error::Config(
                "Cover aspect ratio must be positive".to_string(),
            ));
        }
        if self.cover_asset.is_empty() {
            return Err(Error::Config("No cover asset specified".to_string()));
        }
        if self.loading_asset.is_empty() {
            return Err(Error::Config("No loading asset specified".to_string()));
        }
        Ok(())
    }
}
