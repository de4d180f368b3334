//! sentcloud - Multilingual sentence clouds
//!
//! Weighted sentences in any mix of scripts are packed onto a canvas, larger
//! for heavier weights, each set in a font that covers its script.
//!
//! ```no_run
//! use sentcloud::{CloudConfig, Fragment, SentenceCloud};
//!
//! let cloud = SentenceCloud::new(CloudConfig::default())?;
//! let png = cloud.render_png(&[
//!     Fragment::new("You are amazing!", 3),
//!     Fragment::new("Eres increíble!", 1),
//! ])?;
//! # Ok::<(), sentcloud::CloudError>(())
//! ```

pub mod cloud;
pub mod config;
pub mod sentences;

pub use cloud::{CloudOutput, SentenceCloud};
pub use config::CloudConfig;

pub use sentcloud_layout::{
    Color, ColorScheme, Fragment, Layout, LayoutConfig, LayoutError, LayoutRecord, Mask,
    Orientation, SkipReason,
};
pub use sentcloud_render::{CanvasConfig, RenderError, RenderReport};
pub use sentcloud_text::{FontSource, FontTable, ScriptTag};

/// Cloud error types
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    #[error("No sentences to render")]
    EmptyInput,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Layout failed: {0}")]
    Layout(#[source] LayoutError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Whether the caller supplied bad input, as opposed to a failure while
    /// rendering it
    pub fn is_client_error(&self) -> bool {
        matches!(self, CloudError::EmptyInput | CloudError::InvalidConfig(_))
    }
}

impl From<LayoutError> for CloudError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::EmptyInput => CloudError::EmptyInput,
            other => CloudError::Layout(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
