//! Errors raised while setting up the scene.

use thiserror::Error;

/// An error raised while building or driving the diamond sphere scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The imported model has no mesh whose name contains the cell filter.
    #[error("the imported model has no mesh whose name contains {filter:?}")]
    NoCellMeshes {
        /// The name fragment identifying cell meshes.
        filter: String,
    },
    /// A camera preset index is out of range.
    #[error("unknown camera preset {0}")]
    UnknownCameraPreset(usize),
    /// The configured frame rate is 0.
    #[error("the frame rate cannot be 0")]
    ZeroFrameRate,
}
