//! Post-processing effects applied by the renderer after the scene is drawn.

pub use self::bloom::BloomPipeline;
pub use self::sun_rays::{SunRaysConfig, VolumetricLightScattering};

mod bloom;
mod sun_rays;
