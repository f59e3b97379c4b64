//! Shadow map configuration.

use crate::scene::SceneNode3d;

/// The filtering technique applied to the shadow map.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShadowFilter {
    /// No filtering: hard, aliased shadows.
    #[default]
    None,
    /// Poisson disk sampling.
    Poisson,
    /// Percentage closer filtering.
    PercentageCloser,
    /// Percentage closer soft shadows: penumbra grows with the occluder distance.
    ContactHardening,
}

/// Quality of the shadow filtering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilteringQuality {
    /// Fewest samples.
    Low,
    /// Balanced.
    #[default]
    Medium,
    /// Most samples.
    High,
}

/// Parameters of the shadow generator of a directional light.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowConfig {
    /// Width and height of the shadow map, in pixels.
    pub map_size: u32,
    /// The filtering technique. Only one technique is active at a time.
    pub filter: ShadowFilter,
    /// Whether the shadow map is blurred with a kernel instead of a box filter.
    pub use_kernel_blur: bool,
    /// Size of the blur kernel.
    pub blur_kernel: u32,
    /// Light size, relative to the shadow map, used by contact hardening.
    pub contact_hardening_light_size_uv_ratio: f32,
    /// Quality of the filtering.
    pub filtering_quality: FilteringQuality,
    /// Near plane of the light frustum used to render the shadow map.
    pub min_z: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        ShadowConfig {
            map_size: 2048,
            filter: ShadowFilter::ContactHardening,
            use_kernel_blur: true,
            blur_kernel: 64,
            contact_hardening_light_size_uv_ratio: 0.3,
            filtering_quality: FilteringQuality::High,
            min_z: 10.0,
        }
    }
}

impl ShadowConfig {
    /// Sets the filtering technique.
    pub fn with_filter(mut self, filter: ShadowFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the shadow map size.
    pub fn with_map_size(mut self, map_size: u32) -> Self {
        self.map_size = map_size;
        self
    }
}

/// Renders the shadow map of one light for a list of casters.
#[derive(Clone)]
pub struct ShadowGenerator {
    config: ShadowConfig,
    light: SceneNode3d,
    render_list: Vec<SceneNode3d>,
}

impl ShadowGenerator {
    /// Creates a shadow generator for the light held by `light`.
    pub fn new(config: ShadowConfig, light: SceneNode3d) -> Self {
        ShadowGenerator {
            config,
            light,
            render_list: Vec::new(),
        }
    }

    /// The shadow map parameters.
    pub fn config(&self) -> &ShadowConfig {
        &self.config
    }

    /// The node holding the light casting the shadows.
    pub fn light(&self) -> &SceneNode3d {
        &self.light
    }

    /// Adds a shadow caster.
    pub fn add_caster(&mut self, node: SceneNode3d) {
        if !self.render_list.iter().any(|n| n.ptr_eq(&node)) {
            self.render_list.push(node);
        }
    }

    /// The shadow casters.
    pub fn render_list(&self) -> &[SceneNode3d] {
        &self.render_list
    }
}
