//! Bloom, anti-aliasing and multisampling settings of the default rendering pipeline.

/// The default rendering pipeline, applied to every camera of the scene.
///
/// # Example
/// ```
/// # use diamond_sphere::post_processing::BloomPipeline;
/// let pipeline = BloomPipeline::default().with_bloom_weight(0.5);
/// assert!(pipeline.bloom_enabled);
/// assert_eq!(pipeline.bloom_weight, 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BloomPipeline {
    /// Whether high dynamic range buffers are used.
    pub hdr: bool,
    /// Whether bloom is applied.
    pub bloom_enabled: bool,
    /// Luminance above which pixels bloom.
    pub bloom_threshold: f32,
    /// Strength of the bloom added back onto the image.
    pub bloom_weight: f32,
    /// Size of the bloom blur kernel, in pixels.
    pub bloom_kernel: u32,
    /// Resolution of the bloom buffers relative to the screen.
    pub bloom_scale: f32,
    /// Whether tone mapping/color grading is applied.
    pub image_processing_enabled: bool,
    /// Whether FXAA anti-aliasing is applied.
    pub fxaa_enabled: bool,
    /// MSAA sample count.
    pub samples: u32,
}

impl Default for BloomPipeline {
    fn default() -> Self {
        BloomPipeline {
            hdr: true,
            bloom_enabled: true,
            bloom_threshold: 0.2,
            bloom_weight: 0.01,
            bloom_kernel: 4,
            bloom_scale: 0.05,
            image_processing_enabled: false,
            fxaa_enabled: true,
            samples: 2,
        }
    }
}

impl BloomPipeline {
    /// Sets the bloom threshold.
    pub fn with_bloom_threshold(mut self, threshold: f32) -> Self {
        self.bloom_threshold = threshold;
        self
    }

    /// Sets the bloom weight.
    pub fn with_bloom_weight(mut self, weight: f32) -> Self {
        self.bloom_weight = weight;
        self
    }

    /// Sets the MSAA sample count.
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }
}
