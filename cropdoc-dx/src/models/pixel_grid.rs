//! Decoded pixel grid handed from the preprocessor to feature extraction

/// Channel samples in row-major order, each in [0, 255]
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    Rgb(Vec<[f32; 3]>),
    /// Single luma channel (grayscale source)
    Luma(Vec<f32>),
}

/// Immutable image grid
///
/// Normally 224×224, but any non-empty dimensions are accepted so that
/// feature extraction can be exercised directly.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: PixelData,
}

impl PixelGrid {
    /// Build an RGB grid. Returns `None` when `pixels.len() != width * height`.
    pub fn from_rgb(width: usize, height: usize, pixels: Vec<[f32; 3]>) -> Option<Self> {
        (width * height == pixels.len() && !pixels.is_empty()).then_some(Self {
            width,
            height,
            data: PixelData::Rgb(pixels),
        })
    }

    /// Build a single-channel grid. Returns `None` on a length mismatch.
    pub fn from_luma(width: usize, height: usize, samples: Vec<f32>) -> Option<Self> {
        (width * height == samples.len() && !samples.is_empty()).then_some(Self {
            width,
            height,
            data: PixelData::Luma(samples),
        })
    }

    /// Grid filled with a single color. Returns `None` for empty dimensions.
    pub fn uniform(width: usize, height: usize, rgb: [f32; 3]) -> Option<Self> {
        Self::from_rgb(width, height, vec![rgb; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    pub fn is_grayscale(&self) -> bool {
        matches!(self.data, PixelData::Luma(_))
    }
}
