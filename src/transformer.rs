use enum_dispatch::enum_dispatch;
use image::imageops::{resize, FilterType};
use image::{DynamicImage, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::ImageSize;

#[enum_dispatch]
#[derive(Clone, Serialize, Deserialize)]
pub enum ImageTransform {
    ToGrayscale(ToGrayscale),
    ResizeExact(ResizeExact),
}

#[enum_dispatch(ImageTransform)]
pub trait GenericTransform {
    fn transform(&self, input: ImageTransformResult) -> Result<ImageTransformResult, &'static str>;
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "FilterType")]
enum FilterOption {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

/// Collapse a color image to its luminance channel.
#[derive(Clone, Serialize, Deserialize)]
pub struct ToGrayscale {}

impl GenericTransform for ToGrayscale {
    fn transform(&self, input: ImageTransformResult) -> Result<ImageTransformResult, &'static str> {
        match input {
            ImageTransformResult::Color(image) => {
                Ok(DynamicImage::ImageRgb8(image).to_luma8().into())
            }
            // already single channel, nothing to collapse
            ImageTransformResult::Gray(image) => Ok(image.into()),
        }
    }
}

/// Resize to fixed target dimensions. The source aspect ratio is not
/// preserved.
#[derive(Clone, Serialize, Deserialize)]
pub struct ResizeExact {
    pub image_size: ImageSize,
    #[serde(with = "FilterOption")]
    pub filter: FilterType,
}

impl GenericTransform for ResizeExact {
    fn transform(&self, input: ImageTransformResult) -> Result<ImageTransformResult, &'static str> {
        match input {
            ImageTransformResult::Gray(image) => Ok(resize(
                &image,
                self.image_size.width as u32,
                self.image_size.height as u32,
                self.filter,
            )
            .into()),
            ImageTransformResult::Color(_) => Err("resize not implemented for color input"),
        }
    }
}

pub enum ImageTransformResult {
    Color(RgbImage),
    Gray(GrayImage),
}

impl From<RgbImage> for ImageTransformResult {
    fn from(image: RgbImage) -> Self {
        ImageTransformResult::Color(image)
    }
}

impl From<GrayImage> for ImageTransformResult {
    fn from(image: GrayImage) -> Self {
        ImageTransformResult::Gray(image)
    }
}
