use std::path::Path;

use image::imageops::FilterType;
use image::{GrayImage, RgbImage};

use crate::storage::{load_color_image, write_image_atomic};
use crate::transformer::{GenericTransform, ImageTransform, ImageTransformResult};
use crate::transformer::{ResizeExact, ToGrayscale};
use crate::{Error, ImageSize};

/// Fixed output resolution of the preprocess operation.
pub const TARGET_SIZE: ImageSize = ImageSize {
    width: 100,
    height: 100,
};

pub struct PreprocessPipeline {
    steps: Vec<ImageTransform>,
}

impl PreprocessPipeline {
    pub fn new(image_size: ImageSize) -> Self {
        PreprocessPipeline {
            steps: vec![
                ToGrayscale {}.into(),
                ResizeExact {
                    image_size,
                    filter: FilterType::Triangle,
                }
                .into(),
            ],
        }
    }

    pub fn transform_image(&self, image: RgbImage) -> Result<GrayImage, Error> {
        let mut result = ImageTransformResult::Color(image);

        for step in &self.steps {
            result = step.transform(result).map_err(Error::Transform)?;
        }

        match result {
            ImageTransformResult::Gray(image) => Ok(image),
            ImageTransformResult::Color(_) => {
                Err(Error::Transform("pipeline ended on a color image"))
            }
        }
    }
}

/// Decode `input`, run the grayscale and resize steps and write the result
/// to `output` in the format implied by its extension.
pub fn preprocess_file(input: &Path, output: &Path) -> Result<(), Error> {
    let image = load_color_image(input)?;
    let pipeline = PreprocessPipeline::new(TARGET_SIZE);
    let preprocessed = pipeline.transform_image(image)?;
    write_image_atomic(&preprocessed, output)
}
