use std::path::Path;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::hough::{detect_circles, HoughParams};
use crate::storage::{load_gray_image, write_json_atomic};
use crate::Error;

/// The two labels the circle-presence heuristic can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Lemon,
    Banana,
}

/// Result record written by the classify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub class: Label,
}

/// Round shapes read as lemons, everything else as bananas.
pub fn classify(image: &GrayImage, params: &HoughParams) -> Label {
    if detect_circles(image, params).is_empty() {
        Label::Banana
    } else {
        Label::Lemon
    }
}

/// Decode `picture` as grayscale, run the detector with its fixed parameters
/// and write the classification JSON to `result`.
pub fn classify_file(picture: &Path, result: &Path) -> Result<Classification, Error> {
    let image = load_gray_image(picture)?;
    let record = Classification {
        class: classify(&image, &HoughParams::default()),
    };
    write_json_atomic(&record, result)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::drawing::draw_filled_circle_mut;

    #[test]
    fn circle_means_lemon() {
        let mut image = GrayImage::from_pixel(200, 200, Luma([0u8]));
        draw_filled_circle_mut(&mut image, (100, 100), 60, Luma([255u8]));
        assert_eq!(classify(&image, &HoughParams::default()), Label::Lemon);
    }

    #[test]
    fn blank_means_banana() {
        let image = GrayImage::from_pixel(200, 200, Luma([128u8]));
        assert_eq!(classify(&image, &HoughParams::default()), Label::Banana);
    }

    #[test]
    fn labels_serialize_lowercase() {
        let lemon = serde_json::to_string(&Classification { class: Label::Lemon }).unwrap();
        let banana = serde_json::to_string(&Classification {
            class: Label::Banana,
        })
        .unwrap();
        assert_eq!(lemon, r#"{"class":"lemon"}"#);
        assert_eq!(banana, r#"{"class":"banana"}"#);
    }
}
