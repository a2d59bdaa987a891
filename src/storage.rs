use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, RgbImage};
use serde::Serialize;

use crate::Error;

pub fn load_color_image(path: &Path) -> Result<RgbImage, Error> {
    let image = image::open(path).map_err(|source| Error::ReadImage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgb8())
}

pub fn load_gray_image(path: &Path) -> Result<GrayImage, Error> {
    let image = image::open(path).map_err(|source| Error::ReadImage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_luma8())
}

/// Write `image` to `path` in the format implied by the path extension.
///
/// The encode goes to a sibling temp file which is renamed over the
/// destination, so a failed run never leaves a partial file behind.
pub fn write_image_atomic(image: &GrayImage, path: &Path) -> Result<(), Error> {
    let format = ImageFormat::from_path(path).map_err(|_| Error::OutputFormat {
        path: path.to_path_buf(),
    })?;
    let tmp = sibling_tmp_path(path);
    image.save_with_format(&tmp, format).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        Error::WriteImage {
            path: path.to_path_buf(),
            source,
        }
    })?;
    persist(&tmp, path)
}

/// Serialize `value` as JSON and write it to `path` through a sibling temp
/// file.
pub fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> Result<(), Error> {
    let json = serde_json::to_string(value).map_err(|source| Error::WriteResult {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = sibling_tmp_path(path);
    fs::write(&tmp, json).map_err(|source| Error::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    persist(&tmp, path)
}

fn sibling_tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn persist(tmp: &Path, path: &Path) -> Result<(), Error> {
    fs::rename(tmp, path).map_err(|source| {
        let _ = fs::remove_file(tmp);
        Error::Persist {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use tempfile::TempDir;

    #[test]
    fn image_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let image = GrayImage::from_pixel(10, 10, Luma([42u8]));

        write_image_atomic(&image, &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("out.png.tmp").exists());
        assert_eq!(image::open(&path).unwrap().to_luma8().dimensions(), (10, 10));
    }

    #[test]
    fn unknown_extension_is_rejected_before_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.nonsense");
        let image = GrayImage::from_pixel(10, 10, Luma([42u8]));

        assert!(matches!(
            write_image_atomic(&image, &path),
            Err(Error::OutputFormat { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn json_write_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("result.json");

        write_json_atomic(&serde_json::json!({"class": "lemon"}), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"class":"lemon"}"#);
        assert!(!dir.path().join("result.json.tmp").exists());
    }

    #[test]
    fn missing_input_reports_the_path() {
        let error = load_gray_image(Path::new("/no/such/picture.png")).unwrap_err();
        assert!(error.to_string().contains("picture.png"));
    }
}
