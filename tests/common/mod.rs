use std::path::PathBuf;

use assert_cmd::Command;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = tmp.path().to_path_buf();
        Self { _tmp: tmp, dir }
    }

    pub fn cmd(&self) -> Command {
        Command::cargo_bin("fruitclass").expect("binary built")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// 640x480 color gradient, stands in for a photo.
    pub fn write_color_photo(&self, name: &str) -> PathBuf {
        let image = RgbImage::from_fn(640, 480, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let path = self.path(name);
        image.save(&path).expect("save fixture");
        path
    }

    /// 200x200 black frame with one solid white circle.
    pub fn write_circle_image(&self, name: &str) -> PathBuf {
        let mut image = GrayImage::from_pixel(200, 200, Luma([0u8]));
        draw_filled_circle_mut(&mut image, (100, 100), 60, Luma([255u8]));
        let path = self.path(name);
        image.save(&path).expect("save fixture");
        path
    }

    /// 200x200 uniform gray frame.
    pub fn write_blank_image(&self, name: &str) -> PathBuf {
        let image = GrayImage::from_pixel(200, 200, Luma([128u8]));
        let path = self.path(name);
        image.save(&path).expect("save fixture");
        path
    }
}
