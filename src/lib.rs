pub mod classifier;
pub mod hough;
pub mod pipeline;
pub mod storage;
pub mod transformer;

pub use classifier::{classify, classify_file, Classification, Label};
pub use hough::{detect_circles, Circle, HoughParams};
pub use pipeline::{preprocess_file, PreprocessPipeline, TARGET_SIZE};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target dimensions of a resize step.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ImageSize {
    pub width: usize,
    pub height: usize,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read image {}: {source}", .path.display())]
    ReadImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("cannot infer an image format from {}", .path.display())]
    OutputFormat { path: PathBuf },
    #[error("cannot write image {}: {source}", .path.display())]
    WriteImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("cannot serialize result for {}: {source}", .path.display())]
    WriteResult {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot persist {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("transform failed: {0}")]
    Transform(&'static str),
}
