//! Gradient Hough transform for circles.
//!
//! Edge pixels vote along their gradient direction, in both polarities and
//! across the whole radius range, into an accumulator held at a fraction of
//! the image resolution. Cells that collect enough votes and dominate their
//! neighborhood become circle centers; the radius is recovered afterwards
//! from the distances of the edge pixels supporting each center.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use serde::{Deserialize, Serialize};

/// Tuning parameters of the circle detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoughParams {
    /// Inverse ratio of accumulator resolution to image resolution. A value
    /// of 2 accumulates votes on a half-resolution grid.
    pub accumulator_ratio: u32,
    /// Minimum distance in pixels between centers of reported circles.
    pub min_center_distance: f32,
    /// High threshold of the Canny edge pass. The low threshold is half of it.
    pub edge_threshold: f32,
    /// Minimum number of accumulator votes for a candidate center.
    pub vote_threshold: u32,
    /// Smallest radius considered, in pixels. Zero is treated as 1.
    pub min_radius: u32,
    /// Largest radius considered. Zero means bounded by the image size.
    pub max_radius: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        HoughParams {
            accumulator_ratio: 2,
            min_center_distance: 15.0,
            edge_threshold: 100.0,
            vote_threshold: 70,
            min_radius: 0,
            max_radius: 0,
        }
    }
}

/// A detected circle in image coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    /// Accumulator support of the center cell.
    pub votes: u32,
}

/// An edge pixel with its unit gradient direction.
struct EdgePoint {
    x: u32,
    y: u32,
    dir_x: f32,
    dir_y: f32,
}

pub fn detect_circles(image: &GrayImage, params: &HoughParams) -> Vec<Circle> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let edge_points = collect_edge_points(image, params.edge_threshold);
    if edge_points.is_empty() {
        return Vec::new();
    }

    let ratio = params.accumulator_ratio.max(1);
    let acc_width = (width + ratio - 1) / ratio;
    let acc_height = (height + ratio - 1) / ratio;
    let min_radius = params.min_radius.max(1);
    let max_radius = if params.max_radius == 0 {
        width.max(height)
    } else {
        params.max_radius
    };

    let mut accumulator = vec![0u32; (acc_width * acc_height) as usize];
    for point in &edge_points {
        for polarity in [1.0f32, -1.0] {
            let mut radius = min_radius as f32;
            while radius <= max_radius as f32 {
                let center_x = point.x as f32 + polarity * point.dir_x * radius;
                let center_y = point.y as f32 + polarity * point.dir_y * radius;
                if center_x < 0.0
                    || center_y < 0.0
                    || center_x >= width as f32
                    || center_y >= height as f32
                {
                    // the ray only moves further out from here
                    break;
                }
                let cell_x = center_x as u32 / ratio;
                let cell_y = center_y as u32 / ratio;
                accumulator[(cell_y * acc_width + cell_x) as usize] += 1;
                radius += ratio as f32;
            }
        }
    }

    // candidate centers: cells over the vote threshold that dominate their
    // 4-neighborhood, strongest first
    let mut candidates: Vec<(u32, u32, u32)> = Vec::new();
    for cell_y in 0..acc_height {
        for cell_x in 0..acc_width {
            let votes = accumulator[(cell_y * acc_width + cell_x) as usize];
            if votes < params.vote_threshold {
                continue;
            }
            if !is_local_maximum(&accumulator, acc_width, acc_height, cell_x, cell_y) {
                continue;
            }
            candidates.push((cell_x, cell_y, votes));
        }
    }
    candidates.sort_by(|a, b| b.2.cmp(&a.2));

    let min_dist_sq = params.min_center_distance * params.min_center_distance;
    let mut circles: Vec<Circle> = Vec::new();
    for (cell_x, cell_y, votes) in candidates {
        let center_x = (cell_x * ratio + ratio / 2) as f32;
        let center_y = (cell_y * ratio + ratio / 2) as f32;
        let too_close = circles.iter().any(|c| {
            let dx = c.center_x - center_x;
            let dy = c.center_y - center_y;
            dx * dx + dy * dy < min_dist_sq
        });
        if too_close {
            continue;
        }
        let radius = estimate_radius(
            &edge_points,
            center_x,
            center_y,
            min_radius as f32,
            max_radius as f32,
        );
        circles.push(Circle {
            center_x,
            center_y,
            radius,
            votes,
        });
    }
    circles
}

fn collect_edge_points(image: &GrayImage, edge_threshold: f32) -> Vec<EdgePoint> {
    let edges = canny(image, edge_threshold / 2.0, edge_threshold);
    // orientations come from a smoothed copy so that rasterized edges still
    // point at the center
    let smoothed = gaussian_blur_f32(image, 1.4);
    let grad_x = horizontal_sobel(&smoothed);
    let grad_y = vertical_sobel(&smoothed);

    let mut points = Vec::new();
    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        let dx = grad_x.get_pixel(x, y)[0] as f32;
        let dy = grad_y.get_pixel(x, y)[0] as f32;
        let magnitude = (dx * dx + dy * dy).sqrt();
        if magnitude < 1.0 {
            // no usable orientation for this pixel
            continue;
        }
        points.push(EdgePoint {
            x,
            y,
            dir_x: dx / magnitude,
            dir_y: dy / magnitude,
        });
    }
    points
}

fn is_local_maximum(accumulator: &[u32], width: u32, height: u32, x: u32, y: u32) -> bool {
    let votes = accumulator[(y * width + x) as usize];
    let left = if x > 0 {
        accumulator[(y * width + x - 1) as usize]
    } else {
        0
    };
    let right = if x + 1 < width {
        accumulator[(y * width + x + 1) as usize]
    } else {
        0
    };
    let up = if y > 0 {
        accumulator[((y - 1) * width + x) as usize]
    } else {
        0
    };
    let down = if y + 1 < height {
        accumulator[((y + 1) * width + x) as usize]
    } else {
        0
    };
    // ties break towards the top-left cell of a plateau
    votes > left && votes > up && votes >= right && votes >= down
}

/// Pick the radius with the strongest edge support around a center.
fn estimate_radius(
    edge_points: &[EdgePoint],
    center_x: f32,
    center_y: f32,
    min_radius: f32,
    max_radius: f32,
) -> f32 {
    let bins = (max_radius - min_radius).ceil() as usize + 1;
    let mut histogram = vec![0u32; bins];
    for point in edge_points {
        let dx = point.x as f32 - center_x;
        let dy = point.y as f32 - center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < min_radius || distance > max_radius {
            continue;
        }
        histogram[(distance - min_radius) as usize] += 1;
    }
    let best = histogram
        .iter()
        .enumerate()
        .max_by_key(|(_, count)| **count)
        .map(|(bin, _)| bin)
        .unwrap_or(0);
    min_radius + best as f32 + 0.5
}
