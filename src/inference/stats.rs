//! Per-channel image statistics and solid colour tests

use super::frame::ImageView;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageStats {
    /// Mean of R, G, B
    pub average: [f64; 3],
    /// Population standard deviation of R, G, B
    pub stddev: [f64; 3],
    pub count: u64,
}

impl ImageStats {
    pub fn average_sum(&self) -> f64 {
        self.average.iter().sum()
    }

    pub fn stddev_sum(&self) -> f64 {
        self.stddev.iter().sum()
    }
}

pub fn image_stats(view: &ImageView<'_>) -> ImageStats {
    let mut sum = [0.0f64; 3];
    let mut sum_sq = [0.0f64; 3];
    for y in 0..view.height() {
        for x in 0..view.width() {
            let p = view.pixel(x, y).0;
            for c in 0..3 {
                let v = p[c] as f64;
                sum[c] += v;
                sum_sq[c] += v * v;
            }
        }
    }

    let count = view.width() as u64 * view.height() as u64;
    let n = count.max(1) as f64;
    let mut average = [0.0; 3];
    let mut stddev = [0.0; 3];
    for c in 0..3 {
        average[c] = sum[c] / n;
        stddev[c] = (sum_sq[c] / n - average[c] * average[c]).max(0.0).sqrt();
    }

    ImageStats {
        average,
        stddev,
        count,
    }
}

pub const WHITE_MIN_RGB_SUM: f64 = 500.0;
pub const WHITE_MAX_STDDEV_SUM: f64 = 10.0;

/// Bright and uniform: a solid white (or near-white) patch.
pub fn is_white(stats: &ImageStats) -> bool {
    is_white_with(stats, WHITE_MIN_RGB_SUM, WHITE_MAX_STDDEV_SUM)
}

pub fn is_white_with(stats: &ImageStats, min_rgb_sum: f64, max_stddev_sum: f64) -> bool {
    stats.count > 0 && stats.average_sum() >= min_rgb_sum && stats.stddev_sum() <= max_stddev_sum
}
