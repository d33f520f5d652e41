//! Running statistics and least-squares regression
//!
//! Six running sums are kept across lines until an all-clear. Points are
//! only ever added; derived values (means, sample standard deviations, the
//! regression line y = ax + b and its correlation coefficient) are computed
//! on demand from the sums.

/// Accumulated sums over (x, y) points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_xx: f64,
    pub sum_yy: f64,
    pub sum_xy: f64,
    /// Point count, kept as a double like the sums
    pub n: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add one (x, y) point
    pub fn add_point(&mut self, x: f64, y: f64) {
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_yy += y * y;
        self.sum_xy += x * y;
        self.n += 1.0;
    }

    /// Add `y` against the implicit x sequence 0, 1, 2, ... which continues
    /// from the current point count
    pub fn add_single(&mut self, y: f64) {
        self.add_point(self.n, y);
    }

    pub fn mean_x(&self) -> Option<f64> {
        (self.n > 0.0).then(|| self.sum_x / self.n)
    }

    pub fn mean_y(&self) -> Option<f64> {
        (self.n > 0.0).then(|| self.sum_y / self.n)
    }

    /// Sample standard deviation of x; 0 with fewer than two points
    pub fn stddev_x(&self) -> f64 {
        sample_stddev_from_sums(self.sum_x, self.sum_xx, self.n)
    }

    /// Sample standard deviation of y; 0 with fewer than two points
    pub fn stddev_y(&self) -> f64 {
        sample_stddev_from_sums(self.sum_y, self.sum_yy, self.n)
    }

    fn denominator_x(&self) -> f64 {
        self.n * self.sum_xx - self.sum_x * self.sum_x
    }

    /// Slope `a` of the least-squares line y = ax + b
    pub fn slope(&self) -> f64 {
        let denom = self.denominator_x();
        if denom == 0.0 {
            return 0.0;
        }
        (self.n * self.sum_xy - self.sum_x * self.sum_y) / denom
    }

    /// Intercept `b` of the least-squares line y = ax + b
    pub fn intercept(&self) -> f64 {
        let denom = self.denominator_x();
        if denom == 0.0 {
            return 0.0;
        }
        (self.sum_xx * self.sum_y - self.sum_x * self.sum_xy) / denom
    }

    /// Correlation coefficient `r`; 0 when either variable has no spread
    pub fn correlation(&self) -> f64 {
        let denom =
            self.denominator_x() * (self.n * self.sum_yy - self.sum_y * self.sum_y);
        if denom <= 0.0 {
            return 0.0;
        }
        (self.n * self.sum_xy - self.sum_x * self.sum_y) / denom.sqrt()
    }
}

/// sqrt((Σx² − 2·mean·Σx + n·mean²) / (n − 1)), or 0 when n < 2
fn sample_stddev_from_sums(sum: f64, sum_sq: f64, n: f64) -> f64 {
    if n < 2.0 {
        return 0.0;
    }
    let mean = sum / n;
    ((sum_sq - 2.0 * mean * sum + n * mean * mean) / (n - 1.0)).sqrt()
}

/// Arithmetic mean of `values`, None when empty
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation of `values`; 0 with fewer than two
pub fn sample_stddev(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    let sum_sq: f64 = values.iter().map(|v| v * v).sum();
    sample_stddev_from_sums(sum, sum_sq, values.len() as f64)
}
