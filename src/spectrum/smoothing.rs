//! Per-bin exponential moving average carried across frames.

use crate::error::ConfigError;

/// One EMA per bin, held in pixels and kept within [0, ceiling]
#[derive(Debug, Clone)]
pub struct TemporalSmoother {
    values: Vec<f32>,
    alpha: f32,
}

impl TemporalSmoother {
    /// `alpha` is the weight of the newest frame, in (0, 1]
    pub fn new(bins: usize, alpha: f32) -> Result<Self, ConfigError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ConfigError::InvalidSmoothing(alpha));
        }
        Ok(Self {
            values: vec![0.0; bins],
            alpha,
        })
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Blend one frame of target heights into the running averages.
    ///
    /// NaN targets leave their bin untouched; everything else is clamped to
    /// [0, ceiling] before blending. Extra targets beyond the bin count are ignored.
    pub fn update(&mut self, targets: &[f32], ceiling: f32) -> &[f32] {
        let ceiling = ceiling.max(0.0);

        for (value, &target) in self.values.iter_mut().zip(targets) {
            if target.is_nan() {
                continue;
            }
            let target = target.clamp(0.0, ceiling);
            let next = self.alpha * target + (1.0 - self.alpha) * *value;
            *value = next.clamp(0.0, ceiling);
        }

        &self.values
    }

    /// Rescale history after the viewport height changed
    pub fn rescale(&mut self, old_height: f32, new_height: f32) {
        if old_height <= 0.0 || !old_height.is_finite() || !new_height.is_finite() {
            self.values.fill(0.0);
            return;
        }
        let ratio = new_height.max(0.0) / old_height;
        for value in &mut self.values {
            *value = (*value * ratio).clamp(0.0, new_height.max(0.0));
        }
    }
}
