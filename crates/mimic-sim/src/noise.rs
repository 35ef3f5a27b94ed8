//! 角度传感器噪声
//!
//! 均匀分布 `[-amplitude, +amplitude]`，使用固定种子保证仿真可复现。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use tracing::warn;

/// 传感器噪声源
#[derive(Debug)]
pub struct SensorNoise {
    rng: StdRng,
    amplitude: f64,
}

impl SensorNoise {
    /// 最大噪声幅度（半圈）
    pub const MAX_AMPLITUDE: f64 = PI;

    /// 创建噪声源
    ///
    /// `amplitude <= 0` 或非有限时不产生噪声；超过 [`Self::MAX_AMPLITUDE`] 时截断。
    pub fn new(amplitude: f64, seed: u64) -> Self {
        let amplitude = if !amplitude.is_finite() {
            warn!("Sensor noise amplitude {} is not finite, noise disabled", amplitude);
            0.0
        } else if amplitude > Self::MAX_AMPLITUDE {
            warn!(
                "Sensor noise amplitude {} capped to {}",
                amplitude,
                Self::MAX_AMPLITUDE
            );
            Self::MAX_AMPLITUDE
        } else {
            amplitude.max(0.0)
        };
        SensorNoise {
            rng: StdRng::seed_from_u64(seed),
            amplitude,
        }
    }

    /// 无噪声
    pub fn disabled() -> Self {
        Self::new(0.0, 0)
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// 采样一次噪声（rad）
    pub fn sample(&mut self) -> f64 {
        if self.amplitude > 0.0 {
            self.rng.gen_range(-self.amplitude..=self.amplitude)
        } else {
            0.0
        }
    }
}
