//! 主关节轨迹
//!
//! 仿真中主关节由轨迹运动学驱动，用来激励从动关节。

use mimic_core::types::Rad;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// 主关节轨迹
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trajectory {
    /// 固定角度
    Constant { position: f64 },

    /// 匀速斜坡：`start + rate * t`
    Ramp { start: f64, rate: f64 },

    /// 正弦：`center + amplitude * sin(2π f t)`
    Sine {
        amplitude: f64,
        frequency: f64,
        #[serde(default)]
        center: f64,
    },
}

impl Default for Trajectory {
    fn default() -> Self {
        Trajectory::Constant { position: 0.0 }
    }
}

impl Trajectory {
    /// `t` 秒时的主关节角度
    pub fn position_at(&self, t: f64) -> Rad {
        match *self {
            Trajectory::Constant { position } => Rad(position),
            Trajectory::Ramp { start, rate } => Rad(start + rate * t),
            Trajectory::Sine {
                amplitude,
                frequency,
                center,
            } => Rad(center + amplitude * (TAU * frequency * t).sin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let t = Trajectory::Constant { position: 0.7 };
        assert_eq!(t.position_at(0.0), Rad(0.7));
        assert_eq!(t.position_at(12.0), Rad(0.7));
    }

    #[test]
    fn test_ramp() {
        let t = Trajectory::Ramp {
            start: -0.5,
            rate: 0.25,
        };
        assert_eq!(t.position_at(2.0), Rad(0.0));
    }

    #[test]
    fn test_sine() {
        let t = Trajectory::Sine {
            amplitude: 0.4,
            frequency: 0.5,
            center: 0.1,
        };
        assert!((t.position_at(0.0).0 - 0.1).abs() < 1e-12);
        assert!((t.position_at(0.5).0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_tagged() {
        let t: Trajectory = toml::from_str("kind = \"sine\"\namplitude = 1.0\nfrequency = 2.0").unwrap();
        assert_eq!(
            t,
            Trajectory::Sine {
                amplitude: 1.0,
                frequency: 2.0,
                center: 0.0
            }
        );
    }
}
