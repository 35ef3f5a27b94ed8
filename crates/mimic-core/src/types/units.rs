//! 强类型单位系统
//!
//! 使用 NewType 模式区分角度与力矩，防止把关节角误当作力矩命令下发。
//!
//! # 示例
//!
//! ```rust
//! use mimic_core::types::{NewtonMeter, Rad};
//!
//! let target = Rad(1.0) * 2.0 + Rad(-0.5);
//! assert_eq!(target, Rad(1.5));
//!
//! let effort = NewtonMeter(12.0).clamp(NewtonMeter(-5.0), NewtonMeter(5.0));
//! assert_eq!(effort, NewtonMeter(5.0));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// 弧度（NewType）
///
/// 单自由度转动关节的角度。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rad(pub f64);

impl Rad {
    /// 零弧度常量
    pub const ZERO: Self = Rad(0.0);

    /// 创建新的弧度值
    #[inline]
    pub const fn new(value: f64) -> Self {
        Rad(value)
    }

    /// 获取原始值
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// 取绝对值
    #[inline]
    pub fn abs(self) -> Self {
        Rad(self.0.abs())
    }
}

impl fmt::Display for Rad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

impl Add for Rad {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Rad(self.0 + rhs.0)
    }
}

impl Sub for Rad {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Rad(self.0 - rhs.0)
    }
}

impl Mul<f64> for Rad {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Rad(self.0 * rhs)
    }
}

impl Neg for Rad {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Rad(-self.0)
    }
}

/// 力矩（NewType）
///
/// 单位：N·m。对于移动关节同样用来承载力（N），两者在控制律中没有区别。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeter(pub f64);

impl NewtonMeter {
    /// 零力矩常量
    pub const ZERO: Self = NewtonMeter(0.0);

    /// 无上限（用于未配置力矩上限的关节）
    pub const UNBOUNDED: Self = NewtonMeter(f64::INFINITY);

    /// 创建新的力矩值
    #[inline]
    pub const fn new(value: f64) -> Self {
        NewtonMeter(value)
    }

    /// 获取原始值
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// 取绝对值
    #[inline]
    pub fn abs(self) -> Self {
        NewtonMeter(self.0.abs())
    }

    /// 限制范围
    ///
    /// 调用方保证 `min <= max`。
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        NewtonMeter(self.0.clamp(min.0, max.0))
    }

    /// 对称限幅到 `[-limit, +limit]`
    #[inline]
    pub fn clamp_symmetric(self, limit: Self) -> Self {
        self.clamp(-limit, limit)
    }
}

impl fmt::Display for NewtonMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} N·m", self.0)
    }
}

impl Add for NewtonMeter {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        NewtonMeter(self.0 + rhs.0)
    }
}

impl Neg for NewtonMeter {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        NewtonMeter(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rad_arithmetic() {
        let r = Rad(1.0) * 2.0 + Rad(-0.5);
        assert_eq!(r, Rad(1.5));
        assert_eq!(Rad(1.5) - Rad(2.0), Rad(-0.5));
        assert_eq!(-Rad(0.25), Rad(-0.25));
        assert_eq!(Rad(-3.0).abs(), Rad(3.0));
    }

    #[test]
    fn test_rad_display() {
        assert_eq!(format!("{}", Rad(1.0)), "1.0000 rad");
    }

    #[test]
    fn test_newton_meter_clamp_symmetric() {
        let limit = NewtonMeter(5.0);
        assert_eq!(NewtonMeter(12.0).clamp_symmetric(limit), NewtonMeter(5.0));
        assert_eq!(NewtonMeter(-12.0).clamp_symmetric(limit), NewtonMeter(-5.0));
        assert_eq!(NewtonMeter(1.5).clamp_symmetric(limit), NewtonMeter(1.5));
    }

    #[test]
    fn test_newton_meter_unbounded_passes_through() {
        let huge = NewtonMeter(1e12);
        assert_eq!(huge.clamp_symmetric(NewtonMeter::UNBOUNDED), huge);
    }

    #[test]
    fn test_newton_meter_display() {
        assert_eq!(format!("{}", NewtonMeter(2.5)), "2.500 N·m");
    }
}
