//! 基础类型
//!
//! - `units` - 强类型单位（`Rad`, `NewtonMeter`）

pub mod units;

pub use units::{NewtonMeter, Rad};
