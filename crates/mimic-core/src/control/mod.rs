//! 控制模块
//!
//! - `PidController` - 标量 PID 力控制器
//! - `TrackingController` - 每步跟踪控制律（直驱 / 力控）

pub mod pid;
pub mod tracker;

// 重新导出常用类型
pub use pid::PidController;
pub use tracker::{ActuationMode, Command, TrackingController};
