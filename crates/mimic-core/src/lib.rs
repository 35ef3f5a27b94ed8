//! Mimic Core - 从动关节控制核心
//!
//! 让一个关节（从动关节）在每个仿真步跟随另一个关节（主关节）的
//! 缩放、偏移后的角度，可选通过 PID 力控代替直接位置赋值。
//!
//! # 架构设计
//!
//! - **单位** (`types`): `Rad`, `NewtonMeter`
//! - **配置** (`config`): 声明式插件配置与 `gains.<joint>` 参数空间
//! - **参数集** (`params`): 挂载时解析一次的不可变参数
//! - **控制** (`control`): PID 控制器与每步跟踪控制律
//! - **宿主接口** (`host`): 角度读取、执行器、模型、运行时、参数系统
//! - **插件** (`plugin`): 挂载校验门与 Unarmed/Armed 状态机
//!
//! 控制核心不依赖任何具体仿真器，宿主只需实现 `host` 中的几个 trait。
//!
//! # 快速开始
//!
//! ```rust
//! use mimic_core::prelude::*;
//! use std::time::Duration;
//!
//! let params = ParameterSet::new("drive_joint", "left_finger", NewtonMeter(2.0))
//!     .with_pid(PidGains::default());
//! let mut tracker = TrackingController::new(params);
//!
//! if let Some(Command::Force(effort)) =
//!     tracker.tick(Duration::from_millis(1), Rad(0.3), Rad(0.0))
//! {
//!     assert!(effort.abs() <= NewtonMeter(2.0));
//! }
//! ```

pub mod config;
pub mod control;
pub mod error;
pub mod host;
pub mod params;
pub mod plugin;
pub mod types;

// Prelude 模块
pub mod prelude;

pub use config::{MimicConfig, MimicDescription, ParameterTable};
pub use control::{ActuationMode, Command, PidController, TrackingController};
pub use error::{ConfigError, LoadError};
pub use params::{ParameterSet, PidGains};
pub use plugin::MimicJointPlugin;
pub use types::{NewtonMeter, Rad};
