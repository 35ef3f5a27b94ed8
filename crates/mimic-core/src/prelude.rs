//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use mimic_core::prelude::*;
//! ```

// 插件与控制律
pub use crate::control::{ActuationMode, Command, PidController, TrackingController};
pub use crate::plugin::MimicJointPlugin;

// 配置与参数
pub use crate::config::{MimicConfig, MimicDescription, ParameterTable};
pub use crate::params::{ParameterSet, PidGains};

// 宿主接口（常用 Trait）
pub use crate::host::{Actuator, AngleSource, HostRuntime, Model, ParameterServer};

// 单位
pub use crate::types::{NewtonMeter, Rad};

// 错误类型
pub use crate::error::{ConfigError, LoadError};
