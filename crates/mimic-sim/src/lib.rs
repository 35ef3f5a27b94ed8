//! Mimic Sim - 内存仿真宿主
//!
//! 为 `mimic-core` 的宿主接口提供一个最小实现，用于测试和命令行工具：
//!
//! - `world` - 固定步长的关节世界（实现 `Model`）与运行时
//! - `joint` - 单自由度关节句柄（实现 `AngleSource` + `Actuator`）
//! - `noise` - 可复现的角度传感器噪声
//! - `trajectory` - 主关节激励轨迹
//! - `simulation` - 仿真循环与跟踪质量统计
//!
//! 所有句柄基于 `Rc<RefCell<_>>`，只能在单个线程中使用。
//!
//! # 示例
//!
//! ```rust
//! use mimic_core::config::{MimicConfig, ParameterTable};
//! use mimic_sim::{JointSpec, SimRuntime, SimWorld, Simulation, Trajectory};
//! use std::time::Duration;
//!
//! let mut world = SimWorld::new(Duration::from_millis(1));
//! world.add_joint(JointSpec::new("drive_joint")).unwrap();
//! world.add_joint(JointSpec::new("left_finger")).unwrap();
//!
//! let mut sim = Simulation::new(world, "drive_joint", Trajectory::Constant { position: 0.4 });
//! sim.arm(
//!     &MimicConfig::new("drive_joint", "left_finger").with_multiplier(-1.0),
//!     &mut ParameterTable::new(),
//!     &SimRuntime::ready(),
//! )
//! .unwrap();
//!
//! let report = sim.run(10).unwrap();
//! assert_eq!(report.position_commands, 10);
//! assert!(report.final_error < 1e-12);
//! ```

pub mod joint;
pub mod noise;
pub mod simulation;
pub mod trajectory;
pub mod world;

pub use joint::{ActuationRecord, JointSpec, SimJoint};
pub use noise::SensorNoise;
pub use simulation::{Simulation, StepSample, TrackingReport};
pub use trajectory::Trajectory;
pub use world::{SimError, SimRuntime, SimWorld};
