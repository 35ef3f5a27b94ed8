//! 仿真世界
//!
//! 固定步长的单自由度关节集合，实现 `mimic_core::host::Model`。

use crate::joint::{ActuationRecord, JointSpec, JointState, SimJoint};
use crate::noise::SensorNoise;
use mimic_core::host::{HostRuntime, Model};
use mimic_core::types::Rad;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// 仿真世界错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// 关节重名
    #[error("Duplicate joint name: \"{0}\"")]
    DuplicateJoint(String),

    /// 关节不存在
    #[error("Unknown joint: \"{0}\"")]
    UnknownJoint(String),
}

/// 仿真世界
#[derive(Debug)]
pub struct SimWorld {
    step_size: Duration,
    joints: BTreeMap<String, Rc<RefCell<JointState>>>,
    noise: Rc<RefCell<SensorNoise>>,
    steps: u64,
    record_actuation: bool,
}

impl SimWorld {
    /// 创建空世界
    pub fn new(step_size: Duration) -> Self {
        SimWorld {
            step_size,
            joints: BTreeMap::new(),
            noise: Rc::new(RefCell::new(SensorNoise::disabled())),
            steps: 0,
            record_actuation: false,
        }
    }

    /// 启用角度传感器噪声
    pub fn with_sensor_noise(self, amplitude: f64, seed: u64) -> Self {
        let noise = SensorNoise::new(amplitude, seed);
        if noise.amplitude() > 0.0 {
            debug!("Sensor noise enabled: ±{} rad (seed {})", noise.amplitude(), seed);
        }
        *self.noise.borrow_mut() = noise;
        self
    }

    /// 记录之后添加的关节的每次执行器写入
    ///
    /// 记录随步数线性增长，只用于测试和短时诊断。
    pub fn with_actuation_log(mut self) -> Self {
        self.record_actuation = true;
        self
    }

    /// 添加关节
    pub fn add_joint(&mut self, spec: JointSpec) -> Result<SimJoint, SimError> {
        if self.joints.contains_key(&spec.name) {
            return Err(SimError::DuplicateJoint(spec.name));
        }
        let name = spec.name.clone();
        let state = Rc::new(RefCell::new(JointState::new(spec, self.record_actuation)));
        self.joints.insert(name, state.clone());
        Ok(SimJoint {
            state,
            noise: self.noise.clone(),
        })
    }

    /// 关节名称列表
    pub fn joint_names(&self) -> Vec<String> {
        self.joints.keys().cloned().collect()
    }

    /// 运动学设置关节角度（用于驱动主关节）
    pub fn set_position(&self, name: &str, angle: Rad) -> Result<(), SimError> {
        let state = self
            .joints
            .get(name)
            .ok_or_else(|| SimError::UnknownJoint(name.to_string()))?;
        let mut state = state.borrow_mut();
        state.position = angle.value();
        state.velocity = 0.0;
        Ok(())
    }

    /// 关节真实角度
    pub fn position(&self, name: &str) -> Option<Rad> {
        self.joints.get(name).map(|s| Rad(s.borrow().position))
    }

    /// 关节的执行器写入记录
    ///
    /// 关节不存在时返回 `None`；未启用记录时返回空列表。
    pub fn actuation_log(&self, name: &str) -> Option<Vec<ActuationRecord>> {
        self.joints.get(name).map(|s| s.borrow().actuation_log())
    }

    /// 推进一个固定步长
    pub fn step(&mut self) {
        let dt = self.step_size.as_secs_f64();
        for state in self.joints.values() {
            state.borrow_mut().integrate(dt);
        }
        self.steps += 1;
    }

    /// 已推进的步数
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// 仿真时间
    pub fn sim_time(&self) -> Duration {
        self.step_size
            .saturating_mul(u32::try_from(self.steps).unwrap_or(u32::MAX))
    }

    /// 仿真时间（秒）
    pub fn sim_time_secs(&self) -> f64 {
        self.step_size.as_secs_f64() * self.steps as f64
    }
}

impl Model for SimWorld {
    type Joint = SimJoint;

    fn joint(&self, name: &str) -> Option<SimJoint> {
        let joint = self.joints.get(name).map(|state| SimJoint {
            state: state.clone(),
            noise: self.noise.clone(),
        });
        if joint.is_none() {
            debug!("Joint lookup failed: \"{}\"", name);
        }
        joint
    }

    fn max_step_size(&self) -> Duration {
        self.step_size
    }
}

/// 仿真运行时
#[derive(Debug, Clone, Copy)]
pub struct SimRuntime {
    ready: bool,
}

impl SimRuntime {
    pub fn ready() -> Self {
        SimRuntime { ready: true }
    }

    pub fn not_ready() -> Self {
        SimRuntime { ready: false }
    }
}

impl Default for SimRuntime {
    fn default() -> Self {
        Self::ready()
    }
}

impl HostRuntime for SimRuntime {
    fn is_ready(&self) -> bool {
        self.ready
    }
}
