//! 仿真关节
//!
//! 单自由度转动关节，状态由世界和句柄共享（`Rc<RefCell<_>>`），
//! 与宿主的单线程仿真循环一致。

use crate::noise::SensorNoise;
use mimic_core::host::{Actuator, AngleSource};
use mimic_core::types::{NewtonMeter, Rad};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// 关节描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    /// 关节名称
    pub name: String,

    /// 力矩限制（N·m），非正表示无限制
    #[serde(default = "default_effort_limit")]
    pub effort_limit: f64,

    /// 转动惯量（kg·m²）
    #[serde(default = "default_inertia")]
    pub inertia: f64,

    /// 粘性阻尼（N·m·s/rad）
    #[serde(default)]
    pub damping: f64,

    /// 初始角度（rad）
    #[serde(default)]
    pub initial_position: f64,
}

fn default_effort_limit() -> f64 {
    10.0
}

fn default_inertia() -> f64 {
    0.01
}

impl JointSpec {
    /// 使用默认动力学参数创建关节描述
    pub fn new(name: impl Into<String>) -> Self {
        JointSpec {
            name: name.into(),
            effort_limit: default_effort_limit(),
            inertia: default_inertia(),
            damping: 0.0,
            initial_position: 0.0,
        }
    }

    pub fn with_effort_limit(mut self, effort_limit: f64) -> Self {
        self.effort_limit = effort_limit;
        self
    }

    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_initial_position(mut self, position: f64) -> Self {
        self.initial_position = position;
        self
    }
}

/// 执行器写入记录
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuationRecord {
    Force(NewtonMeter),
    Position { angle: Rad, bypass_limits: bool },
    MaxForce(NewtonMeter),
}

/// 关节内部状态
#[derive(Debug)]
pub(crate) struct JointState {
    pub(crate) spec: JointSpec,
    pub(crate) position: f64,
    pub(crate) velocity: f64,
    /// 本步待施加的力矩，积分后清零
    pub(crate) pending_force: f64,
    pub(crate) max_force: Option<f64>,
    /// 执行器写入记录，未启用时为 `None`
    pub(crate) log: Option<Vec<ActuationRecord>>,
}

impl JointState {
    pub(crate) fn new(spec: JointSpec, record_actuation: bool) -> Self {
        JointState {
            position: spec.initial_position,
            velocity: 0.0,
            pending_force: 0.0,
            max_force: None,
            log: record_actuation.then(Vec::new),
            spec,
        }
    }

    fn record(&mut self, record: ActuationRecord) {
        if let Some(log) = self.log.as_mut() {
            log.push(record);
        }
    }

    pub(crate) fn actuation_log(&self) -> Vec<ActuationRecord> {
        self.log.clone().unwrap_or_default()
    }

    /// 半隐式欧拉积分一步
    pub(crate) fn integrate(&mut self, dt: f64) {
        let limit = self.spec.effort_limit;
        let force = if limit > 0.0 {
            self.pending_force.clamp(-limit, limit)
        } else {
            self.pending_force
        };
        self.pending_force = 0.0;

        if self.spec.inertia <= 0.0 {
            return;
        }
        let acceleration = (force - self.spec.damping * self.velocity) / self.spec.inertia;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }
}

/// 关节句柄
///
/// 克隆开销很小，所有克隆指向同一个关节。
#[derive(Debug, Clone)]
pub struct SimJoint {
    pub(crate) state: Rc<RefCell<JointState>>,
    pub(crate) noise: Rc<RefCell<SensorNoise>>,
}

impl SimJoint {
    /// 真实角度（不含传感器噪声）
    pub fn true_position(&self) -> Rad {
        Rad(self.state.borrow().position)
    }

    /// 当前角速度（rad/s）
    pub fn velocity(&self) -> f64 {
        self.state.borrow().velocity
    }

    /// 已写入的静态最大力矩
    pub fn max_force(&self) -> Option<NewtonMeter> {
        self.state.borrow().max_force.map(NewtonMeter)
    }

    /// 执行器写入记录（未启用记录时为空）
    pub fn actuation_log(&self) -> Vec<ActuationRecord> {
        self.state.borrow().actuation_log()
    }
}

impl AngleSource for SimJoint {
    fn angle(&self) -> Rad {
        let position = self.state.borrow().position;
        Rad(position + self.noise.borrow_mut().sample())
    }
}

impl Actuator for SimJoint {
    fn set_force(&mut self, effort: NewtonMeter) {
        let mut state = self.state.borrow_mut();
        state.pending_force = effort.value();
        state.record(ActuationRecord::Force(effort));
    }

    fn set_position(&mut self, angle: Rad, bypass_limits: bool) {
        let mut state = self.state.borrow_mut();
        state.position = angle.value();
        // 运动学覆盖：清除速度，避免下一步继续漂移
        state.velocity = 0.0;
        state.record(ActuationRecord::Position {
            angle,
            bypass_limits,
        });
    }

    fn set_max_force(&mut self, effort: NewtonMeter) {
        let mut state = self.state.borrow_mut();
        state.max_force = Some(effort.value());
        state.record(ActuationRecord::MaxForce(effort));
    }

    fn effort_limit(&self) -> NewtonMeter {
        NewtonMeter(self.state.borrow().spec.effort_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joint(spec: JointSpec) -> SimJoint {
        SimJoint {
            state: Rc::new(RefCell::new(JointState::new(spec, true))),
            noise: Rc::new(RefCell::new(SensorNoise::disabled())),
        }
    }

    #[test]
    fn test_force_integration() {
        let mut j = joint(JointSpec::new("j").with_inertia(1.0).with_effort_limit(10.0));
        j.set_force(NewtonMeter(2.0));
        j.state.borrow_mut().integrate(0.5);

        // a = 2, v = 1, x = 0.5
        assert!((j.velocity() - 1.0).abs() < 1e-12);
        assert!((j.true_position().0 - 0.5).abs() < 1e-12);

        // 力矩只作用一步
        j.state.borrow_mut().integrate(0.5);
        assert!((j.velocity() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_force_clamped_by_effort_limit() {
        let mut j = joint(JointSpec::new("j").with_inertia(1.0).with_effort_limit(1.0));
        j.set_force(NewtonMeter(100.0));
        j.state.borrow_mut().integrate(1.0);
        assert!((j.velocity() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_position_override() {
        let mut j = joint(JointSpec::new("j").with_initial_position(0.3));
        j.state.borrow_mut().velocity = 4.0;

        j.set_position(Rad(-0.2), true);
        assert_eq!(j.true_position(), Rad(-0.2));
        assert_eq!(j.velocity(), 0.0);
        assert_eq!(
            j.actuation_log(),
            vec![ActuationRecord::Position {
                angle: Rad(-0.2),
                bypass_limits: true
            }]
        );
    }

    #[test]
    fn test_max_force_recorded() {
        let mut j = joint(JointSpec::new("j").with_effort_limit(3.0));
        assert_eq!(j.effort_limit(), NewtonMeter(3.0));
        assert_eq!(j.max_force(), None);

        j.set_max_force(NewtonMeter(3.0));
        assert_eq!(j.max_force(), Some(NewtonMeter(3.0)));
    }

    #[test]
    fn test_spec_deserialize_defaults() {
        let spec: JointSpec = toml::from_str("name = \"finger\"").unwrap();
        assert_eq!(spec, JointSpec::new("finger"));
    }
}
