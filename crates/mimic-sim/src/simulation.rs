//! 仿真循环
//!
//! 每步的顺序与宿主的 "world update begin" 事件一致：
//!
//! 1. 按轨迹运动学设置主关节角度
//! 2. 调用插件的 `on_update()`（读取角度、下发命令）
//! 3. 物理积分一个步长

use crate::joint::SimJoint;
use crate::trajectory::Trajectory;
use crate::world::{SimError, SimWorld};
use mimic_core::config::MimicConfig;
use mimic_core::control::Command;
use mimic_core::error::LoadError;
use mimic_core::host::{HostRuntime, ParameterServer};
use mimic_core::plugin::MimicJointPlugin;
use mimic_core::types::Rad;
use serde::Serialize;

/// 单步采样
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSample {
    /// 本步开始时的仿真时间（秒）
    pub time: f64,
    /// 主关节角度
    pub master: Rad,
    /// 目标角度（插件未挂载时为 `None`）
    pub target: Option<Rad>,
    /// 积分后的从动关节角度（插件未挂载时为 `None`）
    pub mimic: Option<Rad>,
    /// 本步下发的命令
    pub command: Option<Command>,
}

impl StepSample {
    /// 积分后的跟踪误差 `|target - mimic|`
    pub fn tracking_error(&self) -> Option<f64> {
        Some((self.target? - self.mimic?).abs().value())
    }
}

/// 跟踪质量统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackingReport {
    pub steps: u64,
    pub position_commands: u64,
    pub force_commands: u64,
    pub withheld: u64,
    pub max_error: f64,
    pub final_error: f64,
    pub rms_error: f64,
    #[serde(skip)]
    sum_sq_error: f64,
}

impl TrackingReport {
    /// 累加一步采样
    pub fn record(&mut self, sample: &StepSample) {
        self.steps += 1;
        match sample.command {
            Some(Command::Position { .. }) => self.position_commands += 1,
            Some(Command::Force(_)) => self.force_commands += 1,
            None => self.withheld += 1,
        }
        if let Some(error) = sample.tracking_error() {
            self.max_error = self.max_error.max(error);
            self.final_error = error;
            self.sum_sq_error += error * error;
            self.rms_error = (self.sum_sq_error / self.steps as f64).sqrt();
        }
    }
}

/// 仿真：世界 + 插件 + 主关节轨迹
#[derive(Debug)]
pub struct Simulation {
    world: SimWorld,
    plugin: MimicJointPlugin<SimJoint>,
    master: String,
    trajectory: Trajectory,
}

impl Simulation {
    /// 创建仿真，插件处于 Unarmed 状态
    pub fn new(world: SimWorld, master: impl Into<String>, trajectory: Trajectory) -> Self {
        Simulation {
            world,
            plugin: MimicJointPlugin::new(),
            master: master.into(),
            trajectory,
        }
    }

    /// 挂载插件
    pub fn arm(
        &mut self,
        config: &MimicConfig,
        params: &mut dyn ParameterServer,
        runtime: &dyn HostRuntime,
    ) -> Result<(), LoadError> {
        self.plugin.load(Some(&self.world), config, params, runtime)
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    pub fn plugin(&self) -> &MimicJointPlugin<SimJoint> {
        &self.plugin
    }

    /// 推进一步
    pub fn step(&mut self) -> Result<StepSample, SimError> {
        let time = self.world.sim_time_secs();
        let master = self.trajectory.position_at(time);
        self.world.set_position(&self.master, master)?;

        let command = self.plugin.on_update();
        self.world.step();

        let (target, mimic) = match self.plugin.tracker() {
            Some(tracker) => (
                Some(tracker.target(master)),
                self.world.position(tracker.params().mimic_joint()),
            ),
            None => (None, None),
        };

        Ok(StepSample {
            time,
            master,
            target,
            mimic,
            command,
        })
    }

    /// 连续推进 `steps` 步并统计
    pub fn run(&mut self, steps: u64) -> Result<TrackingReport, SimError> {
        let mut report = TrackingReport::default();
        for _ in 0..steps {
            let sample = self.step()?;
            report.record(&sample);
        }
        Ok(report)
    }
}
