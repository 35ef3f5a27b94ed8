//! 仿真场景文件
//!
//! ```toml
//! [world]
//! step_size = 0.001
//! steps = 2000
//!
//! [[joints]]
//! name = "drive_joint"
//!
//! [[joints]]
//! name = "left_finger"
//! effort_limit = 3.0
//! inertia = 0.01
//! damping = 0.5
//!
//! [master]
//! kind = "sine"
//! amplitude = 0.5
//! frequency = 0.5
//!
//! [plugin]
//! joint = "drive_joint"
//! mimicJoint = "left_finger"
//! hasPID = true
//!
//! [plugin.gains.drive_joint]
//! p = 10.0
//! ```

use anyhow::{Context, Result, bail};
use mimic_core::config::MimicDescription;
use mimic_sim::{JointSpec, SimRuntime, SimWorld, Simulation, Trajectory};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 世界参数
#[derive(Debug, Clone, Deserialize)]
pub struct WorldSection {
    /// 固定步长（秒）
    #[serde(default = "default_step_size")]
    pub step_size: f64,

    /// 默认运行步数
    #[serde(default = "default_steps")]
    pub steps: u64,

    /// 角度传感器噪声幅度（rad）
    #[serde(default)]
    pub sensor_noise: f64,

    /// 噪声随机种子
    #[serde(default)]
    pub seed: u64,

    /// 宿主运行时是否就绪（用于演练挂载失败）
    #[serde(default = "default_runtime_ready")]
    pub runtime_ready: bool,
}

fn default_step_size() -> f64 {
    0.001
}

fn default_steps() -> u64 {
    1000
}

fn default_runtime_ready() -> bool {
    true
}

impl Default for WorldSection {
    fn default() -> Self {
        WorldSection {
            step_size: default_step_size(),
            steps: default_steps(),
            sensor_noise: 0.0,
            seed: 0,
            runtime_ready: default_runtime_ready(),
        }
    }
}

/// 场景
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub world: WorldSection,

    #[serde(default)]
    pub joints: Vec<JointSpec>,

    /// 主关节轨迹
    #[serde(default)]
    pub master: Trajectory,

    /// 插件配置
    #[serde(default)]
    pub plugin: MimicDescription,
}

impl Scenario {
    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("解析场景文件失败")
    }

    /// 从文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取场景文件失败: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// 宿主运行时
    pub fn runtime(&self) -> SimRuntime {
        if self.world.runtime_ready {
            SimRuntime::ready()
        } else {
            SimRuntime::not_ready()
        }
    }

    /// 构建仿真（插件尚未挂载）
    pub fn build(&self) -> Result<Simulation> {
        let step_size = Duration::try_from_secs_f64(self.world.step_size)
            .with_context(|| format!("无效的步长: {}", self.world.step_size))?;
        if step_size.is_zero() {
            bail!("步长必须大于 0");
        }
        let noise = self.world.sensor_noise;
        if !noise.is_finite() || noise < 0.0 {
            bail!("无效的传感器噪声幅度: {}", noise);
        }

        let mut world = SimWorld::new(step_size).with_sensor_noise(noise, self.world.seed);
        for spec in &self.joints {
            world.add_joint(spec.clone())?;
        }

        // 主关节由插件配置的 joint 决定；缺失时由挂载校验报告
        let master = self.plugin.config.joint.clone().unwrap_or_default();
        Ok(Simulation::new(world, master, self.master))
    }
}
