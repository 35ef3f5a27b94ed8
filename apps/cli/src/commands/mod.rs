//! 命令定义和实现

pub mod check;
pub mod run;

pub use check::CheckCommand;
pub use run::RunCommand;

use crate::scenario::Scenario;
use anyhow::{Context, Result};
use mimic_core::config::ParameterTable;
use mimic_sim::Simulation;
use std::path::Path;

/// 加载场景、构建世界并挂载插件
///
/// 返回已挂载的仿真和记录了声明结果的参数表。
pub(crate) fn arm_scenario(path: &Path) -> Result<(Scenario, Simulation, ParameterTable)> {
    let scenario = Scenario::load(path)?;
    let mut sim = scenario.build()?;
    let mut params = scenario.plugin.parameters();

    sim.arm(&scenario.plugin.config, &mut params, &scenario.runtime())
        .with_context(|| format!("插件挂载失败: {}", path.display()))?;

    Ok((scenario, sim, params))
}
