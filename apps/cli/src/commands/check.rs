//! check 命令
//!
//! 执行一次完整挂载流程，不推进仿真。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::arm_scenario;

/// 场景校验命令参数
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// 场景文件路径
    pub scenario: PathBuf,
}

impl CheckCommand {
    pub fn execute(&self) -> Result<()> {
        let (scenario, sim, params) = arm_scenario(&self.scenario)?;
        let tracker = sim.plugin().tracker().context("插件未挂载")?;

        println!("✅ 场景有效: {}", self.scenario.display());
        println!("  关节: {}", sim.world().joint_names().join(", "));
        println!("  步长: {:?}", sim.plugin().period().unwrap_or_default());
        println!("  默认步数: {}", scenario.world.steps);
        println!("  执行模式: {}", mode_name(tracker.mode().is_force_controlled()));
        println!("  {}", tracker.params());

        if !params.declared().is_empty() {
            println!();
            println!("📋 已声明参数:");
            for (name, value) in params.declared() {
                println!("  {} = {}", name, value);
            }
        }

        Ok(())
    }
}

fn mode_name(force_controlled: bool) -> &'static str {
    if force_controlled {
        "force (PID)"
    } else {
        "position"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_name() {
        assert_eq!(mode_name(true), "force (PID)");
        assert_eq!(mode_name(false), "position");
    }
}
