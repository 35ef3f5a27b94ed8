//! run 命令
//!
//! 挂载插件后按固定步长推进仿真，输出跟踪统计。

use anyhow::{Context, Result};
use clap::Args;
use mimic_core::control::Command;
use mimic_sim::{StepSample, TrackingReport};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{info, warn};

use super::arm_scenario;

/// 场景运行命令参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 场景文件路径
    pub scenario: PathBuf,

    /// 运行步数（覆盖 world.steps）
    #[arg(short = 'n', long)]
    pub steps: Option<u64>,

    /// 逐步采样导出为 CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// 按仿真步长实时运行
    #[arg(long)]
    pub realtime: bool,

    /// 以 JSON 输出统计结果
    #[arg(long)]
    pub json: bool,
}

impl RunCommand {
    pub fn execute(&self) -> Result<()> {
        let (scenario, mut sim, _) = arm_scenario(&self.scenario)?;
        let steps = self.steps.unwrap_or(scenario.world.steps);
        let period = sim.plugin().period().unwrap_or_default();

        let mut trace = match &self.csv {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("无法创建 CSV 文件: {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                writeln!(writer, "time,master,target,mimic,command,value")?;
                Some(writer)
            },
            None => None,
        };

        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        ctrlc::set_handler(move || {
            flag.store(false, Ordering::SeqCst);
        })
        .context("无法注册 Ctrl+C 处理器")?;

        info!("Running {} steps (period {:?})", steps, period);

        let mut report = TrackingReport::default();
        let mut next_tick = Instant::now();
        for _ in 0..steps {
            if !running.load(Ordering::SeqCst) {
                warn!("Interrupted after {} steps", report.steps);
                break;
            }

            let sample = sim.step()?;
            report.record(&sample);
            if let Some(writer) = trace.as_mut() {
                write_sample(writer, &sample)?;
            }

            if self.realtime {
                next_tick += period;
                let now = Instant::now();
                if next_tick > now {
                    spin_sleep::sleep(next_tick - now);
                } else {
                    warn!(
                        "Simulation step overrun: behind schedule by {:?} (period {:?})",
                        now.duration_since(next_tick),
                        period
                    );
                    next_tick = now;
                }
            }
        }

        if let Some(mut writer) = trace {
            writer.flush()?;
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }

        Ok(())
    }
}

/// 写入一行 CSV 采样
fn write_sample<W: Write>(writer: &mut W, sample: &StepSample) -> std::io::Result<()> {
    let (kind, value) = match sample.command {
        Some(Command::Position { angle, .. }) => ("position", Some(angle.value())),
        Some(Command::Force(effort)) => ("force", Some(effort.value())),
        None => ("none", None),
    };
    writeln!(
        writer,
        "{:.6},{},{},{},{},{}",
        sample.time,
        sample.master.value(),
        optional(sample.target.map(|t| t.value())),
        optional(sample.mimic.map(|m| m.value())),
        kind,
        optional(value),
    )
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn print_report(report: &TrackingReport) {
    println!("📊 跟踪统计:");
    println!("  步数: {}", report.steps);
    println!("  位置命令: {}", report.position_commands);
    println!("  力矩命令: {}", report.force_commands);
    println!("  死区抑制: {}", report.withheld);
    println!("  最大误差: {:.6} rad", report.max_error);
    println!("  最终误差: {:.6} rad", report.final_error);
    println!("  RMS 误差: {:.6} rad", report.rms_error);
}
