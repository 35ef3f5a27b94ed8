//! # Mimic CLI
//!
//! 在内存仿真世界中挂载 mimic 关节插件并运行场景。
//!
//! ```bash
//! # 校验场景：执行挂载流程并打印生效参数
//! mimic-cli check scenarios/gripper.toml
//!
//! # 运行场景：输出跟踪统计，可选导出逐步采样
//! mimic-cli run scenarios/gripper.toml --steps 5000 --csv trace.csv
//!
//! # 按仿真步长实时运行（Ctrl+C 中断）
//! mimic-cli run scenarios/gripper.toml --realtime
//! ```
//!
//! 日志级别通过 `RUST_LOG` 调整，例如 `RUST_LOG=mimic_core=debug`。

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod scenario;

use commands::{CheckCommand, RunCommand};

/// Mimic CLI - mimic 关节场景运行工具
#[derive(Parser, Debug)]
#[command(name = "mimic-cli")]
#[command(about = "Run mimic joint scenarios on the in-memory simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 校验场景并打印插件参数
    Check {
        #[command(flatten)]
        args: CheckCommand,
    },

    /// 运行场景
    Run {
        #[command(flatten)]
        args: RunCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mimic_cli=info".parse()?)
                .add_directive("mimic_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { args } => args.execute(),
        Commands::Run { args } => args.execute(),
    }
}
