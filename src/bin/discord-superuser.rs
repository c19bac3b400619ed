//! Discord superuser CLI
//!
//! 备份、导入和列出当前账号的关系。凭证通过环境变量 TOKEN 提供，
//! 缺失时在执行任何操作之前直接退出。

use anyhow::Result;
use clap::Parser;
use discord_superuser::discord::commands::{CommandReport, Superuser, SuperuserArgs};
use discord_superuser::{ClientConfig, HttpRelationshipApi};
use std::process::ExitCode;
use tracing::{error, info, warn};

/// 初始化日志（输出到 stderr，stdout 只留给关系列表）
fn init_logger(log_level: &str) {
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .init();
}

async fn run(args: SuperuserArgs, config: &ClientConfig) -> Result<Vec<CommandReport>> {
    let api = HttpRelationshipApi::from_config(config)?;

    let superuser = Superuser::new(args, &api);
    let mut stdout = std::io::stdout().lock();
    let reports = superuser.run(&mut stdout).await?;
    Ok(reports)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = SuperuserArgs::parse();
    init_logger(&args.log_level);

    // 凭证缺失时在执行任何操作之前退出
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("[CLI] ❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !args.has_command() {
        warn!("[CLI] 没有指定任何命令，使用 --help 查看用法");
        return ExitCode::SUCCESS;
    }

    match run(args, &config).await {
        Ok(reports) => {
            let mut failed = false;
            let mut unsupported = false;
            for report in &reports {
                match report {
                    CommandReport::BackedUp {
                        path,
                        count,
                        degraded,
                    } => {
                        if *degraded {
                            warn!(
                                "[CLI] ⚠️ 备份 {} 已写入，但关系列表拉取失败，文件内容为空",
                                path.display()
                            );
                        } else {
                            info!("[CLI] ✅ 已备份 {} 条关系到 {}", count, path.display());
                        }
                    }
                    CommandReport::Imported { path, summary } => {
                        info!(
                            "[CLI] ✅ 已从 {} 导入：共 {} 条，成功 {}，拒绝 {}，失败 {}",
                            path.display(),
                            summary.total,
                            summary.accepted,
                            summary.rejected,
                            summary.failed
                        );
                    }
                    CommandReport::Unsupported(e) => {
                        error!("[CLI] ❌ {}", e);
                        unsupported = true;
                    }
                    CommandReport::Failed(e) => {
                        error!("[CLI] ❌ 命令失败: {}", e);
                        failed = true;
                    }
                    CommandReport::Listed { .. } => {}
                }
            }
            if failed {
                ExitCode::FAILURE
            } else if unsupported {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("[CLI] ❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
