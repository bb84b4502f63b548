use std::os::unix::process::CommandExt;
use std::process::Command;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use log::{info, warn};

use osfind::cli::Cli;
use osfind::errors::FindError;

fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    env_logger::Builder::new()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    cli.validate()?;

    info!("开始运行 osfind");
    let start_time = Instant::now();

    // 构建查找器并执行搜索
    let finder = cli.build_finder();
    let found = if cli.skip_errors {
        finder.visit_with(&cli.path, |path: &std::path::Path, err: &FindError| {
            warn!("跳过 {}: {}", path.display(), err);
            true
        })?
    } else {
        finder.visit(&cli.path)?
    };

    let elapsed = start_time.elapsed();
    info!("搜索完成，耗时 {:.2?}", elapsed);

    // 有 --exec 时用匹配结果替换当前进程，否则逐行打印
    if let Some(program) = cli.exec.first() {
        let err = Command::new(program).args(&found).exec();
        // exec 成功时不会返回
        bail!("无法执行 {}: {}", program.display(), err);
    }

    for path in &found {
        println!("{}", path.display());
    }

    Ok(())
}
