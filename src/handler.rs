//! # 命令处理逻辑模块
//!
//! 负责打开输入文件、根据命令行参数组装提取驱动、
//! 运行提取并向用户报告结果。

use crate::cli::ExtractArgs;
use crate::error::ExtractError;
use crate::extractor::{Extractor, ExtractorConfig, RunSummary};
use crate::record::DimensionLimits;
use crate::scanner::MarkerSet;
use crate::sink::DirectorySink;
use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;
use std::fs::File;
use std::io::BufReader;

/// 处理提取命令。
///
/// 输入文件无法打开或读取时不输出任何信息，与旧版工具的行为一致：
/// 打不开时返回空的统计结果，读到一半出错时返回已经得到的结果。
/// 单条记录的写入失败会打印到标准错误，但不会中止运行。
///
/// # Arguments
///
/// * `args` - 包含输入路径、输出目录和提取选项的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// `--marker` 参数为空或重复时返回错误。
pub fn handle_extract(args: ExtractArgs) -> Result<RunSummary> {
    let markers = MarkerSet::new(args.markers.iter().map(String::as_bytes))
        .context("Invalid --marker value")?;

    let file = match File::open(&args.input) {
        Ok(file) => file,
        Err(source) => {
            let e = ExtractError::SourceUnavailable {
                path: args.input.clone(),
                source,
            };
            debug!("Nothing to do: {e}");
            return Ok(RunSummary::default());
        }
    };

    let config = ExtractorConfig {
        markers,
        limits: DimensionLimits {
            max_width: args.max_width,
            max_height: args.max_height,
        },
        format: args.format,
    };

    let mut extractor = Extractor::new(config);
    let mut sink = DirectorySink::for_input(&args.input, &args.output_dir);

    let mut summary = extractor.run(BufReader::new(file), &mut sink);

    if let Some(source) = summary.read_error.take() {
        let e = ExtractError::SourceUnavailable {
            path: args.input.clone(),
            source,
        };
        debug!("Stopped early: {e}");
    }

    for path in &summary.saved {
        println!(
            "Image saved: {}",
            path.to_string_lossy().green().bold()
        );
    }

    for failure in &summary.failures {
        eprintln!("{} {}", "Failed to save image:".red().bold(), failure);
    }

    if summary.markers_found > 0 {
        println!(
            "Markers found: {}, extracted: {}, skipped: {}, failed: {}",
            summary.markers_found.to_string().bold(),
            summary.saved.len().to_string().green().bold(),
            summary.skipped().to_string().yellow(),
            summary.failures.len().to_string().red()
        );
    }

    Ok(summary)
}
