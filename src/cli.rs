//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的命令行参数。
//! 唯一必需的参数是输入文件路径，其余参数都有与旧版行为一致的默认值。

use crate::constants::{DEFAULT_MARKER, MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH};
use crate::format::OutputFormat;
use clap::{Args, Parser};
use std::path::PathBuf;

/// 命令行参数错误时使用的退出码。
pub const USAGE_EXIT_CODE: i32 = 1;

/// 在任意二进制文件中查找以 `Image8` 开头的嵌入图像记录，并将其另存为 BMP (或 PNG) 文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "在任意二进制文件中查找以 `Image8` 开头的嵌入图像记录，并将其另存为 BMP (或 PNG) 文件。\n输出文件命名为 <输入文件名>_extracted_<序号>.<扩展名>。"
)]
pub struct Cli {
    #[command(flatten)]
    pub extract: ExtractArgs,

    /// 输出每条被跳过记录的原因等调试信息。
    #[arg(short, long)]
    pub verbose: bool,
}

/// 提取操作所需的参数。
#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// 要扫描的二进制文件路径。
    pub input: PathBuf,

    /// 保存提取结果的目录，默认为当前工作目录。
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// 输出图像格式。
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Bmp)]
    pub format: OutputFormat,

    /// 记录标记，可以重复指定多个 (长度可以不同)。
    #[arg(long = "marker", value_name = "MARKER", default_value = DEFAULT_MARKER)]
    pub markers: Vec<String>,

    /// 允许的最大宽度 (像素)，超出的记录会被跳过。
    #[arg(long, default_value_t = MAX_IMAGE_WIDTH, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: u32,

    /// 允许的最大高度 (像素)，超出的记录会被跳过。
    #[arg(long, default_value_t = MAX_IMAGE_HEIGHT, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: u32,
}

impl ExtractArgs {
    /// 使用默认设置构造参数，输出写入 `output_dir`。
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            format: OutputFormat::Bmp,
            markers: vec![DEFAULT_MARKER.to_string()],
            max_width: MAX_IMAGE_WIDTH,
            max_height: MAX_IMAGE_HEIGHT,
        }
    }
}
