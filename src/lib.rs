//! # rtti_extract 库
//!
//! 本库包含嵌入图像提取工具的核心逻辑：标记扫描、记录解析、BMP 编码和提取驱动。

// 声明库包含的所有模块。

pub mod bitmap;
pub mod cli;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod format;
pub mod handler;
pub mod record;
pub mod scanner;
pub mod sink;

pub use error::{ExtractError, Result};
pub use extractor::{Extractor, ExtractorConfig, RunSummary};
