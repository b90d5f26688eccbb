//! # 错误类型
//!
//! 提取过程中可能出现的所有错误。除了参数错误以外，
//! 这些错误都只影响单条记录，驱动循环会跳过该记录并继续扫描。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// 流中剩余的字节不足以读取声明的字段或像素缓冲区。
    #[error("Truncated record: not enough bytes left to read {field} ({expected} bytes)")]
    TruncatedRead { field: &'static str, expected: usize },

    /// 声明的宽高不是正数，或者超出了配置的上限。
    #[error("Dimensions {width}x{height} are outside the allowed range 1..={max_width} x 1..={max_height}")]
    DimensionOutOfBounds {
        width: i32,
        height: i32,
        max_width: u32,
        max_height: u32,
    },

    /// 输出文件无法创建或写入。
    #[error("Unable to write output file {}: {source}", path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 输入文件无法打开或读取。
    #[error("Source file {} is unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 标记集合为空，或包含空标记、重复标记。
    #[error("Invalid marker set: {0}")]
    InvalidMarkerSet(String),

    /// `image` crate 编码 PNG 失败。
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// 文件结束以外的底层 I/O 错误。
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ExtractError {
    /// 将读取过程中的 `UnexpectedEof` 转换为 `TruncatedRead`，其他 I/O 错误原样保留。
    pub(crate) fn from_read(err: io::Error, field: &'static str, expected: usize) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ExtractError::TruncatedRead { field, expected }
        } else {
            ExtractError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
