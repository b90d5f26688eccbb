//! # 记录解析模块
//!
//! 标记之后的记录布局：
//!
//! ```text
//! marker | 1 字节分隔符 | width: u32 LE | height: u32 LE | width*height*3 字节像素
//! ```
//!
//! 宽高按小端无符号读入后原样重新解释为 `i32`，负值需要调用方显式检查。

use crate::bitmap::checked_file_size;
use crate::constants::{CHANNELS, DELIMITER_LEN, MAX_IMAGE_HEIGHT, MAX_IMAGE_WIDTH};
use crate::error::{ExtractError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// 宽高的允许上限 (含)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for DimensionLimits {
    fn default() -> Self {
        Self {
            max_width: MAX_IMAGE_WIDTH,
            max_height: MAX_IMAGE_HEIGHT,
        }
    }
}

/// 记录头中声明的宽高。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// 检查 `0 < width <= max_width` 且 `0 < height <= max_height`，
    /// 并且编码后的 BMP 大小能写进 32 位的文件大小字段。
    ///
    /// # Errors
    ///
    /// 任一条件不满足时返回 `DimensionOutOfBounds`。
    pub fn validate(self, limits: &DimensionLimits) -> Result<Self> {
        let in_range = |value: i32, max: u32| value > 0 && (value as u32) <= max;

        if in_range(self.width, limits.max_width)
            && in_range(self.height, limits.max_height)
            && checked_file_size(self).is_some()
        {
            Ok(self)
        } else {
            Err(ExtractError::DimensionOutOfBounds {
                width: self.width,
                height: self.height,
                max_width: limits.max_width,
                max_height: limits.max_height,
            })
        }
    }

    /// 宽度 (像素)，负值按 0 处理。
    pub fn width_px(&self) -> usize {
        self.width.max(0) as usize
    }

    /// 高度 (像素)，负值按 0 处理。
    pub fn height_px(&self) -> usize {
        self.height.max(0) as usize
    }

    /// 一行像素的字节数，不含填充。
    pub fn row_len(&self) -> usize {
        self.width_px().saturating_mul(CHANNELS)
    }

    /// 像素缓冲区的总字节数 `width * height * 3`。
    pub fn pixel_len(&self) -> usize {
        self.row_len().saturating_mul(self.height_px())
    }
}

/// 读取 4 个字节并按小端组合为 `u32`。
///
/// # Errors
///
/// 剩余不足 4 字节时返回 `TruncatedRead`。
pub fn read_u32_le<R: Read>(reader: &mut R, field: &'static str) -> Result<u32> {
    reader
        .read_u32::<LittleEndian>()
        .map_err(|e| ExtractError::from_read(e, field, 4))
}

/// 跳过标记之后的分隔字节。分隔字节缺失同样视为截断。
pub fn skip_delimiter<R: Read>(reader: &mut R) -> Result<()> {
    let mut delimiter = [0u8; DELIMITER_LEN];
    reader
        .read_exact(&mut delimiter)
        .map_err(|e| ExtractError::from_read(e, "delimiter", DELIMITER_LEN))
}

/// 依次读取宽度和高度。
pub fn read_dimensions<R: Read>(reader: &mut R) -> Result<Dimensions> {
    let width = read_u32_le(reader, "width")? as i32;
    let height = read_u32_le(reader, "height")? as i32;
    Ok(Dimensions::new(width, height))
}

/// 读取恰好 `width * height * 3` 字节的交错像素数据。
///
/// 调用方应先用 [`Dimensions::validate`] 检查宽高。缓冲区随读到的字节增长，
/// 声明的尺寸再大，也不会在数据到达之前分配内存。
///
/// # Errors
///
/// 流提前结束时返回 `TruncatedRead`，已读到的部分数据被丢弃。
pub fn read_pixels<R: Read>(reader: &mut R, dimensions: Dimensions) -> Result<Vec<u8>> {
    let len = dimensions.pixel_len();
    let mut pixels = Vec::new();
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut pixels)?;

    if pixels.len() < len {
        return Err(ExtractError::TruncatedRead {
            field: "pixel data",
            expected: len,
        });
    }
    Ok(pixels)
}

/// 给 `Read` 加上已读字节计数，驱动器用它报告记录所在的偏移。
#[derive(Debug)]
pub struct CountingReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    pub fn position(&self) -> u64 {
        self.position
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}
