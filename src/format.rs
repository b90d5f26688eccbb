//! # 输出格式
//!
//! BMP 使用本仓库自带的逐字节编码器；PNG 交给 `image` crate。

use crate::bitmap::encode_bitmap;
use crate::error::Result;
use crate::record::Dimensions;
use clap::ValueEnum;
use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageError, ImageFormat, RgbImage};
use std::fmt;
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 24 位无压缩 BMP
    #[default]
    Bmp,
    /// PNG (RGB8)
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Bmp => "bmp",
            OutputFormat::Png => "png",
        }
    }

    /// 把通道 0 在前、自上而下的像素缓冲区编码为该格式的完整文件。
    ///
    /// # Errors
    ///
    /// 只有 PNG 路径可能失败 (缓冲区长度与宽高不符或编码器出错)。
    pub fn encode(&self, pixels: Vec<u8>, dimensions: Dimensions) -> Result<Vec<u8>> {
        match self {
            OutputFormat::Bmp => Ok(encode_bitmap(pixels, dimensions)),
            OutputFormat::Png => encode_png(pixels, dimensions),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn encode_png(pixels: Vec<u8>, dimensions: Dimensions) -> Result<Vec<u8>> {
    let image = RgbImage::from_raw(
        dimensions.width_px() as u32,
        dimensions.height_px() as u32,
        pixels,
    )
    .ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })?;

    let mut encoded = Vec::new();
    image.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)?;
    Ok(encoded)
}
