//! # BMP 编码模块
//!
//! 把通道 0 在前、自上而下存储的 24 位像素编码为独立的 BMP 文件：
//! 14 字节文件头 + 40 字节信息头 + 自下而上、每行按 4 字节对齐、通道 2 在前的像素行。

use crate::constants::{
    BMP_BITS_PER_PIXEL, BMP_FILE_HEADER_SIZE, BMP_HEADER_SIZE, BMP_INFO_HEADER_SIZE, CHANNELS,
};
use crate::record::Dimensions;

const BMP_SIGNATURE: &[u8; 2] = b"BM";
const PADDING: [u8; 3] = [0; 3];

/// 每行末尾需要补齐的零字节数，取值范围 `0..4`。
pub fn row_padding(width: usize) -> usize {
    (4 - (width * CHANNELS) % 4) % 4
}

/// 编码结果的总字节数 `54 + (width*3 + padding) * height`。
///
/// 经过 [`Dimensions::validate`] 的宽高保证结果不超过 `u32::MAX`。
pub fn file_size(dimensions: Dimensions) -> usize {
    let stride = dimensions.row_len() + row_padding(dimensions.width_px());
    BMP_HEADER_SIZE + stride * dimensions.height_px()
}

/// 与 [`file_size`] 相同，但用 `u64` 计算；结果放不进文件头的 32 位大小字段时返回 `None`。
pub fn checked_file_size(dimensions: Dimensions) -> Option<u32> {
    let width = u64::try_from(dimensions.width).ok()?;
    let height = u64::try_from(dimensions.height).ok()?;
    let stride = width * CHANNELS as u64 + row_padding(width as usize) as u64;
    let size = (BMP_HEADER_SIZE as u64).checked_add(stride.checked_mul(height)?)?;
    u32::try_from(size).ok()
}

fn file_header(size: usize) -> [u8; BMP_FILE_HEADER_SIZE] {
    let mut header = [0u8; BMP_FILE_HEADER_SIZE];
    header[0..2].copy_from_slice(BMP_SIGNATURE);
    header[2..6].copy_from_slice(&(size as u32).to_le_bytes());
    // 6..10 保留字段为零
    header[10..14].copy_from_slice(&(BMP_HEADER_SIZE as u32).to_le_bytes());
    header
}

fn info_header(dimensions: Dimensions) -> [u8; BMP_INFO_HEADER_SIZE] {
    let mut header = [0u8; BMP_INFO_HEADER_SIZE];
    header[0..4].copy_from_slice(&(BMP_INFO_HEADER_SIZE as u32).to_le_bytes());
    header[4..8].copy_from_slice(&dimensions.width.to_le_bytes());
    header[8..12].copy_from_slice(&dimensions.height.to_le_bytes());
    header[12..14].copy_from_slice(&1u16.to_le_bytes());
    header[14..16].copy_from_slice(&BMP_BITS_PER_PIXEL.to_le_bytes());
    // 压缩方式、图像大小、分辨率和调色板字段全部为零
    header
}

/// 将像素缓冲区编码为完整的 BMP 文件。
///
/// 缓冲区被消耗：交换通道直接在其中进行，每行在写出之前交换一次。
/// `pixels.len()` 必须等于 `width * height * 3`，这是调用方的约定，这里不做检查。
///
/// 返回值的长度总是等于 [`file_size`]，也等于文件头中写入的大小字段。
pub fn encode_bitmap(mut pixels: Vec<u8>, dimensions: Dimensions) -> Vec<u8> {
    let size = file_size(dimensions);
    let row_len = dimensions.row_len();
    let padding = &PADDING[..row_padding(dimensions.width_px())];

    let mut out = Vec::with_capacity(size);
    out.extend_from_slice(&file_header(size));
    out.extend_from_slice(&info_header(dimensions));

    if row_len > 0 {
        for row in pixels.chunks_exact_mut(row_len).rev() {
            row.chunks_exact_mut(CHANNELS)
                .for_each(|pixel| pixel.swap(0, 2));
            out.extend_from_slice(row);
            out.extend_from_slice(padding);
        }
    }

    out
}
