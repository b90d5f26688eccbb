/// 默认的记录标记。每条嵌入的图像记录都以这段 ASCII 字节开头。
pub const DEFAULT_MARKER: &str = "Image8";

/// 标记之后、宽高字段之前需要跳过的分隔字节数。
pub const DELIMITER_LEN: usize = 1;

/// 允许提取的最大宽度 (像素)。
/// 这个上限用于限制损坏或恶意文件可能触发的内存分配。
pub const MAX_IMAGE_WIDTH: u32 = 2000;

/// 允许提取的最大高度 (像素)。
pub const MAX_IMAGE_HEIGHT: u32 = 2000;

/// 每个像素的通道数 (交错存储)。
pub const CHANNELS: usize = 3;

/// BMP 文件头大小 (字节)。
pub const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP 信息头 (BITMAPINFOHEADER) 大小 (字节)。
pub const BMP_INFO_HEADER_SIZE: usize = 40;

/// 像素数据相对文件起始位置的偏移，即两个头部之和。
pub const BMP_HEADER_SIZE: usize = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE;

/// 24 位色深。
pub const BMP_BITS_PER_PIXEL: u16 = 24;

/// 输出文件名中位于原文件名与序号之间的部分。
pub const EXTRACTED_INFIX: &str = "_extracted_";
