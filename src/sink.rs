//! # 输出目标
//!
//! 驱动器只负责产生编码好的字节，写到哪里、叫什么名字由 `ImageSink` 决定。

use crate::constants::EXTRACTED_INFIX;
use crate::error::{ExtractError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub trait ImageSink {
    /// 保存第 `index` 张 (从 1 开始) 提取出的图像，返回保存位置。
    ///
    /// # Errors
    ///
    /// 写入失败时返回 `SinkWrite`。
    fn write_image(&mut self, index: u64, extension: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// 生成 `<stem>_extracted_<N>.<ext>` 形式的文件名。
pub fn output_file_name(stem: &str, index: u64, extension: &str) -> String {
    format!("{stem}{EXTRACTED_INFIX}{index}.{extension}")
}

/// 把图像写入某个目录下的普通文件，已存在的同名文件会被覆盖。
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    stem: String,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    /// 以输入文件名 (去掉扩展名) 作为输出文件名前缀。
    pub fn for_input(input: &Path, dir: impl Into<PathBuf>) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(dir, stem)
    }

    pub fn path_for(&self, index: u64, extension: &str) -> PathBuf {
        self.dir
            .join(output_file_name(&self.stem, index, extension))
    }
}

impl ImageSink for DirectorySink {
    fn write_image(&mut self, index: u64, extension: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(index, extension);
        match fs::write(&path, bytes) {
            Ok(()) => Ok(path),
            Err(source) => Err(ExtractError::SinkWrite { path, source }),
        }
    }
}
