//! # 提取驱动
//!
//! 在一个只进不退的字节流上循环：寻找标记 → 跳过分隔符 → 读取宽高 →
//! 检查范围 → 读取像素 → 编码 → 交给输出目标，直到流耗尽。
//!
//! 单条记录的任何问题 (截断、尺寸越界、写入失败) 都不会中止整个运行；
//! 底层读取出错则与流结束同样处理。
//! 记录被跳过后直接从当前游标继续扫描，不会跳过声明的像素区域长度。

use crate::error::{ExtractError, Result};
use crate::format::OutputFormat;
use crate::record::{
    CountingReader, DimensionLimits, Dimensions, read_dimensions, read_pixels, skip_delimiter,
};
use crate::scanner::{MarkerScanner, MarkerSet};
use crate::sink::ImageSink;
use log::{debug, info, warn};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub markers: MarkerSet,
    pub limits: DimensionLimits,
    pub format: OutputFormat,
}

impl ExtractorConfig {
    pub fn new(markers: MarkerSet) -> Self {
        Self {
            markers,
            limits: DimensionLimits::default(),
            format: OutputFormat::default(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::new(MarkerSet::default())
    }
}

/// 一次运行的统计结果。
#[derive(Debug, Default)]
pub struct RunSummary {
    /// 找到的标记数量
    pub markers_found: u64,
    /// 成功保存的文件，按序号排列
    pub saved: Vec<PathBuf>,
    /// 因截断被跳过的记录
    pub truncated: u64,
    /// 因宽高越界被跳过的记录
    pub out_of_bounds: u64,
    /// 编码或写入失败的记录
    pub failures: Vec<ExtractError>,
    /// 使运行提前结束的读取错误 (文件结束以外)
    pub read_error: Option<io::Error>,
}

impl RunSummary {
    pub fn skipped(&self) -> u64 {
        self.truncated + self.out_of_bounds
    }
}

#[derive(Debug)]
pub struct Extractor {
    scanner: MarkerScanner,
    limits: DimensionLimits,
    format: OutputFormat,
    extracted: u64,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            scanner: MarkerScanner::new(config.markers),
            limits: config.limits,
            format: config.format,
            extracted: 0,
        }
    }

    /// 到目前为止成功提取的记录数，也是最后一个输出文件的序号。
    pub fn extracted(&self) -> u64 {
        self.extracted
    }

    /// 扫描整个流，把每条有效记录编码后交给 `sink`。
    ///
    /// 记录级别的问题记入 [`RunSummary`]。读取出错时运行在当前位置结束，
    /// 错误保存在 `RunSummary::read_error` 中。
    pub fn run<R: Read, S: ImageSink>(&mut self, reader: R, sink: &mut S) -> RunSummary {
        let mut reader = CountingReader::new(reader);
        let mut summary = RunSummary::default();

        loop {
            let found = match self.scanner.find_next_marker(&mut reader) {
                Ok(Some(found)) => found,
                Ok(None) => break,
                Err(e) => {
                    debug!("Read failed at offset {}: {e}", reader.position());
                    summary.read_error = Some(e);
                    break;
                }
            };

            summary.markers_found += 1;
            let marker_len = self.scanner.markers().markers()[found.marker_index].len() as u64;
            let offset = reader.position() - marker_len;

            let (dimensions, pixels) = match self.read_record(&mut reader) {
                Ok(record) => record,
                Err(e @ ExtractError::TruncatedRead { .. }) => {
                    debug!("Skipping record at offset {offset}: {e}");
                    summary.truncated += 1;
                    continue;
                }
                Err(ExtractError::Io(e)) => {
                    debug!("Read failed inside record at offset {offset}: {e}");
                    summary.read_error = Some(e);
                    break;
                }
                // 剩下的只有 DimensionOutOfBounds
                Err(e) => {
                    debug!("Skipping record at offset {offset}: {e}");
                    summary.out_of_bounds += 1;
                    continue;
                }
            };

            self.extracted += 1;
            let index = self.extracted;

            match self.emit(sink, index, pixels, dimensions) {
                Ok(path) => {
                    info!(
                        "Record at offset {offset} ({}x{}) saved to {}",
                        dimensions.width,
                        dimensions.height,
                        path.display()
                    );
                    summary.saved.push(path);
                }
                Err(e) => {
                    warn!("Record at offset {offset} could not be saved: {e}");
                    summary.failures.push(e);
                }
            }
        }

        summary
    }

    fn read_record<R: Read>(&self, reader: &mut R) -> Result<(Dimensions, Vec<u8>)> {
        skip_delimiter(reader)?;
        let dimensions = read_dimensions(reader)?.validate(&self.limits)?;
        let pixels = read_pixels(reader, dimensions)?;
        Ok((dimensions, pixels))
    }

    fn emit<S: ImageSink>(
        &self,
        sink: &mut S,
        index: u64,
        pixels: Vec<u8>,
        dimensions: Dimensions,
    ) -> Result<PathBuf> {
        let encoded = self.format.encode(pixels, dimensions)?;
        sink.write_image(index, self.format.extension(), &encoded)
    }
}
