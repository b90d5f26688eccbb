//! # 标记扫描模块
//!
//! 在字节流中逐字节滑动一个窗口，寻找下一处记录标记。
//! 窗口长度等于最长的标记；只要窗口的末尾与某个标记完全相同即视为匹配，
//! 因此不同长度的标记可以同时使用。

use crate::constants::DEFAULT_MARKER;
use crate::error::{ExtractError, Result};
use byteorder::ReadBytesExt;
use std::collections::VecDeque;
use std::io::{self, Read};

/// 一组有序、互不相同、非空的标记。构造之后不可修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<Vec<u8>>,
    longest: usize,
}

impl MarkerSet {
    /// 从字节串构造标记集合。
    ///
    /// # Errors
    ///
    /// 集合为空、包含空标记或包含重复标记时返回 `InvalidMarkerSet`。
    pub fn new<I, M>(markers: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: AsRef<[u8]>,
    {
        let mut collected: Vec<Vec<u8>> = Vec::new();
        for marker in markers {
            let marker = marker.as_ref();
            if marker.is_empty() {
                return Err(ExtractError::InvalidMarkerSet(
                    "markers must not be empty".to_string(),
                ));
            }
            if collected.iter().any(|m| m == marker) {
                return Err(ExtractError::InvalidMarkerSet(format!(
                    "duplicate marker {:?}",
                    String::from_utf8_lossy(marker)
                )));
            }
            collected.push(marker.to_vec());
        }

        let longest = collected.iter().map(Vec::len).max().ok_or_else(|| {
            ExtractError::InvalidMarkerSet("at least one marker is required".to_string())
        })?;

        Ok(Self {
            markers: collected,
            longest,
        })
    }

    pub fn markers(&self) -> &[Vec<u8>] {
        &self.markers
    }

    pub fn longest(&self) -> usize {
        self.longest
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for MarkerSet {
    /// 只包含 `Image8` 的集合。
    fn default() -> Self {
        Self {
            markers: vec![DEFAULT_MARKER.as_bytes().to_vec()],
            longest: DEFAULT_MARKER.len(),
        }
    }
}

/// 一次成功匹配的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch {
    /// 匹配到的标记在 `MarkerSet` 中的下标。
    pub marker_index: usize,
    /// 本次调用从流中消耗的字节数 (含标记本身)。
    pub consumed: u64,
}

#[derive(Debug)]
pub struct MarkerScanner {
    markers: MarkerSet,
    window: VecDeque<u8>,
}

impl MarkerScanner {
    pub fn new(markers: MarkerSet) -> Self {
        let window = VecDeque::with_capacity(markers.longest());
        Self { markers, window }
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// 从当前位置向后读取，直到某个标记的最后一个字节被读入。
    ///
    /// 返回 `Ok(Some(..))` 时，流恰好停在标记之后；
    /// 流在匹配之前耗尽则返回 `Ok(None)`。
    /// 每次调用都从空窗口开始，不会与上一次调用读过的字节拼接。
    pub fn find_next_marker<R: Read>(&mut self, reader: &mut R) -> io::Result<Option<MarkerMatch>> {
        self.window.clear();
        let mut consumed = 0u64;

        loop {
            let byte = match reader.read_u8() {
                Ok(byte) => byte,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e),
            };
            consumed += 1;

            if self.window.len() == self.markers.longest() {
                self.window.pop_front();
            }
            self.window.push_back(byte);

            let window = self.window.make_contiguous();
            if let Some(marker_index) = self
                .markers
                .markers()
                .iter()
                .position(|marker| window.ends_with(marker))
            {
                return Ok(Some(MarkerMatch {
                    marker_index,
                    consumed,
                }));
            }
        }
    }
}
