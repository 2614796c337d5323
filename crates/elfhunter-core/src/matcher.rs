//! 流式特征码匹配（定长分块 + 回退重叠窗口）
//!
//! 每次读满一个块后在块内做精确子串搜索；若块是满的（可能不是最后一块），
//! 则把读位置回退 |signature| - 1 字节再读下一块，使任意跨块边界的匹配
//! 完整落在某一次读取的窗口内。内存占用只与块大小有关，与文件大小无关。
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use memchr::memmem::Finder;
use tracing::debug;

use crate::classify::is_elf_stream;
use crate::error::ScanError;
use crate::signature::Signature;
use crate::types::Verdict;

/// 尽量读满 `buf`：短读不代表流结束，只有读到 0 字节才停止。
/// 返回值小于 `buf.len()` 即说明已到流末尾。
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// 读取元数据并确认是常规文件：不存在视为 `NotAFile`，其余失败（如权限不足）视为 `CannotOpen`
pub(crate) fn regular_file_metadata(path: &Path) -> Result<fs::Metadata, ScanError> {
    let md = fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ScanError::NotAFile { path: path.to_path_buf() },
        _ => ScanError::CannotOpen { path: path.to_path_buf(), source },
    })?;
    if !md.is_file() {
        return Err(ScanError::NotAFile { path: path.to_path_buf() });
    }
    Ok(md)
}

/// 分配块缓冲区；分配失败作为错误返回而不是直接中止进程
fn chunk_buffer(size: usize, path: &Path) -> Result<Vec<u8>, ScanError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| ScanError::BufferAlloc { path: path.to_path_buf(), size })?;
    buf.resize(size, 0);
    Ok(buf)
}

/// 特征码匹配器（每次运行构建一次，跨文件复用；块缓冲区按文件分配）
pub struct SignatureMatcher {
    finder: Finder<'static>,
    overlap: usize,
    chunk_size: usize,
}

impl SignatureMatcher {
    /// 块大小必须不小于特征码长度，否则回退后无法前进
    pub fn new(signature: &Signature, chunk_size: usize) -> Result<Self, ScanError> {
        if chunk_size < signature.len() {
            return Err(ScanError::ChunkTooSmall { chunk_size, signature_len: signature.len() });
        }
        Ok(Self {
            finder: Finder::new(signature.as_bytes()).into_owned(),
            overlap: signature.overlap(),
            chunk_size,
        })
    }

    /// 在流中搜索特征码（从当前位置开始），命中即返回
    /// - `path` 仅用于错误信息
    /// - 读错误与回退失败都作为错误返回，绝不当作“未命中”
    pub fn contains<R: Read + Seek>(&self, reader: &mut R, path: &Path) -> Result<bool, ScanError> {
        self.search(reader, path, self.chunk_size)
    }

    /// 已知文件长度时缓冲区不超过 `len + 1`（一次读完即可判定到达末尾），
    /// 但不小于特征码长度，文件在扫描中变长时仍能前进
    fn capacity_for(&self, len: u64) -> usize {
        let fit = usize::try_from(len).map_or(usize::MAX, |l| l.saturating_add(1));
        fit.min(self.chunk_size).max(self.overlap + 1)
    }

    fn search<R: Read + Seek>(&self, reader: &mut R, path: &Path, capacity: usize) -> Result<bool, ScanError> {
        let mut buf = chunk_buffer(capacity, path)?;
        // 回退距离严格小于块大小，i64 足够表示
        let back = -(self.overlap as i64);

        loop {
            let n = read_full(reader, &mut buf)
                .map_err(|source| ScanError::ReadFailure { path: path.to_path_buf(), source })?;

            if self.finder.find(&buf[..n]).is_some() {
                return Ok(true);
            }
            // 未读满（含 0 字节）即最后一块
            if n < buf.len() {
                return Ok(false);
            }
            if self.overlap > 0 {
                reader
                    .seek(SeekFrom::Current(back))
                    .map_err(|source| ScanError::SeekFailure { path: path.to_path_buf(), source })?;
            }
        }
    }

    /// 检查单个文件：一次打开，先判定 ELF，再回到开头搜索
    pub fn scan_file(&self, path: &Path, max_file_size: Option<u64>) -> Result<Verdict, ScanError> {
        let md = regular_file_metadata(path)?;
        if let Some(max) = max_file_size {
            if md.len() > max {
                debug!(path = %path.display(), size = md.len(), max, "file exceeds size limit, skipped");
                return Ok(Verdict::Skipped);
            }
        }

        let mut file = File::open(path)
            .map_err(|source| ScanError::CannotOpen { path: path.to_path_buf(), source })?;
        if !is_elf_stream(&mut file, path)? {
            return Ok(Verdict::NotElf);
        }
        if self.search(&mut file, path, self.capacity_for(md.len()))? {
            Ok(Verdict::Infected)
        } else {
            Ok(Verdict::Clean)
        }
    }
}
