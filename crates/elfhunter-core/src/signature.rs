//! 特征码加载
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ScanError;
use crate::matcher::regular_file_metadata;

/// 待搜索的特征码（非空字节序列，加载后不可变）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// 由字节构建特征码；空序列返回 `None`
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return None;
        }
        Some(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 恒为 false，保留以配合 `len`
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 跨块重叠字节数：|signature| - 1
    pub fn overlap(&self) -> usize {
        self.bytes.len() - 1
    }
}

/// 从文件加载特征码：文件的全部原始字节即为特征码（含 0 字节，不做任何解码/裁剪）
pub fn load_signature(path: &Path) -> Result<Signature, ScanError> {
    regular_file_metadata(path)?;
    let mut file = File::open(path)
        .map_err(|source| ScanError::CannotOpen { path: path.to_path_buf(), source })?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|source| ScanError::ReadFailure { path: path.to_path_buf(), source })?;

    Signature::new(buf).ok_or_else(|| ScanError::EmptySignature { path: path.to_path_buf() })
}
