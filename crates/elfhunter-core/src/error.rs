//! 错误类型（按文件局部错误与整次运行致命错误区分）
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 扫描过程中的错误
///
/// `NotAFile` / `CannotOpen` / `ReadFailure` / `SeekFailure` / `BufferAlloc` / `Walk` 仅影响单个文件或目录，
/// 由扫描主流程记录后跳过；其余变体在遍历开始前出现，属于整次运行的致命错误。
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("path does not point to a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },

    #[error("could not open {}", .path.display())]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read from {}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 回退重叠窗口失败：不完整的扫描不能当作“未命中”
    #[error("could not seek in {}", .path.display())]
    SeekFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not allocate a {size}-byte chunk buffer for {}", .path.display())]
    BufferAlloc { path: PathBuf, size: usize },

    #[error("signature file is empty: {}", .path.display())]
    EmptySignature { path: PathBuf },

    #[error("chunk size {chunk_size} is smaller than the signature length {signature_len}")]
    ChunkTooSmall { chunk_size: usize, signature_len: usize },

    #[error("scan root does not exist: {}", .path.display())]
    RootNotFound { path: PathBuf },

    #[error("scan root is not readable: {}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("directory traversal failed")]
    Walk(#[from] walkdir::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = ScanError::RootNotFound { path: PathBuf::from("/no/such/dir") };
        assert_eq!(err.to_string(), "scan root does not exist: /no/such/dir");
    }

    #[test]
    fn io_cause_is_kept_as_source() {
        use std::error::Error as _;
        let err = ScanError::ReadFailure {
            path: PathBuf::from("/bin/ls"),
            source: io::Error::new(io::ErrorKind::Other, "device gone"),
        };
        assert_eq!(err.to_string(), "could not read from /bin/ls");
        assert_eq!(err.source().unwrap().to_string(), "device gone");
    }
}
