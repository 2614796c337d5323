//! 目录遍历（基于 walkdir，深度优先）
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ScanError;

/// 枚举 `root` 下所有常规文件（递归）
/// - `root` 不存在：返回 `RootNotFound`，而不是静默地什么都不做
/// - `root` 存在但无法读取（目录无法列出/文件无法打开）：返回 `RootUnreadable`；
///   根以下的目录错误仍作为 `Walk` 逐项产出，由调用方记录后跳过
/// - `root` 本身是文件：只产出该文件
/// - 同一目录内按文件名排序，保证同一目录快照下顺序稳定
/// - 默认不跟随符号链接；开启跟随后，目录环由 walkdir 以错误形式报告
pub fn candidate_files(
    root: &Path,
    follow_links: bool,
) -> Result<impl Iterator<Item = Result<PathBuf, ScanError>>, ScanError> {
    check_root(root)?;

    let walker = WalkDir::new(root).follow_links(follow_links).sort_by_file_name();
    Ok(walker.into_iter().filter_map(|entry| match entry {
        Ok(e) if e.file_type().is_file() => Some(Ok(e.into_path())),
        Ok(_) => None,
        Err(err) => Some(Err(ScanError::Walk(err))),
    }))
}

/// 遍历前先确认根路径可访问
fn check_root(root: &Path) -> Result<(), ScanError> {
    let unreadable = |source: io::Error| match source.kind() {
        io::ErrorKind::NotFound => ScanError::RootNotFound { path: root.to_path_buf() },
        _ => ScanError::RootUnreadable { path: root.to_path_buf(), source },
    };
    let md = fs::metadata(root).map_err(unreadable)?;
    if md.is_dir() {
        fs::read_dir(root).map_err(unreadable)?;
    } else {
        File::open(root).map_err(unreadable)?;
    }
    Ok(())
}
