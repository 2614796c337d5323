//! 扫描主流程（单线程，按遍历顺序逐个文件检查并报告）
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::matcher::SignatureMatcher;
use crate::options::{ScanOptions, ScanStats};
use crate::report::Reporter;
use crate::signature::Signature;
use crate::types::Verdict;
use crate::walk::candidate_files;

/// 扫描 `root` 并把命中文件逐行写入 `out`
/// - 致命错误（块大小非法、根路径不存在或不可读）在遍历开始前返回
/// - 单个文件/目录的错误只记录日志（诊断通道），不影响其余文件
pub fn scan_and_report(root: &Path, signature: &Signature, out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let matcher = SignatureMatcher::new(signature, opts.chunk_size).context("invalid chunk size")?;
    let files = candidate_files(root, opts.follow_links).context("cannot start traversal")?;
    Ok(report_candidates(files, &matcher, out, opts))
}

/// 按给定顺序检查候选路径并报告命中（遍历与检查之间文件可能已被删除或替换）
pub fn scan_paths<I>(paths: I, signature: &Signature, out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats>
where
    I: IntoIterator<Item = Result<PathBuf, ScanError>>,
{
    let matcher = SignatureMatcher::new(signature, opts.chunk_size).context("invalid chunk size")?;
    Ok(report_candidates(paths, &matcher, out, opts))
}

fn report_candidates<I>(files: I, matcher: &SignatureMatcher, out: &mut dyn Write, opts: &ScanOptions) -> ScanStats
where
    I: IntoIterator<Item = Result<PathBuf, ScanError>>,
{
    let mut reporter = Reporter::new(out, opts.format);
    let mut stats = ScanStats::default();

    for entry in files {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                stats.errors += 1;
                warn!(error = %e, cause = ?std::error::Error::source(&e), "skipping unreadable entry");
                continue;
            }
        };
        stats.files_seen += 1;

        match matcher.scan_file(&path, opts.max_file_size) {
            Ok(verdict) => {
                debug!(path = %path.display(), ?verdict, "file checked");
                match verdict {
                    Verdict::Infected => {
                        stats.elf_files += 1;
                        stats.infected += 1;
                    }
                    Verdict::Clean => stats.elf_files += 1,
                    Verdict::Skipped => stats.skipped += 1,
                    Verdict::NotElf => {}
                }
                reporter.report(&path, verdict == Verdict::Infected);
            }
            Err(e) => {
                stats.errors += 1;
                warn!(path = %path.display(), error = %e, cause = ?std::error::Error::source(&e), "skipping file");
            }
        }
    }

    reporter.flush();
    stats
}
