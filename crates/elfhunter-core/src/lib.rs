//! ELF 特征码扫描核心库
//!
//! 设计要点：
//! - 只检查 4 字节魔数判定 ELF，不解析头部结构。
//! - 定长分块流式读取，块间回退 |signature| - 1 字节，保证跨块匹配不漏检，内存占用与文件大小无关。
//! - 单线程深度优先遍历，命中按遍历顺序输出；单文件错误记录后跳过，不中断整次扫描。

mod classify;
mod error;
mod matcher;
mod options;
mod report;
mod scan;
mod signature;
mod types;
mod walk;

pub use classify::{is_elf, is_elf_stream, ELF_MAGIC};
pub use error::ScanError;
pub use matcher::SignatureMatcher;
pub use options::{OutputFormat, ScanOptions, ScanStats, DEFAULT_CHUNK_SIZE};
pub use report::Reporter;
pub use scan::{scan_and_report, scan_paths};
pub use signature::{load_signature, Signature};
pub use types::{OutputItem, Verdict};
pub use walk::candidate_files;
