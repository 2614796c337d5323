//! 扫描选项与统计信息（模块）

/// 默认分块大小：8 MiB（仅影响 I/O 次数与内存上限，不影响结果）
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// 命中报告的输出格式
/// - Text：每行 `<path> is infected!`
/// - Json：每行一个 JSON 对象，便于下游程序解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 分块大小（字节）；必须不小于特征码长度
    pub chunk_size: usize,
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 是否跟随符号链接（开启后由 walkdir 检测目录环）
    pub follow_links: bool,
    /// 输出格式
    pub format: OutputFormat,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_file_size: None,
            follow_links: false,
            format: OutputFormat::Text,
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// 遍历到的常规文件数
    pub files_seen: usize,
    /// 其中的 ELF 文件数
    pub elf_files: usize,
    /// 命中特征码的文件数
    pub infected: usize,
    /// 因大小限制跳过的文件数
    pub skipped: usize,
    /// 无法检查的文件/目录数（已记录日志并跳过）
    pub errors: usize,
}
