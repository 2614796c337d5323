//! 公共类型（对外暴露）
use serde::Serialize;

/// 单个文件的检查结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 不是 ELF（含不足 4 字节的文件），未做搜索
    NotElf,
    /// ELF，未找到特征码
    Clean,
    /// ELF，找到特征码
    Infected,
    /// 超过大小上限，未检查
    Skipped,
}

/// JSON 输出项（每个命中文件一行）
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub path: &'a str,
    pub verdict: &'static str,
}
