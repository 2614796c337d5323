//! ELF 判定（只检查 4 字节魔数，不解析头部结构）
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::ScanError;
use crate::matcher::read_full;

/// ELF 魔数：0x7F 'E' 'L' 'F'
pub const ELF_MAGIC: [u8; 4] = [0x7F, b'E', b'L', b'F'];

/// 判定字节前缀是否为 ELF；不足 4 字节一律不是
pub fn is_elf(prefix: &[u8]) -> bool {
    prefix.len() >= ELF_MAGIC.len() && prefix[..ELF_MAGIC.len()] == ELF_MAGIC
}

/// 从当前位置读取至多 4 字节并判定，随后回到偏移 0，
/// 保证后续搜索能看到包含魔数在内的完整文件。
pub fn is_elf_stream<R: Read + Seek>(reader: &mut R, path: &Path) -> Result<bool, ScanError> {
    let mut magic = [0u8; ELF_MAGIC.len()];
    let n = read_full(reader, &mut magic)
        .map_err(|source| ScanError::ReadFailure { path: path.to_path_buf(), source })?;
    reader
        .seek(SeekFrom::Start(0))
        .map_err(|source| ScanError::SeekFailure { path: path.to_path_buf(), source })?;
    Ok(is_elf(&magic[..n]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn short_inputs_are_never_elf() {
        assert!(!is_elf(&[]));
        assert!(!is_elf(&[0x7F]));
        assert!(!is_elf(&[0x7F, b'E', b'L']));
    }

    #[test]
    fn magic_prefix_is_elf_regardless_of_tail() {
        assert!(is_elf(&ELF_MAGIC));
        assert!(is_elf(b"\x7FELF\x02\x01\x01\x00garbage"));
        assert!(!is_elf(b"\x7Felf"));
        assert!(!is_elf(b"MZ\x90\x00"));
    }

    #[test]
    fn stream_is_rewound_after_classification() {
        let mut cur = Cursor::new(b"\x7FELFpayload".to_vec());
        assert!(is_elf_stream(&mut cur, Path::new("mem")).unwrap());
        assert_eq!(cur.position(), 0);

        let mut cur = Cursor::new(b"ab".to_vec());
        assert!(!is_elf_stream(&mut cur, Path::new("mem")).unwrap());
        assert_eq!(cur.position(), 0);
    }
}
