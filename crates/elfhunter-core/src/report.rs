//! 命中报告（只输出命中文件，写失败只记日志，不中断扫描）
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use tracing::warn;

use crate::options::OutputFormat;
use crate::types::OutputItem;

pub struct Reporter<'w> {
    out: &'w mut dyn Write,
    format: OutputFormat,
}

impl<'w> Reporter<'w> {
    pub fn new(out: &'w mut dyn Write, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// 报告一个文件的结论；`matched` 为 false 时不输出任何内容
    pub fn report(&mut self, path: &Path, matched: bool) {
        if !matched {
            return;
        }
        if let Err(e) = self.write_line(path) {
            warn!(path = %path.display(), error = %e, "failed to write report line");
        }
    }

    fn write_line(&mut self, path: &Path) -> anyhow::Result<()> {
        match self.format {
            // 文本格式原样输出路径字节，非 UTF-8 文件名也能与磁盘上的路径对应
            OutputFormat::Text => {
                self.out.write_all(&path_bytes(path))?;
                self.out.write_all(b" is infected!\n")?;
            }
            OutputFormat::Json => {
                let display = path.to_string_lossy();
                let item = OutputItem { path: &display, verdict: "infected" };
                serde_json::to_writer(&mut *self.out, &item)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "failed to flush report output");
        }
    }
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn text_line_only_for_positives() {
        let mut out = Vec::new();
        {
            let mut r = Reporter::new(&mut out, OutputFormat::Text);
            r.report(Path::new("/bin/clean"), false);
            r.report(Path::new("/bin/evil"), true);
        }
        assert_eq!(String::from_utf8(out).unwrap(), "/bin/evil is infected!\n");
    }

    #[test]
    fn json_lines() {
        let mut out = Vec::new();
        {
            let mut r = Reporter::new(&mut out, OutputFormat::Json);
            r.report(Path::new("/bin/evil"), true);
        }
        let line = String::from_utf8(out).unwrap();
        let v: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(v["path"], "/bin/evil");
        assert_eq!(v["verdict"], "infected");
    }

    #[cfg(unix)]
    #[test]
    fn text_keeps_non_utf8_path_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let path = Path::new(OsStr::from_bytes(b"/tmp/bad\xFFname"));
        let mut out = Vec::new();
        {
            let mut r = Reporter::new(&mut out, OutputFormat::Text);
            r.report(path, true);
        }
        assert_eq!(out, b"/tmp/bad\xFFname is infected!\n".to_vec());
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn write_errors_do_not_panic() {
        let mut sink = Closed;
        let mut r = Reporter::new(&mut sink, OutputFormat::Text);
        r.report(Path::new("/bin/evil"), true);
        r.flush();
    }
}
