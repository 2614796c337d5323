use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use elfhunter_core::{load_signature, scan_and_report, OutputFormat, ScanOptions, DEFAULT_CHUNK_SIZE};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "elfhunter", version, about = "Find ELF binaries containing a byte signature")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描目录（或单个文件），输出命中的 ELF 文件
    Scan {
        /// 根路径：目录则递归扫描，文件则只检查该文件
        root: PathBuf,

        /// 特征码文件：文件的全部原始字节即为特征码
        signature: PathBuf,

        /// 分块大小（字节），不得小于特征码长度
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// 最大扫描文件大小（字节），超过则跳过
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 跟随符号链接
        #[arg(long)]
        follow_links: bool,

        /// 输出格式
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// 输出文件；缺省写到标准输出
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    // 日志写到 stderr，stdout 只留给命中报告（支持 RUST_LOG 控制等级）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { root, signature, chunk_size, max_file_size, follow_links, format, output } => {
            // 特征码加载失败对整次运行是致命的，必须在遍历前返回
            let sig = load_signature(&signature)
                .with_context(|| format!("cannot load signature from {}", signature.display()))?;
            info!(?root, signature_len = sig.len(), chunk_size, "scanning");

            let mut out: Box<dyn Write> = match &output {
                Some(p) => Box::new(BufWriter::new(File::create(p).context("create output file")?)),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };

            let opts = ScanOptions { chunk_size, max_file_size, follow_links, format: format.into() };
            let stats = scan_and_report(&root, &sig, &mut out, &opts).context("scan failed")?;

            info!(
                files_seen = stats.files_seen,
                elf_files = stats.elf_files,
                infected = stats.infected,
                skipped = stats.skipped,
                errors = stats.errors,
                "scan finished"
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
