use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "webp_batch")]
#[command(about = "Convert images to WebP, one file or a whole directory tree at a time")]
#[command(version)]
pub struct Cli {
    /// Image file or directory to convert
    #[arg(short, long, default_value = "input.jpg")]
    pub input: PathBuf,

    /// WebP quality (0-100), ignored with --lossless
    #[arg(
        short,
        long,
        default_value_t = 90,
        env = "WEBP_BATCH_QUALITY",
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub quality: u8,

    /// Maximum number of concurrent conversions (0 = number of CPUs)
    #[arg(short, long, default_value_t = 0, env = "WEBP_BATCH_THREADS")]
    pub threads: usize,

    /// Encode losslessly instead of using --quality
    #[arg(long)]
    pub lossless: bool,

    /// Write a JSON report of every converted or failed file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit with status 2 if any file failed to convert
    #[arg(long)]
    pub strict: bool,

    /// Suppress progress output (failed files are still reported)
    #[arg(long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
