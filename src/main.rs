use clap::Parser;
use std::process::ExitCode;
use webp_batch::cli::{execute_convert, exit_code, setup_logging, Cli, ConvertConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match execute_convert(ConvertConfig::from(&cli)).await {
        Ok(summary) => {
            if summary.has_errors() && !cli.quiet {
                println!("⚠️  {}個のファイルでエラーが発生しました", summary.error_count);
            }
            ExitCode::from(exit_code(&summary, cli.strict))
        }
        Err(error) => {
            eprintln!("❌ エラー: {error:#}");
            ExitCode::FAILURE
        }
    }
}
