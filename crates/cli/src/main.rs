use anyhow::Result;
use clap::Parser;
use jpg_date_renamer_core::{process_directory, BatchError, BatchReport, ProcessOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_USAGE: u8 = 1;
const EXIT_DIRECTORY_NOT_FOUND: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "jpg-date-renamer", version)]
#[command(about = "JPG写真をEXIF撮影日時でリネームし、thumbs にサムネイルを作成します")]
struct Cli {
    /// 対象フォルダ(省略時はカレントディレクトリ)
    directory: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            // --help / --version は正常終了
            return if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = setup_logging() {
        eprintln!("ログ初期化に失敗しました: {err:#}");
    }

    run(cli)
}

fn run(cli: Cli) -> ExitCode {
    let options = ProcessOptions {
        directory: cli.directory.unwrap_or_else(|| PathBuf::from(".")),
        ..ProcessOptions::default()
    };

    match process_directory(&options) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(err @ BatchError::DirectoryNotFound(_)) => {
            error!("{err}");
            ExitCode::from(EXIT_DIRECTORY_NOT_FOUND)
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn print_summary(report: &BatchReport) {
    eprintln!(
        "集計: scanned={} jpg={} non_jpg_skip={} hidden_skip={} inaccessible_skip={}",
        report.scan.scanned_files,
        report.scan.jpg_files,
        report.scan.skipped_non_jpg,
        report.scan.skipped_hidden,
        report.scan.skipped_inaccessible,
    );
    eprintln!(
        "リネーム: renamed={} unchanged={} no_date={} malformed={} failed={}",
        report.renamed,
        report.unchanged,
        report.skipped_no_date,
        report.skipped_malformed,
        report.rename_failed,
    );
    eprintln!(
        "サムネイル: created={} failed={}",
        report.thumbnails, report.thumbnail_failed
    );
}
