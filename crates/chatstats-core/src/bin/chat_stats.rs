use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chatstats_core::{ChatStatistics, LinkMode, StatsConfig, StatsResult};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LinkModeArg {
    Offset,
    Direct,
}

impl From<LinkModeArg> for LinkMode {
    fn from(value: LinkModeArg) -> Self {
        match value {
            LinkModeArg::Offset => LinkMode::Offset,
            LinkModeArg::Direct => LinkMode::Direct,
        }
    }
}

#[derive(Parser)]
#[command(name = "chat-stats")]
#[command(about = "Engagement statistics and Q&A export for chat transcripts", long_about = None)]
#[command(version)]
struct Cli {
    /// Exported chat transcript (JSON)
    export: PathBuf,

    /// Directory the reports are written to
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Number of users per ranking (overrides CHATSTATS_TOP_N)
    #[arg(long)]
    top: Option<usize>,

    /// Keyword for the filtered Q&A export; repeatable (overrides CHATSTATS_KEYWORDS)
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// Reply resolution mode (overrides CHATSTATS_LINK_MODE)
    #[arg(long, value_enum)]
    link_mode: Option<LinkModeArg>,

    /// Resolver threads (overrides CHATSTATS_WORKERS)
    #[arg(long)]
    workers: Option<usize>,

    /// Number of words in the word-count report
    #[arg(long, default_value_t = 100)]
    words: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn write_report(dir: &Path, name: &str, contents: &str) -> StatsResult<()> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(())
}

fn run(cli: Cli) -> StatsResult<()> {
    let mut config = StatsConfig::from_env()?;
    if let Some(top) = cli.top {
        config.top_n = top;
    }
    if !cli.keywords.is_empty() {
        config.keywords = cli.keywords;
    }
    if let Some(mode) = cli.link_mode {
        config.link_mode = mode.into();
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    let stats = ChatStatistics::from_path(&cli.export, config)?;
    let config = stats.config();

    std::fs::create_dir_all(&cli.out)?;
    write_report(&cli.out, "top_users.txt", &stats.top_report(config.top_n))?;
    write_report(&cli.out, "qa_full.txt", &stats.qa_export())?;
    if !config.keywords.is_empty() {
        write_report(
            &cli.out,
            "qa_filtered.txt",
            &stats.filtered_export(&config.keywords),
        )?;
    }
    write_report(&cli.out, "word_counts.txt", &stats.word_report(cli.words))?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
