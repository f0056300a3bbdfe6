use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use mhash_cli::config::{AppConfig, ConfigManager};
use mhash_cli::output::{FileReport, OutputFormat, create_formatter};
use mhash_cli::progress::{self, render_progress};
use mhash_cli::terminal::Terminal;
use mhash_core::{
    CancellationToken, ChannelProvider, FileHasher, HashAlgorithm, ProgressProvider, hash_files,
};
use std::path::PathBuf;
use std::time::Duration;

/// Progress updates buffered between the hashing tasks and the renderer
const PROGRESS_CHANNEL_CAPACITY: usize = 100;

#[derive(Parser)]
#[command(name = "mhash")]
#[command(author, version, about = "Streaming multi-algorithm file hasher (MD5, SHA-1, CRC-32, eD2K)", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate hash(es) for file(s)
    Hash {
        /// Files to hash
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Hash algorithm to print
        #[arg(short, long, value_enum, default_value = "all")]
        algorithm: HashAlgorithmArg,

        /// Output format [default: output.default_format from the config]
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Disable progress bar display
        #[arg(long)]
        no_progress: bool,

        /// Give up after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Print every effective value as `section.key = value`
    List,

    /// Print one configuration value
    Get {
        /// Configuration key (e.g., hasher.buffer_size)
        key: String,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum HashAlgorithmArg {
    Md5,
    Sha1,
    Crc32,
    Ed2k,
    All,
}

impl From<HashAlgorithmArg> for Vec<HashAlgorithm> {
    fn from(arg: HashAlgorithmArg) -> Self {
        match arg {
            HashAlgorithmArg::Md5 => vec![HashAlgorithm::MD5],
            HashAlgorithmArg::Sha1 => vec![HashAlgorithm::SHA1],
            HashAlgorithmArg::Crc32 => vec![HashAlgorithm::CRC32],
            HashAlgorithmArg::Ed2k => vec![HashAlgorithm::ED2K],
            HashAlgorithmArg::All => HashAlgorithm::ALL.to_vec(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("mhash_core", log::LevelFilter::Debug)
            .filter_module("mhash_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Commands::Hash {
            files,
            algorithm,
            format,
            no_progress,
            timeout,
        } => {
            let config = ConfigManager::new()
                .load()
                .context("Failed to load configuration")?;
            hash_command(config, files, algorithm, format, no_progress, timeout).await?;
        }
        Commands::Config { command } => {
            config_command(command)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

async fn hash_command(
    config: AppConfig,
    files: Vec<PathBuf>,
    algorithm: HashAlgorithmArg,
    format: Option<OutputFormat>,
    no_progress: bool,
    timeout: Option<u64>,
) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => config.output.default_format.parse()?,
    };
    let term = Terminal::detect();
    let use_color = term.use_color(config.output.color_enabled);
    colored::control::set_override(use_color);

    let hasher = FileHasher::from_config(config.hasher.clone())
        .context("Failed to create file hasher")?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::debug!("Ctrl-C received, cancelling");
                cancel.cancel();
            }
        });
    }
    if let Some(secs) = timeout {
        log::debug!("Timeout set to {secs}s");
        let _deadline = cancel.cancel_after(Duration::from_secs(secs));
    }

    let show_progress = term.show_progress(config.output.progress_enabled && !no_progress);

    let (channel, renderer) = if show_progress {
        let (provider, rx) = ChannelProvider::channel(PROGRESS_CHANNEL_CAPACITY);
        (Some(provider), Some(tokio::spawn(render_progress(rx))))
    } else {
        (None, None)
    };

    let batch = hash_files(
        &hasher,
        &files,
        channel.as_ref().map(|c| c as &dyn ProgressProvider),
        Some(&cancel),
    )
    .await;

    // Closing the channel lets the renderer drain and exit
    if let Some(channel) = &channel {
        channel.close();
    }
    if let Some(handle) = renderer {
        let _ = handle.await;
    }

    let mut reports = Vec::new();
    let mut failures = 0usize;
    for (path, result) in batch.results {
        match result {
            Ok(result) => reports.push(FileReport::new(path, result)),
            Err(e) => {
                failures += 1;
                if e.is_cancelled() {
                    eprintln!("{} {}: cancelled", "✗".red(), path.display());
                } else {
                    eprintln!("{} {}", "✗".red(), e.to_string().red());
                }
            }
        }
    }

    let algorithms: Vec<HashAlgorithm> = algorithm.into();
    let formatter = create_formatter(format, use_color, &algorithms);
    if !reports.is_empty() {
        let output = formatter.format_batch(&reports)?;
        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
    }

    if term.interactive && format == OutputFormat::Text {
        let total_bytes: u64 = reports.iter().map(|r| r.result.file_size).sum();
        eprintln!(
            "\n{} {}",
            "Hashed".bold().green(),
            progress::format_summary(reports.len(), total_bytes, batch.total_time)
        );
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} file(s) failed", files.len());
    }

    Ok(())
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let manager = ConfigManager::new();

    match command {
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
        ConfigCommand::Show => {
            let config = manager.load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommand::List => {
            for (key, value) in manager.list()? {
                println!("{key} = {value}");
            }
        }
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
