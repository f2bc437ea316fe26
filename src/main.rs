use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use filemerge::export::{self, ExportData, ExportFormat};
use filemerge::{FileMerger, MergeOptions, MergeStrategy, TracingObserver};

#[derive(Parser)]
#[command(name = "filemerge")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Merge text files into one output, ordered by their require directives", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge every file under ROOT into OUTPUT
    Merge {
        /// Directory to scan
        root: PathBuf,

        /// File to write (overwritten if it exists)
        output: PathBuf,

        /// Read strategy: in-memory or streaming
        #[arg(short, long, default_value = "in-memory")]
        strategy: MergeStrategy,

        /// Also emit files that neither require nor are required by anything
        #[arg(long)]
        include_standalone: bool,

        /// Extension of merge candidates
        #[arg(long, default_value = "txt")]
        ext: String,

        /// Print the merge report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved order without merging
    Plan {
        /// Directory to scan
        root: PathBuf,

        /// Output format: text, json, markdown
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also list files that neither require nor are required by anything
        #[arg(long)]
        include_standalone: bool,

        /// Extension of merge candidates
        #[arg(long, default_value = "txt")]
        ext: String,
    },
    /// Show version information
    Version,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FILEMERGE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "filemerge=debug,warn"
        } else {
            "filemerge=info,warn"
        })
    });

    let format = env::var("FILEMERGE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Merge {
            root,
            output,
            strategy,
            include_standalone,
            ext,
            json,
        }) => {
            let options = MergeOptions::default()
                .with_strategy(strategy)
                .with_include_standalone(include_standalone)
                .with_extension(ext);
            let report = FileMerger::with_options(options)
                .with_observer(TracingObserver)
                .merge(&root, &output)
                .with_context(|| format!("Failed to merge {}", root.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Merged {} files into {} ({} bytes)",
                    report.order.len(),
                    report.output.display(),
                    report.bytes_written
                );
            }
        }
        Some(Commands::Plan {
            root,
            format,
            output,
            include_standalone,
            ext,
        }) => {
            let options = MergeOptions::default()
                .with_include_standalone(include_standalone)
                .with_extension(ext);
            let plan = FileMerger::with_options(options)
                .with_observer(TracingObserver)
                .plan(&root)
                .with_context(|| format!("Failed to plan {}", root.display()))?;

            for file in plan.missing() {
                warn!(file, "required file was not discovered, merging will fail");
            }

            let rendered = export::export_to_string(format, &ExportData::from_plan(&plan))?;
            match output {
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{rendered}"),
            }
        }
        Some(Commands::Version) => {
            println!("filemerge v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("filemerge - merge text files in dependency order");
            println!("Run 'filemerge merge <ROOT> <OUTPUT>' to merge a directory");
            println!("Run 'filemerge --help' for more information");
        }
    }

    Ok(())
}
