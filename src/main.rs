//! VPK CLI - Command-line tool for Valve packed archives.
//!
//! This is the main entry point for the `vpk` command-line application.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::{MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use sha1::{Digest, Sha1};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use vpk::prelude::*;

/// Entries read per parallel extraction batch.
const EXTRACT_BATCH: usize = 64;

/// VPK - Valve packed archive tool
#[derive(Parser)]
#[command(name = "vpk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contents of a VPK archive
    List {
        /// Path to the directory file (usually *_dir.vpk)
        #[arg(short = 'f', long, env = "VPK_FILE")]
        vpk: PathBuf,

        /// Filter pattern (glob-style, case-insensitive)
        #[arg(long)]
        filter: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Print the SHA-1 of every file in a VPK archive
    Sha1sum {
        /// Path to the directory file (usually *_dir.vpk)
        #[arg(short = 'f', long, env = "VPK_FILE")]
        vpk: PathBuf,

        /// Filter pattern (glob-style, case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Extract files from a VPK archive
    Extract {
        /// Path to the directory file (usually *_dir.vpk)
        #[arg(short = 'f', long, env = "VPK_FILE")]
        vpk: PathBuf,

        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: PathBuf,

        /// Filter pattern (glob-style, case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show archive summary
    Info {
        /// Path to the directory file (usually *_dir.vpk)
        #[arg(short = 'f', long, env = "VPK_FILE")]
        vpk: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::List { vpk, filter, detailed } => {
            cmd_list(&vpk, filter.as_deref(), detailed)?;
        }
        Commands::Sha1sum { vpk, filter } => {
            cmd_sha1sum(&vpk, filter.as_deref())?;
        }
        Commands::Extract { vpk, output, filter } => {
            cmd_extract(&vpk, &output, filter.as_deref())?;
        }
        Commands::Info { vpk } => {
            cmd_info(&vpk)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_archive(path: &Path) -> Result<VpkArchive> {
    let start = Instant::now();
    let archive = VpkArchive::open(path)
        .with_context(|| format!("Failed to open VPK archive {}", path.display()))?;
    debug!(
        entries = archive.entry_count(),
        elapsed = ?start.elapsed(),
        "loaded archive"
    );
    Ok(archive)
}

/// Entries matching `filter`, sorted by canonical name.
fn select_entries<'a>(
    archive: &'a VpkArchive,
    filter: Option<&str>,
) -> Result<Vec<(String, &'a VpkEntry)>> {
    let pattern = filter
        .map(Pattern::new)
        .transpose()
        .context("Invalid filter pattern")?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut selected: Vec<_> = archive
        .iter()
        .map(|entry| (entry.full_path(), entry))
        .filter(|(name, _)| {
            pattern
                .as_ref()
                .map_or(true, |p| p.matches_with(name, options))
        })
        .collect();
    selected.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(selected)
}

fn cmd_list(vpk_path: &Path, filter: Option<&str>, detailed: bool) -> Result<()> {
    let archive = open_archive(vpk_path)?;
    let entries = select_entries(&archive, filter)?;

    for (name, entry) in &entries {
        if detailed {
            let location = if entry.is_inline() {
                "dir".to_string()
            } else {
                format!("{:03}", entry.archive_index())
            };
            println!(
                "{:>5} {:>6} {:>12} {:08x} {}",
                location,
                entry.preload().len(),
                entry.total_len(),
                entry.crc(),
                name
            );
        } else {
            println!("{}", name);
        }
    }

    println!("\nTotal: {} entries", entries.len());

    Ok(())
}

fn cmd_sha1sum(vpk_path: &Path, filter: Option<&str>) -> Result<()> {
    let archive = open_archive(vpk_path)?;
    let entries = select_entries(&archive, filter)?;

    let digests: Vec<Result<String>> = entries
        .par_iter()
        .map(|(name, entry)| {
            let mut reader = archive
                .open_entry(entry, vpk_path)
                .with_context(|| format!("Failed to open {}", name))?;
            let mut sha = Sha1::new();
            io::copy(&mut reader, &mut sha).with_context(|| format!("Failed to read {}", name))?;
            Ok(hex::encode(sha.finalize()))
        })
        .collect();

    for ((name, _), digest) in entries.iter().zip(digests) {
        println!("{}  {}", digest?, name);
    }

    Ok(())
}

fn cmd_extract(vpk_path: &Path, output: &Path, filter: Option<&str>) -> Result<()> {
    println!("Opening VPK archive: {}", vpk_path.display());

    let archive = open_archive(vpk_path)?;
    let entries = select_entries(&archive, filter)?;

    println!("Extracting {} entries...", entries.len());

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    fs::create_dir_all(output)?;

    let start = Instant::now();
    let mut skipped = 0;
    for batch in entries.chunks(EXTRACT_BATCH) {
        let refs: Vec<&VpkEntry> = batch.iter().map(|(_, entry)| *entry).collect();
        let results = archive.read_parallel(&refs, vpk_path);

        for ((name, _), data) in batch.iter().zip(results) {
            let data = data.with_context(|| format!("Failed to read {}", name))?;

            match output_path(output, name) {
                Some(output_path) => {
                    if let Some(parent) = output_path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(&output_path, data)
                        .with_context(|| format!("Failed to write {}", output_path.display()))?;
                }
                None => {
                    warn!(name = %name, "skipping entry with unsafe path");
                    skipped += 1;
                }
            }

            pb.inc(1);
        }
    }

    pb.finish_with_message("Done");
    println!(
        "Extraction completed in {:?} ({} skipped)",
        start.elapsed(),
        skipped
    );

    Ok(())
}

fn cmd_info(vpk_path: &Path) -> Result<()> {
    let archive = open_archive(vpk_path)?;

    let inline = archive.iter().filter(|e| e.is_inline()).count();
    let mut parts: Vec<u16> = archive
        .iter()
        .filter(|e| !e.is_inline())
        .map(|e| e.archive_index())
        .collect();
    parts.sort_unstable();
    parts.dedup();
    let preload: u64 = archive.iter().map(|e| e.preload().len() as u64).sum();
    let total: u64 = archive.iter().map(|e| e.total_len()).sum();

    println!("File:           {}", vpk_path.display());
    println!("Tree offset:    {}", archive.tree_offset());
    println!("Entries:        {}", archive.entry_count());
    println!("Inline entries: {}", inline);
    println!("Archive parts:  {}", parts.len());
    println!("Preload bytes:  {}", preload);
    println!("Content bytes:  {}", total);

    Ok(())
}

/// Destination of `name` under `output`, or `None` if it would escape it.
fn output_path(output: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    if relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        Some(output.join(relative))
    } else {
        None
    }
}
