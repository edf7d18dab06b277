//! Pinsight CLI - IC pinout reports from design snapshot files.

use clap::{Parser, Subcommand, ValueEnum};
use pinsight::host::snapshot::SnapshotHost;
use pinsight::{ExportOptions, ExportOutcome, PinNetIndex, PinoutExporter};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pinsight")]
#[command(about = "IC pinout report generator for schematic designs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a pinout report from a design snapshot
    Export {
        /// Path to the design snapshot JSON
        #[arg(value_name = "DESIGN")]
        design: PathBuf,

        /// Path to the exported net-list JSON
        #[arg(short, long, value_name = "FILE")]
        netlist: Option<PathBuf>,

        /// Directory the report is written to
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Designator prefix to export (repeatable; default "U")
        #[arg(long = "prefix", value_name = "PREFIX")]
        prefixes: Vec<String>,
    },

    /// Print the pin-to-net index resolved from a net-list file
    Netmap {
        /// Path to the net-list JSON
        #[arg(value_name = "FILE")]
        netlist: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One "key -> net" line per pin
    Human,
    /// JSON object keyed by "designator-pin"
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Export {
            design,
            netlist,
            out_dir,
            prefixes,
        } => handle_export(&design, netlist.as_deref(), &out_dir, prefixes).await,
        Commands::Netmap { netlist, format } => handle_netmap(&netlist, format),
    };

    process::exit(exit_code);
}

fn read_file(path: &Path) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: cannot read {}: {}", path.display(), e);
        1
    })
}

async fn handle_export(
    design: &Path,
    netlist: Option<&Path>,
    out_dir: &Path,
    prefixes: Vec<String>,
) -> i32 {
    let raw_design = match read_file(design) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let raw_netlist = match netlist {
        Some(path) => match read_file(path) {
            Ok(s) => Some(s),
            Err(code) => return code,
        },
        None => None,
    };

    let host = match SnapshotHost::from_json(&raw_design, raw_netlist) {
        Ok(host) => Arc::new(host),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut options = ExportOptions::default();
    if !prefixes.is_empty() {
        options.designator_prefixes = prefixes;
    }

    let outcome = PinoutExporter::run(host.clone(), options).await;

    for (file_name, contents) in host.saved_reports() {
        if let Err(e) = std::fs::create_dir_all(out_dir) {
            eprintln!("Error: cannot create {}: {}", out_dir.display(), e);
            return 1;
        }
        let path = out_dir.join(&file_name);
        if let Err(e) = std::fs::write(&path, contents) {
            eprintln!("Error: cannot write {}: {}", path.display(), e);
            return 1;
        }
        println!("Wrote {}", path.display());
    }

    for notice in host.notices() {
        println!("{}", notice);
    }

    match outcome {
        ExportOutcome::Failed(_) => 1,
        _ => 0,
    }
}

fn handle_netmap(netlist: &Path, format: OutputFormat) -> i32 {
    let raw = match read_file(netlist) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let index = PinNetIndex::parse(&raw);

    match format {
        OutputFormat::Human => {
            let mut entries: Vec<(&str, &str)> = index.iter().collect();
            entries.sort();
            for (key, net) in entries {
                println!("{} -> {}", key, net);
            }
            println!("{} pin(s) mapped", index.len());
        }
        OutputFormat::Json => {
            let map: BTreeMap<&str, &str> = index.iter().collect();
            println!("{}", serde_json::to_string_pretty(&map).unwrap());
        }
    }
    0
}
