//! Comet plugin manager CLI
//!
//! Thin presentation-boundary consumer of the plugin engine: wires the
//! concrete collaborators, drives one load (with the automatic first-run
//! update check), and renders the resulting registry.

mod display;
mod probe;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use comet_core::builtin::{BuiltinCatalog, BuiltinPluginInfo};
use comet_core::scan::DirectoryScanner;
use comet_core::store::JsonFileStore;
use comet_core::{Config, PluginService, StatusSink};
use tracing_subscriber::{filter::EnvFilter, fmt};

use probe::GitCliProbe;

#[derive(Parser, Debug)]
#[command(name = "comet-plugins", about = "Inspect Comet's plugin registry and check for updates")]
struct Args {
    /// Root directory for host state
    #[arg(long, default_value = "./comet_data")]
    data_dir: PathBuf,

    /// Directory holding installed plugin folders (defaults to
    /// <data-dir>/plugins)
    #[arg(long)]
    plugins_dir: Option<PathBuf>,

    /// Metadata store file, relative to the data dir unless absolute
    #[arg(long, default_value = "plugins.json")]
    store_file: String,

    /// Skip the automatic update check
    #[arg(long)]
    skip_update_check: bool,

    /// Cap on concurrently running update probes
    #[arg(long, default_value_t = 8)]
    max_concurrent_probes: usize,
}

/// Progress sink printing loading text to stderr
struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn loading_changed(&self, loading: bool, label: Option<&str>) {
        if loading {
            if let Some(label) = label {
                eprintln!("{}", label.dimmed());
            }
        }
    }

    fn update_check(&self, _has_updates: bool, _checking: Option<bool>) {
        // The summary is printed from the final record list
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config {
        plugins_dir: args
            .plugins_dir
            .unwrap_or_else(|| args.data_dir.join("plugins"))
            .to_string_lossy()
            .into_owned(),
        data_dir: args.data_dir.to_string_lossy().into_owned(),
        store_file: args.store_file,
        max_concurrent_probes: args.max_concurrent_probes,
        initial_update_check: !args.skip_update_check,
    };

    let store = Arc::new(JsonFileStore::new(config.store_path()));
    let scanner = Arc::new(DirectoryScanner::new(config.plugins_path()));
    let builtins = Arc::new(BuiltinCatalog::new());
    register_builtins(&builtins);
    let probe = Arc::new(GitCliProbe::new(config.plugins_path()));

    let service = PluginService::new(&config, store, scanner, builtins, probe);
    let sink = ConsoleSink;

    let records = match service.load(&sink).await {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{} {}", "Failed to load plugins:".bright_red(), e);
            return Err(e.into());
        }
    };

    if records.is_empty() {
        println!("{}", "No plugins installed".dimmed());
        return Ok(());
    }

    println!("{}", display::registry_table(&records));
    display::print_summary(&records, service.session().last_checked());

    Ok(())
}

/// The plugin set compiled into this build of the host
fn register_builtins(catalog: &BuiltinCatalog) {
    catalog.register(BuiltinPluginInfo::new(
        "command-palette",
        "Fuzzy access to every host command",
    ));
    catalog.register(BuiltinPluginInfo::new(
        "markdown-preview",
        "Live preview for markdown buffers",
    ));
    catalog.register(BuiltinPluginInfo::new(
        "vim-mode",
        "Modal editing keybindings",
    ));
}
