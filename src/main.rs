use anyhow::Context;
use clap::Parser;
use classbook::config::{self, StorageConfig};
use classbook::menu;
use classbook::registry::FileRegistry;
use classbook::settings::{self, AppSettings};
use classbook::store::ClassStore;
use classbook::ui::Terminal;
use env_logger::Env;
use log::{debug, LevelFilter};
use std::path::PathBuf;

/// Class roster manager with per-class avatars and chart data folders.
#[derive(Debug, Parser)]
#[command(name = "classbook", version, about)]
struct Cli {
    /// Application home directory holding class data, settings, and the
    /// default avatar. Defaults to the per-user data directory.
    #[arg(long)]
    home: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    let _ = builder.try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let home = cli.home.unwrap_or_else(config::default_home);
    std::fs::create_dir_all(&home)
        .with_context(|| format!("failed to create application home {}", home.display()))?;
    debug!("application home {}", home.display());

    let storage = StorageConfig::under_home(&home);
    std::fs::create_dir_all(&storage.class_data_root).with_context(|| {
        format!(
            "failed to create class data root {}",
            storage.class_data_root.display()
        )
    })?;

    let settings_path = home.join(config::SETTINGS_FILE_NAME);
    let mut store = ClassStore::new(storage);
    let mut registry = FileRegistry::open(store.config());
    let mut ui = Terminal;

    match AppSettings::load(&settings_path)? {
        Some(saved) => store.set_chart_save_root(saved.chart_save_folder),
        None => {
            settings::first_run(&mut ui, &mut store, &settings_path)
                .context("first run settings flow failed")?;
        }
    }

    menu::run_main_menu(&mut store, &mut registry, &mut ui, &settings_path)
}
