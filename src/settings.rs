use crate::store::ClassStore;
use crate::ui::{Console, FolderPicker};
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Title shown by the chart save folder dialogue.
pub const CHART_SAVE_FOLDER_PROMPT: &str =
    "Please select location for chart save folder, or press cancel to use default.";

/// User preferences persisted in the application home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub chart_save_folder: PathBuf,
}

impl AppSettings {
    pub fn new(chart_save_folder: impl Into<PathBuf>) -> Self {
        Self {
            chart_save_folder: chart_save_folder.into(),
        }
    }

    /// Loads saved settings. `None` means no settings file exists yet, which
    /// is how a first run is recognised.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read settings {}", path.display()))
            }
        };
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("settings file {} is invalid JSON", path.display()))?;
        Ok(Some(settings))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write settings {}", path.display()))?;
        Ok(())
    }
}

/// First-run greeting shown before the save-folder question.
pub fn welcome_message(console: &mut impl Console) {
    console.print_line(
        "Welcome to classbook. It looks like this is your first time running the program.",
    );
    console.print_line("Would you like to set a default location to save your charts?");
    console.print_line("You can change this later in Settings.");
}

/// Asks the Y/N question. Anything other than a yes counts as no.
pub fn confirm_set_location(console: &mut impl Console) -> anyhow::Result<bool> {
    let reply = console.prompt("Type 'Y' for Yes or 'N' for No, and press enter: ")?;
    Ok(matches!(
        reply.to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Welcome message plus the confirmation question, leaving a cleared screen.
pub fn user_wants_custom_location(console: &mut impl Console) -> anyhow::Result<bool> {
    welcome_message(console);
    let choice = confirm_set_location(console)?;
    console.clear_screen(50);
    Ok(choice)
}

/// Opens the folder dialogue. Cancelling falls back to `app_default`
/// silently; a selection is confirmed on screen and returned.
pub fn choose_chart_save_folder(
    ui: &mut (impl Console + FolderPicker),
    app_default: &Path,
) -> PathBuf {
    match ui.pick_folder(CHART_SAVE_FOLDER_PROMPT, Path::new("..")) {
        Some(folder) => {
            ui.print_line(&format!(
                "Default chart save folder set to {}",
                folder.display()
            ));
            folder
        }
        None => app_default.to_path_buf(),
    }
}

/// First-run settings flow. Persists the chosen chart save folder and points
/// the store at it.
pub fn first_run(
    ui: &mut (impl Console + FolderPicker),
    store: &mut ClassStore,
    settings_path: &Path,
) -> anyhow::Result<AppSettings> {
    let app_default = store.config().chart_save_root.clone();
    let folder = if user_wants_custom_location(ui)? {
        choose_chart_save_folder(ui, &app_default)
    } else {
        app_default
    };
    let settings = AppSettings::new(folder);
    settings.save(settings_path)?;
    store.set_chart_save_root(settings.chart_save_folder.clone());
    info!(
        "chart save folder set to {}",
        settings.chart_save_folder.display()
    );
    Ok(settings)
}

/// Settings menu entry: re-choose the chart save folder. Cancelling keeps
/// the current folder.
pub fn change_chart_save_folder(
    ui: &mut (impl Console + FolderPicker),
    store: &mut ClassStore,
    settings_path: &Path,
) -> anyhow::Result<AppSettings> {
    let current = store.config().chart_save_root.clone();
    let folder = choose_chart_save_folder(ui, &current);
    let settings = AppSettings::new(folder);
    settings.save(settings_path)?;
    store.set_chart_save_root(settings.chart_save_folder.clone());
    info!(
        "chart save folder set to {}",
        settings.chart_save_folder.display()
    );
    Ok(settings)
}
