//! The interactive main menu. All real terminal interaction happens through
//! the injected UI collaborators; the core never reads stdin itself.

use crate::classes;
use crate::registry::{class_listing, ClassRegistry};
use crate::roster::student_listing;
use crate::settings;
use crate::store::ClassStore;
use crate::ui::{Console, FolderPicker, RosterUi};
use anyhow::Context;
use std::path::Path;

/// Runs the main menu until the user quits. Errors from a single action are
/// reported on screen and the menu continues.
pub fn run_main_menu(
    store: &mut ClassStore,
    registry: &mut impl ClassRegistry,
    ui: &mut (impl Console + RosterUi + FolderPicker),
    settings_path: &Path,
) -> anyhow::Result<()> {
    loop {
        ui.print_line("classbook - class roster manager");
        ui.print_line("");
        ui.print_line("Please select an option by entering the corresponding number, and press enter:");
        ui.print_line("1. Create a class.");
        ui.print_line("2. View a class roster.");
        ui.print_line("3. Change the chart save folder.");
        ui.print_line("Q. Quit.");
        let choice = ui.prompt("Select an option: ")?;

        match choice.to_ascii_lowercase().as_str() {
            "1" => {
                if let Err(e) = classes::create_classlist(store, registry, ui) {
                    ui.print_line(&format!("Could not create class: {e:#}"));
                }
            }
            "2" => {
                if let Err(e) = view_class_roster(store, registry, ui) {
                    ui.print_line(&format!("Could not open class: {e:#}"));
                }
            }
            "3" => {
                if let Err(e) = settings::change_chart_save_folder(ui, store, settings_path) {
                    ui.print_line(&format!("Could not update settings: {e:#}"));
                }
            }
            "q" | "quit" => return Ok(()),
            _ => ui.print_line("Please select from the listed options."),
        }
        ui.clear_screen(50);
    }
}

/// Numbered class picker followed by that class's numbered roster.
fn view_class_roster(
    store: &ClassStore,
    registry: &impl ClassRegistry,
    ui: &mut impl Console,
) -> anyhow::Result<()> {
    let names = registry
        .class_names()
        .context("failed to load the class registry")?;
    if names.is_empty() {
        ui.print_line("No classes registered yet.");
        return Ok(());
    }

    let listing = class_listing(names);
    for (index, name) in &listing {
        ui.print_line(&format!("{index}. {name}"));
    }
    let reply = ui.prompt("Enter the number of a class and press enter: ")?;
    let class_name = match reply.parse::<usize>().ok().and_then(|n| listing.get(&n)) {
        Some(name) => name.clone(),
        None => {
            ui.print_line("Please select from the listed options.");
            return Ok(());
        }
    };

    let data = store
        .read_class_data(&class_name)
        .with_context(|| format!("failed to load class data for {class_name}"))?;
    ui.print_line(&format!("{class_name} roster:"));
    if data.is_empty() {
        ui.print_line("No students recorded.");
    } else {
        for (index, student) in student_listing(&data) {
            ui.print_line(&format!("{index}. {student}"));
        }
    }
    ui.prompt("Press enter to return to the menu: ")?;
    Ok(())
}
