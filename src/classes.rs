//! Class creation, composed from the store, the registry, and the injected
//! UI collaborators. Nothing here touches the filesystem directly.

use crate::registry::ClassRegistry;
use crate::roster::ClassData;
use crate::store::ClassStore;
use crate::ui::{Console, RosterUi};
use anyhow::Context;
use log::info;
use std::time::Duration;

/// How long roster feedback stays on screen before the next menu clears it.
const FEEDBACK_PAUSE: Duration = Duration::from_secs(2);

/// Full class-creation flow: ask for a name, set up storage, then collect
/// and persist the initial roster. Returns the created class's name.
pub fn create_classlist(
    store: &ClassStore,
    registry: &mut impl ClassRegistry,
    ui: &mut (impl Console + RosterUi),
) -> anyhow::Result<String> {
    let class_name = ui.class_name_input()?;
    setup_class(store, registry, &class_name)?;
    create_classlist_data(store, ui, &class_name)?;
    Ok(class_name)
}

/// Provisions the class's directories, then records it in the registry.
pub fn setup_class(
    store: &ClassStore,
    registry: &mut impl ClassRegistry,
    class_name: &str,
) -> anyhow::Result<()> {
    store
        .provision_class_storage(class_name)
        .with_context(|| format!("failed to set up storage for {class_name}"))?;
    registry
        .register(class_name)
        .with_context(|| format!("failed to register class {class_name}"))?;
    info!("set up class {class_name}");
    Ok(())
}

/// Collects the initial roster, shows it back, and writes the data file.
/// The short pause keeps the feedback readable before the screen clears.
pub fn create_classlist_data(
    store: &ClassStore,
    ui: &mut (impl Console + RosterUi),
    class_name: &str,
) -> anyhow::Result<ClassData> {
    let data = ui.compose_roster(class_name)?;
    ui.roster_feedback(class_name, &data);
    store
        .write_class_data(class_name, &data)
        .with_context(|| format!("failed to save class data for {class_name}"))?;
    ui.pause(FEEDBACK_PAUSE);
    Ok(data)
}
