use classbook::classes;
use classbook::registry::{ClassRegistry, FileRegistry};
use classbook::ui::{Console, RosterUi};
use classbook::{ClassData, ClassStore, StorageConfig};
use std::time::Duration;
use tempfile::TempDir;

/// Stands in for the interactive terminal, recording every collaborator
/// call in order.
#[derive(Default)]
struct ScriptedUi {
    name_reply: String,
    roster: Vec<String>,
    events: Vec<String>,
}

impl Console for ScriptedUi {
    fn print_line(&mut self, _text: &str) {}

    fn prompt(&mut self, _prompt: &str) -> anyhow::Result<String> {
        Ok(String::new())
    }

    fn clear_screen(&mut self, _lines: usize) {}

    fn pause(&mut self, duration: Duration) {
        self.events.push(format!("pause:{}s", duration.as_secs()));
    }
}

impl RosterUi for ScriptedUi {
    fn class_name_input(&mut self) -> anyhow::Result<String> {
        self.events.push("name_input".to_string());
        Ok(self.name_reply.clone())
    }

    fn compose_roster(&mut self, class_name: &str) -> anyhow::Result<ClassData> {
        self.events.push(format!("compose:{class_name}"));
        let mut data = ClassData::new();
        for name in &self.roster {
            data.add_student(name.clone());
        }
        Ok(data)
    }

    fn roster_feedback(&mut self, class_name: &str, data: &ClassData) {
        self.events
            .push(format!("feedback:{class_name}:{}", data.len()));
    }
}

fn test_store() -> (TempDir, ClassStore) {
    let home = tempfile::tempdir().expect("create temp home");
    let store = ClassStore::new(StorageConfig::under_home(home.path()));
    (home, store)
}

#[test]
fn create_classlist_runs_the_whole_flow_once() {
    let (home, store) = test_store();
    let mut registry = FileRegistry::new(store.config().registry_file());
    let mut ui = ScriptedUi {
        name_reply: "the_flying_circus".to_string(),
        roster: vec!["Cleese".to_string(), "Palin".to_string()],
        events: Vec::new(),
    };

    let created =
        classes::create_classlist(&store, &mut registry, &mut ui).expect("create classlist");
    assert_eq!(created, "the_flying_circus");

    // Each collaborator runs exactly once, in flow order, with the pause as
    // the last step.
    assert_eq!(
        ui.events,
        vec![
            "name_input",
            "compose:the_flying_circus",
            "feedback:the_flying_circus:2",
            "pause:2s",
        ]
    );

    assert!(home
        .path()
        .join("class_data/the_flying_circus/avatars")
        .is_dir());
    assert!(home
        .path()
        .join("class_data/the_flying_circus/chart_data")
        .is_dir());
    assert!(home.path().join("chart_saves/the_flying_circus").is_dir());

    assert_eq!(
        registry.class_names().expect("registry names"),
        vec!["the_flying_circus".to_string()]
    );

    let read = store
        .read_class_data("the_flying_circus")
        .expect("read back the new class");
    let names: Vec<_> = read.student_names().collect();
    assert_eq!(names, vec!["Cleese", "Palin"]);
    assert_eq!(read.avatar_for("Cleese"), None);
}

#[test]
fn setup_class_provisions_and_registers() {
    let (home, store) = test_store();
    let mut registry = FileRegistry::new(store.config().registry_file());

    classes::setup_class(&store, &mut registry, "hells_grannys").expect("set up class");

    assert!(home
        .path()
        .join("class_data/hells_grannys/avatars")
        .is_dir());
    assert_eq!(
        registry.class_names().expect("registry names"),
        vec!["hells_grannys".to_string()]
    );
}

#[test]
fn empty_roster_still_creates_the_class() {
    let (_home, store) = test_store();
    let mut registry = FileRegistry::new(store.config().registry_file());
    let mut ui = ScriptedUi {
        name_reply: "empty_class".to_string(),
        roster: Vec::new(),
        events: Vec::new(),
    };

    classes::create_classlist(&store, &mut registry, &mut ui).expect("create empty class");

    let read = store
        .read_class_data("empty_class")
        .expect("read back the empty class");
    assert!(read.is_empty());
}

#[test]
fn creating_the_same_class_twice_fails() {
    let (_home, store) = test_store();
    let mut registry = FileRegistry::new(store.config().registry_file());
    let mut ui = ScriptedUi {
        name_reply: "the_flying_circus".to_string(),
        roster: vec!["Cleese".to_string()],
        events: Vec::new(),
    };

    classes::create_classlist(&store, &mut registry, &mut ui).expect("first creation");
    let err = classes::create_classlist(&store, &mut registry, &mut ui)
        .expect_err("second creation of the same name");
    assert!(err.to_string().contains("the_flying_circus"));

    assert_eq!(
        registry.class_names().expect("registry names"),
        vec!["the_flying_circus".to_string()]
    );
}
