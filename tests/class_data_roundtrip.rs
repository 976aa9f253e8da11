use classbook::error::StoreError;
use classbook::paths;
use classbook::{ClassData, ClassStore, StorageConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn test_store() -> (TempDir, ClassStore) {
    let home = tempfile::tempdir().expect("create temp home");
    let store = ClassStore::new(StorageConfig::under_home(home.path()));
    (home, store)
}

#[test]
fn written_class_data_reads_back_equal() {
    let (_home, store) = test_store();
    store
        .provision_class_storage("hells_grannys")
        .expect("provision storage");

    let data = ClassData::from_value(json!({ "Ann": { "avatar": null } })).expect("object");
    store
        .write_class_data("hells_grannys", &data)
        .expect("write class data");

    let read = store
        .read_class_data("hells_grannys")
        .expect("read class data");
    assert_eq!(read, data);
    assert_eq!(read.avatar_for("Ann"), None);
}

#[test]
fn arbitrary_record_fields_survive_in_insertion_order() {
    let (_home, store) = test_store();
    store
        .provision_class_storage("year_9_science")
        .expect("provision storage");

    let data = ClassData::from_value(json!({
        "Zoe": { "avatar": "zoe.png", "scores": [71, 85, 90] },
        "Ann": { "avatar": null, "chart_params": { "colour": "teal", "trend": true } },
        "Mel": { "notes": "no avatar field at all" },
    }))
    .expect("object");
    store
        .write_class_data("year_9_science", &data)
        .expect("write class data");

    let read = store
        .read_class_data("year_9_science")
        .expect("read class data");
    assert_eq!(read, data);

    let names: Vec<_> = read.student_names().collect();
    assert_eq!(names, vec!["Zoe", "Ann", "Mel"]);
    assert_eq!(read.avatar_for("Zoe"), Some("zoe.png"));
    assert_eq!(read.avatar_for("Mel"), None);
}

#[test]
fn rewrite_replaces_the_previous_file_wholesale() {
    let (_home, store) = test_store();
    store
        .provision_class_storage("hells_grannys")
        .expect("provision storage");

    let first = ClassData::from_value(json!({ "Ann": { "avatar": null } })).expect("object");
    store
        .write_class_data("hells_grannys", &first)
        .expect("first write");

    let second = ClassData::from_value(json!({ "Bea": { "avatar": "bea.png" } })).expect("object");
    store
        .write_class_data("hells_grannys", &second)
        .expect("second write");

    let read = store
        .read_class_data("hells_grannys")
        .expect("read class data");
    assert_eq!(read, second);
}

#[test]
fn data_file_lands_inside_the_class_folder() {
    let (home, store) = test_store();
    store
        .provision_class_storage("hells_grannys")
        .expect("provision storage");

    let data = ClassData::from_value(json!({ "Ann": { "avatar": null } })).expect("object");
    store
        .write_class_data("hells_grannys", &data)
        .expect("write class data");

    let file = home
        .path()
        .join("class_data/hells_grannys/hells_grannys.cld");
    assert!(file.is_file());
    let text = std::fs::read_to_string(&file).expect("read data file");
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("valid JSON on disk");
    assert!(parsed.get("Ann").is_some());
}

#[test]
fn reading_a_missing_class_is_not_found() {
    let (_home, store) = test_store();

    let err = store
        .read_class_data("never_created")
        .expect_err("missing data file");
    assert!(err.is_not_found(), "got {err:?}");
}

#[test]
fn unparsable_data_file_is_a_parse_error() {
    let (_home, store) = test_store();
    store
        .provision_class_storage("hells_grannys")
        .expect("provision storage");

    let file = paths::data_file(store.config(), "hells_grannys");
    std::fs::write(&file, "{ not json").expect("write garbage");

    let err = store
        .read_class_data("hells_grannys")
        .expect_err("garbage must not parse");
    assert!(matches!(err, StoreError::Parse { .. }), "got {err:?}");
}

#[test]
fn chart_data_loads_from_an_arbitrary_path() {
    let (home, store) = test_store();

    let chart_file = home.path().join("trend.json");
    std::fs::write(&chart_file, r#"{ "series": [1, 2, 3], "label": "term 1" }"#)
        .expect("write chart data");

    let chart = store
        .load_chart_data(&chart_file)
        .expect("load chart data");
    assert_eq!(chart["label"], json!("term 1"));
    assert_eq!(chart["series"], json!([1, 2, 3]));

    let err = store
        .load_chart_data(&home.path().join("absent.json"))
        .expect_err("missing chart file");
    assert!(err.is_not_found(), "got {err:?}");
}
