//! Freezing nested object graphs

use permafrost::*;
use pretty_assertions::assert_eq;

#[derive(Dto, Default)]
struct DataChild {
    id: i32,
    name: String,
}

#[derive(Dto)]
struct DataGraph {
    settable: Option<Object>,
    #[dto(readonly)]
    readonly: Object,
}

impl Default for DataGraph {
    fn default() -> Self {
        Self {
            settable: None,
            readonly: Object::new(DataChild::default()),
        }
    }
}

fn child(id: i32, name: &str) -> Object {
    Object::new(DataChild {
        id,
        name: name.to_string(),
    })
}

fn create_data() -> Object {
    freezer::wrap_new(DataGraph {
        settable: None,
        readonly: child(42, "Everything"),
    })
}

fn get_object(data: &Object, property: &str) -> Object {
    data.get_as::<Object>(property).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Lazy Wrapping
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_child_objects_are_wrapped() {
    let data = create_data();
    assert!(freezer::is_wrapped(&data.get("readonly").unwrap()));
}

#[test]
fn test_can_access_child_property() {
    let data = create_data();
    let readonly = get_object(&data, "readonly");
    assert_eq!(readonly.get("id").unwrap(), Value::I32(42));
    assert_eq!(readonly.get("name").unwrap(), Value::string("Everything"));
}

#[test]
fn test_null_child_reads_as_null() {
    let data = create_data();
    let settable = data.get("settable").unwrap();
    assert!(settable.is_null());
    assert!(!freezer::is_wrapped(&settable));
}

#[test]
fn test_proxied_child_is_constant_instance() {
    let data = create_data();
    let first = get_object(&data, "readonly");
    let second = get_object(&data, "readonly");
    assert!(first.ptr_eq(&second));
}

#[test]
fn test_child_shares_the_parent_lineage() {
    let data = create_data();
    let readonly = get_object(&data, "readonly");
    let cell = readonly.frozen_cell().unwrap();
    assert!(cell.ptr_eq(&data.frozen_cell().unwrap()));
}

#[test]
fn test_setting_property_wraps_the_instance_on_access() {
    let data = create_data();
    let raw = child(123, "foo");
    data.set("settable", &raw).unwrap();

    let settable = get_object(&data, "settable");
    assert!(settable.is_wrapped());
    assert!(!settable.ptr_eq(&raw));
    assert!(get_object(&data, "settable").ptr_eq(&settable));
    assert_eq!(settable.get("id").unwrap(), Value::I32(123));
}

#[test]
fn test_assigning_wrapped_value_keeps_it() {
    let data = create_data();
    let wrapped = freezer::wrap_new(DataChild::default());
    data.set("settable", &wrapped).unwrap();

    assert!(get_object(&data, "settable").ptr_eq(&wrapped));
}

#[test]
fn test_assigning_null_clears_child() {
    let data = create_data();
    data.set("settable", child(1, "a")).unwrap();
    let _ = data.get("settable").unwrap();

    data.set("settable", Value::Null).unwrap();
    assert!(data.get("settable").unwrap().is_null());
}

#[test]
fn test_readonly_property_rejects_writes() {
    let data = create_data();
    assert_eq!(
        data.set("readonly", child(1, "a")),
        Err(PermafrostError::ReadOnlyProperty {
            type_name: "DataGraph".to_string(),
            property: "readonly".to_string(),
        })
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Transitive Freezing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_freezing_graph_freezes_readonly_child() {
    let data = create_data();
    freezer::freeze(&data).unwrap();

    let readonly = get_object(&data, "readonly");
    assert!(readonly.is_frozen().unwrap());
    assert_eq!(
        readonly.set("id", 123),
        Err(PermafrostError::frozen("id", "DataChild"))
    );
    assert_eq!(readonly.get("id").unwrap(), Value::I32(42));
}

#[test]
fn test_freezing_graph_freezes_settable_child() {
    let data = create_data();
    data.set("settable", child(123, "foo")).unwrap();
    freezer::freeze(&data).unwrap();

    let settable = get_object(&data, "settable");
    assert!(settable.set("id", 456).unwrap_err().is_frozen_access());
    assert_eq!(settable.get("id").unwrap(), Value::I32(123));
}

#[test]
fn test_child_read_before_freeze_is_frozen_after() {
    let data = create_data();
    let readonly = get_object(&data, "readonly");
    readonly.set("id", 7).unwrap();

    data.freeze().unwrap();
    assert!(readonly.is_frozen().unwrap());
    assert!(readonly.set("id", 8).is_err());
}

#[test]
fn test_freezing_graph_rejects_setting_settable_child() {
    let data = create_data();
    freezer::freeze(&data).unwrap();

    let err = data.set("settable", child(123, "foo")).unwrap_err();
    assert_eq!(err, PermafrostError::frozen("settable", "DataGraph"));
    assert!(data.get("settable").unwrap().is_null());
}

#[test]
fn test_freezing_child_freezes_whole_lineage() {
    let data = create_data();
    get_object(&data, "readonly").freeze().unwrap();
    assert!(data.is_frozen().unwrap());
}

// ═══════════════════════════════════════════════════════════════════════
// Thawing Graphs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_thawed_graph_is_independent() {
    let data = create_data();
    data.set("settable", child(123, "foo")).unwrap();
    data.freeze().unwrap();

    let thawed = data.thaw().unwrap();
    let original_child = get_object(&data, "settable");
    let thawed_child = get_object(&thawed, "settable");

    assert!(!thawed_child.ptr_eq(&original_child));
    assert!(!thawed_child.is_frozen().unwrap());
    thawed_child.set("id", 1).unwrap();
    assert_eq!(original_child.get("id").unwrap(), Value::I32(123));
}
