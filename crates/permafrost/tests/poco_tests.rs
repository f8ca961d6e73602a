//! Freeze/thaw lifecycle of flat data objects

use permafrost::*;
use pretty_assertions::assert_eq;

#[derive(Dto, Default, Debug)]
struct Data {
    id: i32,
    name: String,
}

fn everything() -> Data {
    Data {
        id: 42,
        name: "Everything".into(),
    }
}

fn create_data() -> Object {
    freezer::wrap_new(everything())
}

fn assert_same_value(first: &Object, next: &Object) {
    assert_eq!(first.get("id").unwrap(), next.get("id").unwrap());
    assert_eq!(first.get("name").unwrap(), next.get("name").unwrap());
}

// ═══════════════════════════════════════════════════════════════════════
// Wrapping
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_can_read_through_wrapped_instance() {
    let plain = Object::new(everything());
    let data = freezer::wrap(plain.clone()).unwrap();

    assert!(data.is_wrapped());
    assert_same_value(&plain, &data);
}

#[test]
fn test_can_detect_wrapped_instances() {
    let plain = Object::new(everything());
    assert!(!freezer::is_wrapped(&Value::Object(plain.clone())));

    let data = freezer::wrap(plain).unwrap();
    assert!(freezer::is_wrapped(&Value::Object(data)));
    assert!(!freezer::is_wrapped(&Value::Null));
}

#[test]
fn test_wrapping_a_wrapped_instance_is_a_no_op() {
    let data = create_data();
    assert!(freezer::wrap(data.clone()).unwrap().ptr_eq(&data));
}

#[test]
fn test_wrapper_writes_through_to_instance() {
    let data = freezer::wrap(Object::new(everything())).unwrap();

    data.set("id", 7).unwrap();
    assert_eq!(data.with(|d: &Data| d.id).unwrap(), 7);
}

#[test]
fn test_original_handle_cannot_reach_frozen_instance() {
    let plain = Object::new(everything());
    let data = freezer::wrap(plain.clone()).unwrap();
    data.freeze().unwrap();

    plain.set("id", 45).unwrap();
    assert_eq!(plain.get("id").unwrap(), Value::I32(45));
    assert_eq!(data.get("id").unwrap(), Value::I32(42));
    assert!(data.set("id", 45).unwrap_err().is_frozen_access());
}

#[test]
fn test_typed_pass_through() {
    let data = create_data();
    assert_eq!(data.with(|d: &Data| d.name.clone()).unwrap(), "Everything");
    assert_eq!(data.get_as::<i32>("id").unwrap(), 42);
}

// ═══════════════════════════════════════════════════════════════════════
// Non-wrapped Instances
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_facade_rejects_non_freezable() {
    let plain = Object::new(everything());
    let expected = PermafrostError::NotWrappable {
        type_name: "Data".to_string(),
    };

    assert_eq!(freezer::freeze(&plain), Err(expected.clone()));
    assert_eq!(freezer::is_frozen(&plain), Err(expected.clone()));
    assert_eq!(freezer::thaw(&plain).map(|_| ()), Err(expected));
}

#[test]
fn test_freeze_dry_on_non_freezable_returns_frozen_wrapper() {
    let plain = Object::new(everything());
    let data = freezer::freeze_dry(&plain).unwrap();

    assert!(!data.ptr_eq(&plain));
    assert!(data.is_wrapped());
    assert!(freezer::is_frozen(&data).unwrap());
    assert_same_value(&plain, &data);

    // The source is untouched and still writable
    plain.set("id", 1).unwrap();
    assert_eq!(data.get("id").unwrap(), Value::I32(42));
}

// ═══════════════════════════════════════════════════════════════════════
// Freeze / Thaw / Freeze-dry
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_wrapped_instance_is_unfrozen_by_default() {
    assert!(!freezer::is_frozen(&create_data()).unwrap());
}

#[test]
fn test_freeze_is_idempotent() {
    let data = create_data();
    freezer::freeze(&data).unwrap();
    freezer::freeze(&data).unwrap();
    assert!(freezer::is_frozen(&data).unwrap());
}

#[test]
fn test_thaw_on_unfrozen_returns_new_unfrozen_instance() {
    let data = create_data();
    let thawed = freezer::thaw(&data).unwrap();

    assert!(!thawed.ptr_eq(&data));
    assert_same_value(&data, &thawed);
    assert!(!freezer::is_frozen(&thawed).unwrap());
}

#[test]
fn test_thaw_on_frozen_returns_new_unfrozen_instance() {
    let data = create_data();
    freezer::freeze(&data).unwrap();
    let thawed = freezer::thaw(&data).unwrap();

    assert!(!thawed.ptr_eq(&data));
    assert_same_value(&data, &thawed);
    assert!(!freezer::is_frozen(&thawed).unwrap());
    assert!(freezer::is_frozen(&data).unwrap());
}

#[test]
fn test_thawed_copy_is_independent() {
    let data = create_data();
    let thawed = data.thaw().unwrap();

    thawed.set("name", "Nothing").unwrap();
    assert_eq!(data.get("name").unwrap(), Value::string("Everything"));
}

#[test]
fn test_freeze_dry_clones_unfrozen_instance() {
    let data = create_data();
    let dried = freezer::freeze_dry(&data).unwrap();

    assert!(!dried.ptr_eq(&data));
    assert_same_value(&data, &dried);
    assert!(!freezer::is_frozen(&data).unwrap());
    assert!(freezer::is_frozen(&dried).unwrap());
}

#[test]
fn test_freeze_dry_on_frozen_instance_is_identity() {
    let data = create_data();
    freezer::freeze(&data).unwrap();
    let dried = freezer::freeze_dry(&data).unwrap();

    assert!(dried.ptr_eq(&data));
    assert!(freezer::is_frozen(&dried).unwrap());
}

// ═══════════════════════════════════════════════════════════════════════
// Access While Frozen
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_setting_frozen_property_fails_and_changes_nothing() {
    let data = create_data();
    freezer::freeze(&data).unwrap();

    let err = data.set("id", 45).unwrap_err();
    assert_eq!(err, PermafrostError::frozen("id", "Data"));
    assert_eq!(
        err.to_string(),
        "Cannot modify 'id' on frozen instance of 'Data'"
    );
    assert_eq!(data.get("id").unwrap(), Value::I32(42));
    assert_eq!(data.get("name").unwrap(), Value::string("Everything"));
}

#[test]
fn test_can_read_frozen_property() {
    let data = create_data();
    freezer::freeze(&data).unwrap();
    assert_eq!(data.get("id").unwrap(), Value::I32(42));
}

#[test]
fn test_pass_through_bypasses_interception() {
    let data = create_data();
    data.freeze().unwrap();

    data.with_mut(|d: &mut Data| d.id = 7).unwrap();
    assert_eq!(data.get("id").unwrap(), Value::I32(7));
}

#[test]
fn test_unknown_and_mistyped_properties() {
    let data = create_data();

    assert_eq!(
        data.get("missing"),
        Err(PermafrostError::UnknownProperty {
            type_name: "Data".to_string(),
            property: "missing".to_string(),
        })
    );
    assert_eq!(
        data.set("id", "forty-two"),
        Err(PermafrostError::mismatch("i32", "String"))
    );
    assert_eq!(data.get("id").unwrap(), Value::I32(42));
}

// ═══════════════════════════════════════════════════════════════════════
// Concrete Scenario
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_everything_scenario() {
    let data = create_data();
    data.freeze().unwrap();

    assert!(data.is_frozen().unwrap());
    assert_eq!(data.get("id").unwrap(), Value::I32(42));
    assert!(data.set("id", 45).unwrap_err().is_frozen_access());

    let thawed = data.thaw().unwrap();
    assert!(!thawed.ptr_eq(&data));
    assert!(!thawed.is_frozen().unwrap());
    assert_eq!(thawed.get("id").unwrap(), Value::I32(42));
    assert_eq!(thawed.get("name").unwrap(), Value::string("Everything"));
}

// ═══════════════════════════════════════════════════════════════════════
// Frozen-state Member
// ═══════════════════════════════════════════════════════════════════════

#[derive(Dto, Default)]
struct Flagged {
    id: i32,
    is_frozen: bool,
}

#[test]
fn test_frozen_state_member_is_not_cloned() {
    let data = freezer::wrap_new(Flagged {
        id: 1,
        is_frozen: true,
    });

    let thawed = data.thaw().unwrap();
    assert_eq!(thawed.get("id").unwrap(), Value::I32(1));
    assert_eq!(thawed.get(FROZEN_STATE_MEMBER).unwrap(), Value::Bool(false));
}
