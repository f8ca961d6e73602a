//! `#[derive(Dto)]` output and the type registry

use std::sync::Arc;

use permafrost::*;
use pretty_assertions::assert_eq;

#[derive(Dto, Default)]
#[dto(rename = "Account")]
struct AccountRecord {
    #[dto(rename = "Id", readonly)]
    id: i64,
    owner: String,
    balance: f64,
    tags: Sequence,
    #[dto(enumerable)]
    audit: Sequence,
    parent: Option<Object>,
    extra: Value,
    #[dto(skip)]
    cache: u32,
}

#[derive(Dto, Default)]
struct Unit;

#[test]
fn test_described_properties() {
    let info = type_info_of::<AccountRecord>();
    assert_eq!(info.name, "Account");

    let names: Vec<_> = info.properties.iter().map(|p| p.name).collect();
    assert_eq!(
        names,
        vec!["Id", "owner", "balance", "tags", "audit", "parent", "extra"]
    );

    assert_eq!(
        info.property("Id"),
        Some(&PropertyInfo::new("Id", PropertyKind::Scalar).read_only())
    );
    assert_eq!(info.property("tags").unwrap().kind, PropertyKind::List);
    assert_eq!(info.property("audit").unwrap().kind, PropertyKind::Enumerable);
    assert_eq!(info.property("parent").unwrap().kind, PropertyKind::Object);
    assert_eq!(info.property("extra").unwrap().kind, PropertyKind::Any);
    assert!(info.property("cache").is_none());
}

#[test]
fn test_copyable_excludes_read_only() {
    let info = type_info_of::<AccountRecord>();
    let copyable: Vec<_> = info.copyable().map(|p| p.name).collect();
    assert!(!copyable.contains(&"Id"));
    assert!(copyable.contains(&"owner"));
}

#[test]
fn test_registry_caches_descriptions() {
    let first = type_info_of::<AccountRecord>();
    let second = type_info_of::<AccountRecord>();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(registry::is_registered::<AccountRecord>());

    let instance = Object::new(AccountRecord::default());
    assert!(Arc::ptr_eq(&instance.type_info(), &first));
}

#[test]
fn test_create_builds_default_instance() {
    let info = type_info_of::<AccountRecord>();
    let created = Object::from_boxed(info.create());
    assert_eq!(created.type_name(), "Account");
    assert_eq!(created.get("balance").unwrap(), Value::F64(0.0));
}

#[test]
fn test_generated_accessors() {
    let account = Object::new(AccountRecord {
        id: 7,
        owner: "ada".into(),
        ..AccountRecord::default()
    });

    assert_eq!(account.get("Id").unwrap(), Value::I64(7));
    assert_eq!(
        account.set("Id", 8i64),
        Err(PermafrostError::ReadOnlyProperty {
            type_name: "Account".to_string(),
            property: "Id".to_string(),
        })
    );
    assert!(account.get("cache").is_err());

    account.set("extra", Value::list(vec![Value::I32(1)])).unwrap();
    assert!(account.get("extra").unwrap().as_sequence().is_some());
    account.set("parent", Value::Null).unwrap();
    assert!(account.get("parent").unwrap().is_null());
}

#[test]
fn test_untyped_property_wraps_by_runtime_shape() {
    let account = freezer::wrap_new(AccountRecord {
        extra: Value::collection(vec![Value::I32(1)]),
        ..AccountRecord::default()
    });
    assert!(account.get("extra").unwrap().as_collection().is_some());
}

#[test]
fn test_unit_struct_has_no_properties() {
    let info = type_info_of::<Unit>();
    assert!(info.properties.is_empty());

    let unit = freezer::wrap_new(Unit);
    assert!(unit.get("anything").is_err());
    assert!(unit.thaw().is_ok());
}

#[test]
fn test_debug_rendering() {
    #[derive(Dto, Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    let point = Object::new(Point { x: 1, y: 2 });
    assert_eq!(format!("{:?}", point), "Point { x: 1, y: 2 }");

    let wrapped = freezer::wrap(point).unwrap();
    wrapped.freeze().unwrap();
    assert_eq!(format!("{:?}", wrapped), "Frozen(Point { x: 1, y: 2 })");
}
