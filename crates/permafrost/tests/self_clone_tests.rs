//! Types with their own clone or freeze capabilities

use permafrost::*;
use pretty_assertions::assert_eq;

// ═══════════════════════════════════════════════════════════════════════
// Self-clone Capability
// ═══════════════════════════════════════════════════════════════════════

#[derive(Dto, Default, Debug)]
#[dto(self_clone)]
struct Sequenced {
    id: i32,
    name: String,
    sequence: i32,
}

/// Every copy bumps the sequence, so tests can tell which path copied it
impl Clone for Sequenced {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            sequence: self.sequence + 1,
        }
    }
}

fn create_sequenced() -> Object {
    freezer::wrap_new(Sequenced {
        id: 42,
        name: "Everything".into(),
        sequence: 0,
    })
}

#[test]
fn test_thaw_prefers_self_clone() {
    let data = create_sequenced();
    let thawed = data.thaw().unwrap();

    assert!(!thawed.ptr_eq(&data));
    assert_eq!(thawed.get("sequence").unwrap(), Value::I32(1));
    assert_eq!(thawed.get("name").unwrap(), Value::string("Everything"));
    assert!(!thawed.is_frozen().unwrap());
}

#[test]
fn test_freeze_dry_prefers_self_clone() {
    let data = create_sequenced();
    let dried = data.freeze_dry().unwrap();

    assert_eq!(dried.get("sequence").unwrap(), Value::I32(1));
    assert!(dried.is_frozen().unwrap());
}

#[test]
fn test_wrapping_sole_handle_keeps_the_instance() {
    let plain = Object::new(Sequenced::default());
    let data = freezer::wrap(plain).unwrap();
    assert_eq!(data.get("sequence").unwrap(), Value::I32(0));
}

#[test]
fn test_wrapping_shared_handle_wraps_a_self_clone() {
    let plain = Object::new(Sequenced::default());
    let data = freezer::wrap(plain.clone()).unwrap();

    assert_eq!(data.get("sequence").unwrap(), Value::I32(1));
    plain.set("id", 9).unwrap();
    assert_eq!(data.get("id").unwrap(), Value::I32(0));
}

#[test]
fn test_self_clone_of_wrapped_instance_is_wrapped() {
    let data = create_sequenced();
    data.freeze().unwrap();

    let copy = data.self_clone().unwrap().unwrap();
    assert!(!copy.ptr_eq(&data));
    assert!(copy.is_wrapped());
    assert!(!copy.is_frozen().unwrap());
    assert_eq!(copy.get("id").unwrap(), Value::I32(42));

    copy.set("id", 1).unwrap();
    assert_eq!(data.get("id").unwrap(), Value::I32(42));
}

#[test]
fn test_self_clone_absent_without_capability() {
    #[derive(Dto, Default)]
    struct Plain {
        id: i32,
    }

    let data = freezer::wrap_new(Plain { id: 1 });
    assert!(data.self_clone().unwrap().is_none());
}

// ═══════════════════════════════════════════════════════════════════════
// Native Freeze Support
// ═══════════════════════════════════════════════════════════════════════

#[derive(Dto, Default)]
#[dto(freezable)]
struct Native {
    id: i32,
    #[dto(skip)]
    frozen: bool,
}

impl Freezable for Native {
    fn freeze(&mut self) {
        self.frozen = true;
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn thaw(&self) -> Box<dyn Dto> {
        Box::new(Native {
            id: self.id,
            frozen: false,
        })
    }
}

#[test]
fn test_facade_uses_native_freeze() {
    let data = Object::new(Native::default());

    assert!(!freezer::is_frozen(&data).unwrap());
    freezer::freeze(&data).unwrap();
    assert!(freezer::is_frozen(&data).unwrap());
    assert!(data.with(|n: &Native| n.frozen).unwrap());
}

#[test]
fn test_native_thaw_and_freeze_dry() {
    let data = Object::new(Native {
        id: 3,
        frozen: false,
    });

    let dried = freezer::freeze_dry(&data).unwrap();
    assert!(!dried.ptr_eq(&data));
    assert!(!dried.is_wrapped());
    assert!(dried.is_frozen().unwrap());
    assert_eq!(dried.get("id").unwrap(), Value::I32(3));

    // Already frozen: identity
    assert!(freezer::freeze_dry(&dried).unwrap().ptr_eq(&dried));

    let thawed = freezer::thaw(&dried).unwrap();
    assert!(!thawed.is_frozen().unwrap());
}

#[test]
fn test_wrapper_takes_precedence_over_native_freeze() {
    let data = freezer::wrap_new(Native::default());
    data.freeze().unwrap();

    assert!(data.is_frozen().unwrap());
    // The instance's own flag is not involved
    assert!(!data.with(|n: &Native| n.frozen).unwrap());
    assert!(data.set("id", 1).unwrap_err().is_frozen_access());
}
