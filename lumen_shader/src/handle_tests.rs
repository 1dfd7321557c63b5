use super::*;
use crate::driver::MockShaderDriver;
use crate::shader::StageKind;
use std::rc::Rc;

fn mock() -> (Rc<MockShaderDriver>, SharedDriver) {
    let mock = Rc::new(MockShaderDriver::new());
    let shared: SharedDriver = mock.clone();
    (mock, shared)
}

// ============================================================================
// Release discipline
// ============================================================================

#[test]
fn test_drop_releases_shader_once() {
    let (mock, driver) = mock();
    let handle = driver.create_shader(StageKind::Vertex);
    {
        let _owned = Owned::<ShaderObject>::new(driver.clone(), handle);
        assert!(mock.is_shader(handle));
    }
    assert!(!mock.is_shader(handle));
    assert_eq!(mock.release_count(handle), 1);
}

#[test]
fn test_explicit_release_then_drop_is_single_release() {
    let (mock, driver) = mock();
    let handle = driver.create_program();

    let mut owned = Owned::<ProgramObject>::new(driver.clone(), handle);
    assert!(owned.release());
    assert!(!owned.release());
    assert!(owned.handle().is_none());
    drop(owned);

    assert_eq!(mock.release_count(handle), 1);
    assert_eq!(mock.invalid_release_count(), 0);
}

#[test]
fn test_empty_owner_never_calls_driver() {
    let (mock, driver) = mock();
    {
        let mut owned = Owned::<ShaderObject>::empty(driver);
        assert!(!owned.is_live());
        assert!(!owned.release());
    }
    assert!(mock.calls().is_empty());
}

// ============================================================================
// Transfer
// ============================================================================

#[test]
fn test_take_disarms_source() {
    let (mock, driver) = mock();
    let handle = driver.create_shader(StageKind::Fragment);

    let mut first = Owned::<ShaderObject>::new(driver.clone(), handle);
    let second = first.take();

    assert!(!first.is_live());
    assert_eq!(second.handle(), handle);

    drop(first);
    assert!(mock.is_shader(handle));

    drop(second);
    assert_eq!(mock.release_count(handle), 1);
}

#[test]
fn test_debug_shows_kind_and_handle() {
    let (_mock, driver) = mock();
    let owned = Owned::<ProgramObject>::empty(driver);
    let debug = format!("{:?}", owned);
    assert!(debug.contains("program"));
    assert!(debug.contains("NativeHandle"));
}
