//! Tests for core_kernel error types

use core_kernel::codes::CodeError;
use core_kernel::error::CoreError;
use core_kernel::PortError;

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("unknown timezone: Mars/Olympus");

    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "unknown timezone: Mars/Olympus"),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_code_error_display() {
    let error = CodeError::NotFound {
        enumeration: "Occupation",
        code: "12".to_string(),
    };

    assert_eq!(error.to_string(), "No Occupation member with code [12]");
}

#[test]
fn test_only_transport_failures_are_transient() {
    assert!(PortError::connection("refused").is_transient());
    assert!(!PortError::not_found("AgeRate", 130).is_transient());
    assert!(!PortError::conflict("duplicate receipt").is_transient());
    assert!(!PortError::internal("bad row").is_transient());
}

#[test]
fn test_port_error_display() {
    let error = PortError::not_found("InsuranceType", 9);
    assert_eq!(error.to_string(), "Not found: InsuranceType with id 9");
    assert!(!error.is_transient());

    let error = PortError::connection("pool timed out");
    assert!(error.is_transient());
    assert!(!error.is_not_found());
}
