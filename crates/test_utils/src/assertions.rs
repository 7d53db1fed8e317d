//! Custom Test Assertions
//!
//! Assertion helpers for step views and error sets that print the offending
//! view instead of a bare `false`.

use domain_quote::{ErrorSet, Field, StepView, Violation, WizardStep};

/// Asserts that a view belongs to the expected step
///
/// # Panics
///
/// Panics with the full view if the step differs
pub fn assert_step(view: &StepView, expected: WizardStep) {
    assert_eq!(
        view.step(),
        expected,
        "Expected step {}, got view {:?}",
        expected,
        view
    );
}

/// Returns the error set of a confirm view
///
/// # Panics
///
/// Panics if the view is not a confirm view
pub fn confirm_errors(view: &StepView) -> &ErrorSet {
    view.errors()
        .unwrap_or_else(|| panic!("Expected a confirm view with errors, got {:?}", view))
}

/// Asserts that a view is a confirm view without errors
pub fn assert_no_errors(view: &StepView) {
    let errors = confirm_errors(view);
    assert!(errors.is_empty(), "Expected no errors, got {:?}", errors);
}

/// Asserts that exactly the given fields carry errors, in this order
pub fn assert_error_fields(errors: &ErrorSet, expected: &[Field]) {
    let actual: Vec<Field> = errors.iter().map(|e| e.field).collect();
    assert_eq!(actual, expected, "Unexpected error fields: {:?}", errors);
}

/// Asserts that a field carries the given violation
pub fn assert_violation(errors: &ErrorSet, field: Field, violation: &Violation) {
    assert!(
        errors
            .for_field(field)
            .into_iter()
            .any(|e| &e.violation == violation),
        "Expected {:?} on {}, got {:?}",
        violation,
        field.name(),
        errors
    );
}
