//! Closed code enumerations
//!
//! Form inputs such as marital status or occupation are submitted as the
//! string form of an integer code. Each enumeration is a fixed set of
//! `{code, label}` constants defined at compile time with
//! [`define_code_enum!`]; the [`CodeEnum`] trait provides membership checks
//! and lookups over the raw string representation.

use serde::Serialize;
use thiserror::Error;

/// Errors raised by code lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodeError {
    /// No member of the enumeration carries the requested code
    #[error("No {enumeration} member with code [{code}]")]
    NotFound {
        enumeration: &'static str,
        code: String,
    },
}

/// A `{code, label}` pair as exposed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeValue {
    /// Integer code submitted by the form
    pub code: i32,
    /// Display label
    pub label: &'static str,
}

/// Parses the string representation of a code
///
/// Accepts an optional sign and leading zeros, so `"01"` is code 1.
/// Returns `None` for empty or non-integer input.
pub fn parse_code(expression: &str) -> Option<i32> {
    expression.parse::<i32>().ok()
}

/// Behaviour shared by every code enumeration
///
/// Implementations are generated by [`define_code_enum!`]; codes are unique
/// within an enumeration and labels never change.
pub trait CodeEnum: Copy + Sized + 'static {
    /// Name of the enumeration, used in error messages
    const ENUMERATION: &'static str;

    /// All members in declaration order
    const MEMBERS: &'static [Self];

    /// Returns the integer code
    fn code(&self) -> i32;

    /// Returns the display label
    fn label(&self) -> &'static str;

    /// Returns true if the string expression denotes this member's code
    fn has_code(&self, expression: &str) -> bool {
        parse_code(expression).is_some_and(|code| code == self.code())
    }

    /// Returns the `{code, label}` pair for this member
    fn value(&self) -> CodeValue {
        CodeValue {
            code: self.code(),
            label: self.label(),
        }
    }

    /// Finds the member with the given code
    ///
    /// # Errors
    ///
    /// Returns `CodeError::NotFound` if no member has that code
    fn find(code: i32) -> Result<Self, CodeError> {
        Self::MEMBERS
            .iter()
            .copied()
            .find(|member| member.code() == code)
            .ok_or_else(|| CodeError::NotFound {
                enumeration: Self::ENUMERATION,
                code: code.to_string(),
            })
    }

    /// Finds the member denoted by a string expression
    ///
    /// # Errors
    ///
    /// Returns `CodeError::NotFound` if the expression is not an integer or
    /// no member has that code
    fn find_str(expression: &str) -> Result<Self, CodeError> {
        Self::MEMBERS
            .iter()
            .copied()
            .find(|member| member.has_code(expression))
            .ok_or_else(|| CodeError::NotFound {
                enumeration: Self::ENUMERATION,
                code: expression.to_string(),
            })
    }

    /// Returns true if any member's code equals the parsed expression
    fn matches(expression: &str) -> bool {
        Self::MEMBERS.iter().any(|member| member.has_code(expression))
    }

    /// Returns all `{code, label}` pairs in declaration order
    fn options() -> Vec<CodeValue> {
        Self::MEMBERS.iter().map(|member| member.value()).collect()
    }
}

/// Defines a closed code enumeration
///
/// ```rust
/// use core_kernel::{define_code_enum, CodeEnum};
///
/// define_code_enum! {
///     /// Yes/no answer
///     pub enum Answer: "Answer" {
///         Yes = 1 => "yes",
///         No = 0 => "no",
///     }
/// }
///
/// assert_eq!(Answer::find(0).unwrap(), Answer::No);
/// assert!(Answer::matches("1"));
/// ```
#[macro_export]
macro_rules! define_code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $enumeration:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:literal => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $crate::codes::CodeEnum for $name {
            const ENUMERATION: &'static str = $enumeration;
            const MEMBERS: &'static [Self] = &[$($name::$variant),+];

            fn code(&self) -> i32 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    define_code_enum! {
        enum Light: "Light" {
            Red = 1 => "red",
            Green = 2 => "green",
            Off = 0 => "off",
        }
    }

    #[test]
    fn test_find_by_code() {
        assert_eq!(Light::find(2).unwrap(), Light::Green);
        assert_eq!(Light::find(0).unwrap(), Light::Off);
    }

    #[test]
    fn test_find_unknown_code() {
        let error = Light::find(7).unwrap_err();
        assert_eq!(
            error,
            CodeError::NotFound {
                enumeration: "Light",
                code: "7".to_string(),
            }
        );
        assert!(error.to_string().contains("Light"));
    }

    #[test]
    fn test_matches_rejects_empty_and_garbage() {
        assert!(!Light::matches(""));
        assert!(!Light::matches("red"));
        assert!(!Light::matches("1.0"));
        assert!(!Light::matches(" 1"));
    }

    #[test]
    fn test_matches_accepts_sign_and_leading_zero() {
        assert!(Light::matches("01"));
        assert!(Light::matches("+2"));
        assert!(Light::matches("-0"));
        assert!(!Light::matches("3"));
    }

    #[test]
    fn test_options_keep_declaration_order() {
        let codes: Vec<i32> = Light::options().iter().map(|o| o.code).collect();
        assert_eq!(codes, vec![1, 2, 0]);
    }
}
