//! Localized validation messages
//!
//! Messages live in Fluent resources embedded at compile time, one file per
//! locale. A [`MessageCatalog`] is cheap to clone and shareable; it builds a
//! [`MessageRenderer`] for each validation pass.

use fluent::{FluentArgs, FluentBundle, FluentResource};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::validation::Violation;

const JA_JP: &str = include_str!("../locales/ja-JP/validation.ftl");
const EN_US: &str = include_str!("../locales/en-US/validation.ftl");

/// Supported message locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Japanese,
    English,
}

impl Locale {
    /// BCP 47 tag of the locale
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Japanese => "ja-JP",
            Locale::English => "en-US",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Locale::Japanese => JA_JP,
            Locale::English => EN_US,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Locale::Japanese),
            "en" | "en-us" => Ok(Locale::English),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

/// Source of message renderers for one locale
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Builds a renderer over the locale's resources
    pub fn renderer(&self) -> MessageRenderer {
        let langid: LanguageIdentifier = self.locale.tag().parse().unwrap_or_default();
        let mut bundle = FluentBundle::new(vec![langid]);
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(self.locale.source().to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!(locale = %self.locale, ?errors, "Fluent resource parsed with errors");
                resource
            }
        };
        if let Err(errors) = bundle.add_resource(resource) {
            warn!(locale = %self.locale, ?errors, "Fluent resource rejected");
        }

        MessageRenderer { bundle }
    }

    /// Renders a single violation
    pub fn render(&self, violation: &Violation) -> String {
        self.renderer().render(violation)
    }
}

/// Formats violations into display messages
pub struct MessageRenderer {
    bundle: FluentBundle<FluentResource>,
}

impl MessageRenderer {
    /// Renders the message for a violation
    ///
    /// Falls back to the message identifier when the resource lacks it.
    pub fn render(&self, violation: &Violation) -> String {
        let id = violation.message_id();
        let Some(pattern) = self.bundle.get_message(id).and_then(|m| m.value()) else {
            warn!(message_id = id, "Missing validation message");
            return id.to_string();
        };

        let mut args = FluentArgs::new();
        for (name, value) in violation.args() {
            args.set(name, value);
        }

        let mut errors = vec![];
        let message = self.bundle.format_pattern(pattern, Some(&args), &mut errors);
        if !errors.is_empty() {
            warn!(message_id = id, ?errors, "Validation message formatted with errors");
        }
        message.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::EnumId;

    #[test]
    fn test_japanese_age_message() {
        let catalog = MessageCatalog::default();
        let message = catalog.render(&Violation::AgeOutOfRange { min: 20, max: 100 });
        assert_eq!(message, "年齢は20歳以上100歳以下である必要があります");
    }

    #[test]
    fn test_english_max_length_message() {
        let catalog = MessageCatalog::new(Locale::English);
        let message = catalog.render(&Violation::MaxLength { max: 60 });
        assert_eq!(message, "Enter at most 60 characters");
    }

    #[test]
    fn test_every_violation_has_a_message_in_every_locale() {
        let violations = [
            Violation::NotBlank,
            Violation::MaxLength { max: 1 },
            Violation::Numeric,
            Violation::Katakana,
            Violation::Email,
            Violation::DateFormat { pattern: "yyyy/MM/dd" },
            Violation::CodeValue { enum_id: EnumId::Occupation },
            Violation::MedicalHistoryRequired,
            Violation::MedicalHistoryNotRequired,
            Violation::AgeOutOfRange { min: 20, max: 100 },
        ];
        for locale in [Locale::Japanese, Locale::English] {
            let renderer = MessageCatalog::new(locale).renderer();
            for violation in &violations {
                assert_ne!(renderer.render(violation), violation.message_id());
            }
        }
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("ja-JP".parse::<Locale>().unwrap(), Locale::Japanese);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::English);
        assert!("fr-FR".parse::<Locale>().is_err());
    }
}
