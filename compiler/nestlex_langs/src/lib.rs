//! Ready-made languages for the nestlex scanner.
//!
//! - [`Java`]: braces delimit scopes.
//! - [`Python`]: a `:` ending a line opens a scope, dedenting closes it.
//! - [`Dull`]: no boundaries at all; only splits words from symbols.
//!
//! [`by_name`] looks a language up by the name the CLI accepts.

mod dull;
mod java;
mod python;

pub use dull::Dull;
pub use java::Java;
pub use python::Python;

use nestlex_scan::Language;

/// Names accepted by [`by_name`], in display order.
const NAMES: [&str; 3] = ["java", "python", "dull"];

/// Every bundled language name.
pub fn names() -> &'static [&'static str] {
    &NAMES
}

/// Lookup of a language that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown language `{name}` (known: {})", NAMES.join(", "))]
pub struct UnknownLanguage {
    pub name: String,
}

/// Language called `name`, ignoring ASCII case.
pub fn by_name(name: &str) -> Result<Box<dyn Language>, UnknownLanguage> {
    match name.to_ascii_lowercase().as_str() {
        "java" => Ok(Box::new(Java::new())),
        "python" => Ok(Box::new(Python::new())),
        "dull" => Ok(Box::new(Dull::new())),
        _ => Err(UnknownLanguage {
            name: name.to_owned(),
        }),
    }
}

/// Identifier characters shared by every bundled language.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_listed_name_resolves() {
        for &name in names() {
            let language = by_name(name).map(|l| l.name().to_owned());
            assert_eq!(language.as_deref(), Ok(name));
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(by_name("Java").is_ok());
        assert!(by_name("PYTHON").is_ok());
    }

    #[test]
    fn unknown_name_lists_known_ones() {
        let Err(err) = by_name("cobol") else {
            panic!("cobol should not resolve");
        };
        assert_eq!(
            err.to_string(),
            "unknown language `cobol` (known: java, python, dull)"
        );
    }

    #[test]
    fn bundled_languages_validate() {
        for name in NAMES {
            let Ok(language) = by_name(name) else {
                panic!("{name} should resolve");
            };
            assert_eq!(language.validate(), Ok(()));
        }
    }
}
