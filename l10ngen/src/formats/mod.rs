//! Output formats produced by l10ngen.
//!
//! Each submodule renders one family of artifacts from a borrowed [`Table`];
//! [`OutputKind`] selects which families a run produces.
//!
//! [`Table`]: crate::types::Table

pub mod arb;
pub mod typescript;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::Error;

/// Which artifact families to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Dart ARB bundles, one per locale.
    Dart,
    /// TypeScript interface, accessors and one module per locale.
    TypeScript,
    /// Both of the above.
    Both,
}

/// Implements [`std::fmt::Display`] for [`OutputKind`].
///
/// # Example
/// ```rust
/// use l10ngen::formats::OutputKind;
/// assert_eq!(OutputKind::Dart.to_string(), "dart");
/// assert_eq!(OutputKind::TypeScript.to_string(), "typescript");
/// assert_eq!(OutputKind::Both.to_string(), "both");
/// ```
impl Display for OutputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputKind::Dart => write!(f, "dart"),
            OutputKind::TypeScript => write!(f, "typescript"),
            OutputKind::Both => write!(f, "both"),
        }
    }
}

/// Accepts `dart` (or `arb`), `typescript` (or `ts`) and `both`,
/// case-insensitively. Anything else is [`Error::UnknownOutputKind`].
///
/// # Example
/// ```rust
/// use l10ngen::formats::OutputKind;
/// use std::str::FromStr;
/// assert_eq!(OutputKind::from_str("ARB").unwrap(), OutputKind::Dart);
/// assert_eq!(OutputKind::from_str("ts").unwrap(), OutputKind::TypeScript);
/// assert!(OutputKind::from_str("kotlin").is_err());
/// ```
impl FromStr for OutputKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dart" | "arb" => Ok(OutputKind::Dart),
            "typescript" | "ts" => Ok(OutputKind::TypeScript),
            "both" => Ok(OutputKind::Both),
            _ => Err(Error::UnknownOutputKind(s.to_string())),
        }
    }
}

impl OutputKind {
    pub fn includes_dart(&self) -> bool {
        matches!(self, OutputKind::Dart | OutputKind::Both)
    }

    pub fn includes_typescript(&self) -> bool {
        matches!(self, OutputKind::TypeScript | OutputKind::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_kind_from_str() {
        assert_eq!(OutputKind::from_str("dart").unwrap(), OutputKind::Dart);
        assert_eq!(OutputKind::from_str(" Dart ").unwrap(), OutputKind::Dart);
        assert_eq!(OutputKind::from_str("arb").unwrap(), OutputKind::Dart);
        assert_eq!(
            OutputKind::from_str("typescript").unwrap(),
            OutputKind::TypeScript
        );
        assert_eq!(OutputKind::from_str("TS").unwrap(), OutputKind::TypeScript);
        assert_eq!(OutputKind::from_str("both").unwrap(), OutputKind::Both);
    }

    #[test]
    fn test_output_kind_unknown() {
        match OutputKind::from_str("invalid") {
            Err(Error::UnknownOutputKind(kind)) => assert_eq!(kind, "invalid"),
            other => panic!("expected UnknownOutputKind, got {:?}", other),
        }
    }

    #[test]
    fn test_output_kind_display_parses_back() {
        for kind in [OutputKind::Dart, OutputKind::TypeScript, OutputKind::Both] {
            assert_eq!(OutputKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_includes() {
        assert!(OutputKind::Both.includes_dart());
        assert!(OutputKind::Both.includes_typescript());
        assert!(!OutputKind::Dart.includes_typescript());
        assert!(!OutputKind::TypeScript.includes_dart());
    }
}
