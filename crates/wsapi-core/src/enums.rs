//! Finite enumerations that can be read from string parameters.

use std::hash::Hash;

/// A closed set of named members that a parameter value can select.
///
/// Names are matched exactly and case-sensitively.
///
/// # Example
///
/// ```
/// use wsapi_core::ParamEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Severity {
///     Minor,
///     Major,
/// }
///
/// impl ParamEnum for Severity {
///     const VARIANTS: &'static [Self] = &[Self::Minor, Self::Major];
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::Minor => "MINOR",
///             Self::Major => "MAJOR",
///         }
///     }
/// }
///
/// assert_eq!(Severity::from_name("MAJOR"), Some(Severity::Major));
/// assert_eq!(Severity::from_name("major"), None);
/// assert_eq!(Severity::names(), vec!["MINOR", "MAJOR"]);
/// ```
pub trait ParamEnum: Copy + Eq + Hash + 'static {
    /// All members, in declaration order.
    const VARIANTS: &'static [Self];

    /// The name a client uses to select this member.
    fn name(self) -> &'static str;

    /// Looks up a member by its exact name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }

    /// All member names, in declaration order.
    fn names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|v| v.name()).collect()
    }

    /// Short type name used in error messages.
    fn type_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Qualifier {
        Trk,
        Brc,
    }

    impl ParamEnum for Qualifier {
        const VARIANTS: &'static [Self] = &[Self::Trk, Self::Brc];

        fn name(self) -> &'static str {
            match self {
                Self::Trk => "TRK",
                Self::Brc => "BRC",
            }
        }
    }

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(Qualifier::from_name("TRK"), Some(Qualifier::Trk));
        assert_eq!(Qualifier::from_name("trk"), None);
        assert_eq!(Qualifier::from_name(" TRK"), None);
    }

    #[test]
    fn test_type_name_is_short() {
        assert_eq!(Qualifier::type_name(), "Qualifier");
    }
}
