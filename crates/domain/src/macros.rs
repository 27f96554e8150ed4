//! Macro for implementing Display and FromStr for wire enums
//!
//! The API encodes small closed sets (access scopes, requisition status
//! codes) as plain strings. This macro maps each variant to its exact wire
//! text and parses it back case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use nordigen_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Scope {
//!     Balances,
//!     Details,
//! }
//!
//! impl_wire_enum_conversions!(Scope {
//!     Balances => "balances",
//!     Details => "details",
//! });
//!
//! assert_eq!(Scope::Details.to_string(), "details");
//! assert_eq!("BALANCES".parse::<Scope>(), Ok(Scope::Balances));
//! ```

/// Implements Display and FromStr traits for wire enums
///
/// - Display writes the wire text exactly as given
/// - FromStr compares ASCII case-insensitively and names the enum on failure
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
