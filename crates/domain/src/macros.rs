//! Macro for implementing code conversions on small domain enums
//!
//! Several domain enums (language codes, provider modes, log formats) map
//! one-to-one onto short lowercase codes that appear in configuration files,
//! environment variables and request bodies. This macro generates the
//! `as_code`, `Display` and `FromStr` plumbing in one place.
//!
//! # Example
//!
//! ```rust
//! use agrione_domain::impl_code_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Season {
//!     Kharif,
//!     Rabi,
//! }
//!
//! impl_code_conversions!(Season {
//!     Kharif => "kharif",
//!     Rabi => "rabi",
//! });
//!
//! assert_eq!(Season::Rabi.to_string(), "rabi");
//! assert_eq!("KHARIF".parse::<Season>().unwrap(), Season::Kharif);
//! ```

/// Implements `as_code`, `Display` and `FromStr` for a code enum
///
/// - `as_code` / `Display`: the lowercase code
/// - `FromStr`: case-insensitive, surrounding whitespace ignored
/// - `ALL`: every variant in declaration order
#[macro_export]
macro_rules! impl_code_conversions {
    ($enum_name:ident { $($variant:ident => $code:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$enum_name] = &[$($enum_name::$variant),+];

            /// The short code for this variant.
            pub fn as_code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_code())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
