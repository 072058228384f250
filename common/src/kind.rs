//! Macros for defining kind enums.

/// Macro for defining a closed-set kind enum.
///
/// The enum is displayed and parsed in the provided `case` (any
/// [`strum`] case name). Parsing ignores ASCII case. Additional attributes
/// (like `serde` derives) are passed through to the enum.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     #[case = "lowercase"]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
///
/// assert_eq!("CUBE".parse::<Kind>(), Ok(Kind::Cube));
/// assert_eq!(Kind::Sphere.to_string(), "sphere");
/// ```
///
/// [`strum`]: https://docs.rs/strum
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        #[case = $case:literal]
        $(#[$attr:meta])*
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        $(#[$attr])*
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = $case, ascii_case_insensitive)]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };
}
