//! Identifier types for catalog entries.
//!
//! Production methods, demand scenarios and levers are referenced by
//! strongly-typed string identifiers so that a demand id can never be passed
//! where a lever id is expected.

use std::borrow::Borrow;
use std::fmt;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

catalog_id!(
    /// Identifier of a production option (e.g. `coPacker`).
    ///
    /// # Examples
    ///
    /// ```
    /// use model_core::types::MethodId;
    ///
    /// let id = MethodId::new("coPacker");
    /// assert_eq!(id.as_str(), "coPacker");
    /// ```
    MethodId
);

catalog_id!(
    /// Identifier of a demand scenario (e.g. `medium`).
    DemandId
);

catalog_id!(
    /// Identifier of a lever, unique across growth and defensive levers.
    LeverId
);
