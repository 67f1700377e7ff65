//! Error types for the netgraph core library.
//!
//! Defines the error enum exposed by the public API and a convenient result
//! alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by [`crate::Network`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    /// A node index was outside the current node range.
    #[error("node {index} is out of bounds for a network of {len} node(s)")]
    NodeOutOfBounds {
        /// The requested node index.
        index: usize,
        /// Number of nodes in the network when the request was made.
        len: usize,
    },
    /// The requested mean degree cannot parameterise a Poisson draw.
    #[error("mean degree must be finite and non-negative (got {mean})")]
    InvalidMeanDegree {
        /// The rejected mean degree.
        mean: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`NetworkError`] variants.
    enum NetworkErrorCode for NetworkError {
        /// A node index was outside the current node range.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "NETWORK_NODE_OUT_OF_BOUNDS",
        /// The requested mean degree was negative or non-finite.
        InvalidMeanDegree => InvalidMeanDegree { .. } => "NETWORK_INVALID_MEAN_DEGREE",
    }
}

/// Convenient result alias for netgraph operations.
pub type Result<T> = core::result::Result<T, NetworkError>;
