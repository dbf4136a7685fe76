//! `define_port_error!` builds the error enums returned by the driven ports.
//!
//! Each variant maps to a display message and gets a snake-case constructor
//! that accepts anything convertible into its field types, so adapters write
//! `SchoolRecordStoreError::conflict(body.message)` instead of spelling out the
//! struct literal. When every variant carries exactly one `String` field, as
//! the school store and auth service errors do, the enum also gets a
//! `message()` accessor returning the collaborator's text without the variant
//! prefix. Registration failures surface that text to the user.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_fields $variant [] [] $( $field : $ty, )*);
    };

    // Accumulates `impl Into<_>` parameters and their field initialisers.
    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_fields
            $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($rest)*
        );
    };

    (@enum
        $(#[$outer:meta])*
        $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    // Every variant wraps a single collaborator message.
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : String } => $message:expr
            ),+ $(,)?
        }
    ) => {
        define_port_error!(
            @enum
            $(#[$outer])*
            $name {
                $( $(#[$variant_meta])* $variant { $field : String } => $message ),+
            }
        );

        impl $name {
            /// Collaborator message without the variant prefix.
            #[must_use]
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { $field: text } )|+ => text,
                }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        define_port_error!(
            @enum
            $(#[$outer])*
            $name {
                $( $(#[$variant_meta])* $variant $( { $($field : $ty),* } )? => $message ),*
            }
        );
    };
}

pub(crate) use define_port_error;
