//! Macros for error handling.
//!
//! Convenience macros for creating and returning [`crate::error::ChairError`] instances.

/// Creates a [`crate::error::ChairError`] from error kind and description.
///
/// Accepts an optional dynamic detail, either moved as an owned [`String`] with `detail =`
/// or rendered through [`ToString`].
#[macro_export]
macro_rules! chair_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::ChairError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, detail = $detail:expr) => {
        $crate::error::ChairError::from(($kind, $desc, $detail))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::ChairError::from(($kind, $desc, $detail.to_string()))
    };
}

/// Creates and returns a [`crate::error::ChairError`] from the current function.
///
/// Supports the same optional detail arguments as [`chair_error!`].
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return ::core::result::Result::Err($crate::chair_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, detail = $detail:expr) => {
        return ::core::result::Result::Err($crate::chair_error!($kind, $desc, detail = $detail))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return ::core::result::Result::Err($crate::chair_error!($kind, $desc, $detail))
    };
}
