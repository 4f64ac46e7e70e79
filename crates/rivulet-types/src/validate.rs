// SPDX-License-Identifier: MIT OR Apache-2.0
//! Validation trait for Rivulet types.
//!
//! # Example
//!
//! ```
//! use rivulet_types::{RivuletError, Validate};
//!
//! struct Capacity(usize);
//!
//! impl Validate for Capacity {
//!     fn validate(&self) -> Result<(), RivuletError> {
//!         if self.0 > 0 {
//!             Ok(())
//!         } else {
//!             Err(RivuletError::validation("VAL-100", "docs", "capacity", "must be positive"))
//!         }
//!     }
//! }
//!
//! assert!(Capacity(8).is_valid());
//! assert!(!Capacity(0).is_valid());
//! ```

use crate::RivuletError;

/// Types that can validate their own invariants.
///
/// Return `RivuletError::ValidationFailed` naming the offending field.
pub trait Validate {
    /// Validate the value, returning an error describing the first violation.
    ///
    /// # Errors
    ///
    /// Returns `RivuletError::ValidationFailed` if validation fails.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<(), RivuletError>;

    /// Check validity without detailed error information.
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self) -> Result<(), RivuletError> {
        (*self).validate()
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> Result<(), RivuletError> {
        (**self).validate()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    struct AlwaysValid;

    impl Validate for AlwaysValid {
        fn validate(&self) -> Result<(), RivuletError> {
            Ok(())
        }
    }

    struct AlwaysInvalid;

    impl Validate for AlwaysInvalid {
        fn validate(&self) -> Result<(), RivuletError> {
            Err(RivuletError::validation(
                "VAL-TEST",
                "rivulet-types",
                "test_field",
                "always fails",
            ))
        }
    }

    #[test]
    fn is_valid_reflects_validate() {
        assert!(AlwaysValid.is_valid());
        assert!(!AlwaysInvalid.is_valid());
    }

    #[test]
    fn validate_returns_field_and_message() {
        let Err(RivuletError::ValidationFailed { field, message, .. }) = AlwaysInvalid.validate()
        else {
            panic!("expected ValidationFailed");
        };
        assert_eq!(field, Some("test_field".into()));
        assert_eq!(message, "always fails");
    }

    #[test]
    fn reference_and_box_impls_delegate() {
        let v = AlwaysValid;
        let v_ref: &dyn Validate = &v;
        assert!(v_ref.is_valid());

        let boxed: Box<dyn Validate> = Box::new(AlwaysInvalid);
        assert!(!boxed.is_valid());
    }
}
