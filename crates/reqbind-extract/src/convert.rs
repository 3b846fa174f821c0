//! Conversion of raw wire strings into typed destinations.
//!
//! Two traits split the work:
//!
//! - [`FromParam`] is the scalar conversion policy: how one literal becomes a
//!   value of a given kind. Implement it for your own scalar types.
//! - [`ParamTarget`] is an addressable destination slot that accepts either one
//!   raw string or a sequence of them. Scalars, `Vec<T>`, `Option<T>` and
//!   uniquely-owned `Arc<T>`/`Rc<T>` are targets out of the box.
//!
//! A destination is only written once the whole conversion has succeeded.
//!
//! # Example
//!
//! ```rust
//! use reqbind_extract::{convert_value, convert_values};
//!
//! let mut id = 0u32;
//! convert_value("42", &mut id).unwrap();
//! assert_eq!(id, 42);
//!
//! let mut tags: Vec<String> = Vec::new();
//! convert_values(&["a".to_string(), "b".to_string()], &mut tags).unwrap();
//! assert_eq!(tags, ["a", "b"]);
//! ```
//!
//! A plain value is not a destination; the converter needs to write in place:
//!
//! ```compile_fail
//! use reqbind_extract::convert_value;
//!
//! let id = 0u32;
//! convert_value("42", id).unwrap();
//! ```

use std::rc::Rc;
use std::sync::Arc;

use crate::ConvertError;

/// Parses a single literal into a value.
///
/// Integers are base 10, floats use Rust's float grammar and booleans accept
/// `1 t T TRUE true True` and `0 f F FALSE false False`. Strings are taken
/// verbatim, so an empty literal is valid for `String` and invalid for
/// numbers and booleans.
pub trait FromParam: Sized {
    /// Parses `raw` into `Self`.
    fn from_param(raw: &str) -> Result<Self, ConvertError>;
}

/// An addressable destination for raw wire values.
pub trait ParamTarget {
    /// Writes a single raw value.
    fn set_one(&mut self, raw: &str) -> Result<(), ConvertError>;

    /// Writes a sequence of raw values.
    ///
    /// The default accepts zero values (no-op) or exactly one value; more
    /// than one is a [`ConvertError::NotASequence`].
    fn set_many(&mut self, raw: &[String]) -> Result<(), ConvertError> {
        match raw {
            [] => Ok(()),
            [single] => self.set_one(single),
            _ => Err(ConvertError::NotASequence { count: raw.len() }),
        }
    }
}

/// Converts one raw string into `target`.
pub fn convert_value<T: ParamTarget + ?Sized>(
    raw: &str,
    target: &mut T,
) -> Result<(), ConvertError> {
    target.set_one(raw)
}

/// Converts a sequence of raw strings into `target`.
pub fn convert_values<T: ParamTarget + ?Sized>(
    raw: &[String],
    target: &mut T,
) -> Result<(), ConvertError> {
    target.set_many(raw)
}

macro_rules! impl_from_param_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromParam for $ty {
                fn from_param(raw: &str) -> Result<Self, ConvertError> {
                    raw.parse().map_err(|_| ConvertError::invalid::<$ty>(raw))
                }
            }
        )*
    };
}

impl_from_param_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char,
);

impl FromParam for bool {
    fn from_param(raw: &str) -> Result<Self, ConvertError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ConvertError::invalid::<bool>(raw)),
        }
    }
}

impl FromParam for String {
    fn from_param(raw: &str) -> Result<Self, ConvertError> {
        Ok(raw.to_owned())
    }
}

impl FromParam for Box<str> {
    fn from_param(raw: &str) -> Result<Self, ConvertError> {
        Ok(raw.into())
    }
}

macro_rules! impl_param_target_for_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamTarget for $ty {
                fn set_one(&mut self, raw: &str) -> Result<(), ConvertError> {
                    *self = <$ty as FromParam>::from_param(raw)?;
                    Ok(())
                }
            }
        )*
    };
}

impl_param_target_for_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, bool,
    String, Box<str>,
);

impl<T: FromParam> ParamTarget for Vec<T> {
    fn set_one(&mut self, raw: &str) -> Result<(), ConvertError> {
        *self = vec![T::from_param(raw)?];
        Ok(())
    }

    fn set_many(&mut self, raw: &[String]) -> Result<(), ConvertError> {
        if raw.is_empty() {
            return Ok(());
        }
        *self = raw
            .iter()
            .map(|r| T::from_param(r))
            .collect::<Result<_, _>>()?;
        Ok(())
    }
}

impl<T: ParamTarget + Default> ParamTarget for Option<T> {
    fn set_one(&mut self, raw: &str) -> Result<(), ConvertError> {
        let mut value = T::default();
        value.set_one(raw)?;
        *self = Some(value);
        Ok(())
    }

    fn set_many(&mut self, raw: &[String]) -> Result<(), ConvertError> {
        if raw.is_empty() {
            return Ok(());
        }
        let mut value = T::default();
        value.set_many(raw)?;
        *self = Some(value);
        Ok(())
    }
}

// A shared pointer can only be written through while nothing else holds it.
impl<T: ParamTarget + ?Sized> ParamTarget for Arc<T> {
    fn set_one(&mut self, raw: &str) -> Result<(), ConvertError> {
        Self::get_mut(self)
            .ok_or(ConvertError::PointerTarget)?
            .set_one(raw)
    }

    fn set_many(&mut self, raw: &[String]) -> Result<(), ConvertError> {
        Self::get_mut(self)
            .ok_or(ConvertError::PointerTarget)?
            .set_many(raw)
    }
}

impl<T: ParamTarget + ?Sized> ParamTarget for Rc<T> {
    fn set_one(&mut self, raw: &str) -> Result<(), ConvertError> {
        Self::get_mut(self)
            .ok_or(ConvertError::PointerTarget)?
            .set_one(raw)
    }

    fn set_many(&mut self, raw: &[String]) -> Result<(), ConvertError> {
        Self::get_mut(self)
            .ok_or(ConvertError::PointerTarget)?
            .set_many(raw)
    }
}
