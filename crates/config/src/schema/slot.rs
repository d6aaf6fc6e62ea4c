//! Leaf slots: scalar and list-of-scalar fields.

use secrecy::{ExposeSecret, SecretString};

use super::{FieldKind, ScalarKind};
use crate::coerce::{CoercionError, coerce};
use crate::value::Value;

/// A mutable leaf holding a scalar or a list of scalars.
pub trait Slot {
    /// True when the slot holds its kind's zero value.
    fn is_zero(&self) -> bool;

    /// Coerce `raw` into the slot's type and overwrite the current value.
    fn assign(&mut self, raw: &str) -> Result<(), CoercionError>;

    /// Current value as a generic tree leaf.
    fn snapshot(&self) -> Value;
}

/// Static kind information for leaf types, used by generated schemas.
pub trait ScalarField: Slot {
    const KIND: FieldKind;
}

/// Conversion between one scalar Rust type and a coerced `Value`.
trait Scalar: Sized {
    const KIND: ScalarKind;

    fn from_value(value: Value) -> Option<Self>;

    fn to_value(&self) -> Value;

    fn is_zero(&self) -> bool;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

/// Every slot integer type is at most 64 bits wide, so a value outside the
/// `i64` range is a `u64`.
fn integer_value(n: i128) -> Value {
    match i64::try_from(n) {
        Ok(n) => Value::Integer(n),
        Err(_) => Value::Unsigned(n as u64),
    }
}

macro_rules! integer_scalars {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::Integer;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Integer(n) => <$ty>::try_from(n).ok(),
                    Value::Unsigned(n) => <$ty>::try_from(n).ok(),
                    _ => None,
                }
            }

            fn to_value(&self) -> Value {
                integer_value(*self as i128)
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

integer_scalars!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_scalars {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::Float;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Float(f) => {
                        let narrowed = f as $ty;
                        // Finite input that overflows the target is rejected.
                        (narrowed.is_finite() || !f.is_finite()).then_some(narrowed)
                    }
                    _ => None,
                }
            }

            fn to_value(&self) -> Value {
                Value::Float(f64::from(*self))
            }

            fn is_zero(&self) -> bool {
                *self == 0.0
            }
        }
    )*};
}

float_scalars!(f32, f64);

macro_rules! scalar_slots {
    ($($ty:ty),* $(,)?) => {$(
        impl Slot for $ty {
            fn is_zero(&self) -> bool {
                Scalar::is_zero(self)
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoercionError> {
                let kind = FieldKind::Scalar(<$ty as Scalar>::KIND);
                let value = coerce(raw, kind)?;
                *self = <$ty as Scalar>::from_value(value)
                    .ok_or_else(|| CoercionError::new(raw, kind))?;
                Ok(())
            }

            fn snapshot(&self) -> Value {
                <$ty as Scalar>::to_value(self)
            }
        }

        impl ScalarField for $ty {
            const KIND: FieldKind = FieldKind::Scalar(<$ty as Scalar>::KIND);
        }

        impl Slot for Vec<$ty> {
            fn is_zero(&self) -> bool {
                self.is_empty()
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoercionError> {
                let kind = FieldKind::List(<$ty as Scalar>::KIND);
                let Value::List(items) = coerce(raw, kind)? else {
                    return Err(CoercionError::new(raw, kind));
                };
                *self = items
                    .into_iter()
                    .map(<$ty as Scalar>::from_value)
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| CoercionError::new(raw, kind))?;
                Ok(())
            }

            fn snapshot(&self) -> Value {
                Value::List(self.iter().map(<$ty as Scalar>::to_value).collect())
            }
        }

        impl ScalarField for Vec<$ty> {
            const KIND: FieldKind = FieldKind::List(<$ty as Scalar>::KIND);
        }
    )*};
}

scalar_slots!(
    String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64
);

/// Secret strings never expose their contents through snapshots.
impl Slot for SecretString {
    fn is_zero(&self) -> bool {
        self.expose_secret().is_empty()
    }

    fn assign(&mut self, raw: &str) -> Result<(), CoercionError> {
        *self = SecretString::new(raw.into());
        Ok(())
    }

    fn snapshot(&self) -> Value {
        Value::masked()
    }
}

impl ScalarField for SecretString {
    const KIND: FieldKind = FieldKind::Scalar(ScalarKind::String);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_slot_rejects_out_of_range() {
        let mut port: u16 = 0;
        port.assign("8080").unwrap();
        assert_eq!(port, 8080);

        let err = port.assign("70000").unwrap_err();
        assert_eq!(err.raw(), "70000");
        assert_eq!(port, 8080, "failed assignment must not clobber the slot");

        let mut small: u8 = 1;
        assert!(small.assign("-1").is_err());
    }

    #[test]
    fn test_u64_slot_keeps_full_range() {
        let mut limit: u64 = 0;
        limit.assign("18446744073709551615").unwrap();
        assert_eq!(limit, u64::MAX);
        assert_eq!(limit.snapshot(), Value::Unsigned(u64::MAX));

        limit.assign("42").unwrap();
        assert_eq!(limit.snapshot(), Value::Integer(42));

        let mut signed: i64 = 0;
        assert!(signed.assign("18446744073709551615").is_err());
    }

    #[test]
    fn test_list_slot_assign_and_zero() {
        let mut ports: Vec<u32> = Vec::new();
        assert!(Slot::is_zero(&ports));
        ports.assign("80, 443,,8080").unwrap();
        assert_eq!(ports, vec![80, 443, 8080]);
        assert_eq!(
            ports.snapshot(),
            Value::List(vec![
                Value::Integer(80),
                Value::Integer(443),
                Value::Integer(8080)
            ])
        );

        ports.assign("").unwrap();
        assert!(ports.is_empty());
    }

    #[test]
    fn test_float_and_bool_slots() {
        let mut ratio: f32 = 0.0;
        ratio.assign("0.25").unwrap();
        assert_eq!(ratio, 0.25);

        let err = ratio.assign("1e40").unwrap_err();
        assert_eq!(err.raw(), "1e40");
        assert_eq!(ratio, 0.25);
        ratio.assign("inf").unwrap();
        assert!(ratio.is_infinite());

        let mut flag = false;
        flag.assign("TRUE").unwrap();
        assert!(flag);
        assert!(flag.assign("yes").is_err());
    }

    #[test]
    fn test_secret_string_slot_is_always_masked() {
        let mut token = SecretString::new("".into());
        assert!(Slot::is_zero(&token));
        token.assign("s3cr3t").unwrap();
        assert!(!Slot::is_zero(&token));
        assert_eq!(token.expose_secret(), "s3cr3t");
        assert_eq!(token.snapshot(), Value::masked());
    }
}
