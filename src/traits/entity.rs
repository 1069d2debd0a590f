//! Entity trait for typed projections of a value.

use crate::value::Value;

/// A typed view over a [`Value`].
///
/// Models hold their value rather than extending it; this trait is the
/// only way they expose it. The default accessors forward to the value so
/// every model shares the same location and link helpers.
pub trait Entity: Sized + Send {
    /// Wrap a value.
    fn from_value(value: Value) -> Self;

    /// The wrapped value.
    fn value(&self) -> &Value;

    /// The wrapped value, mutably.
    fn value_mut(&mut self) -> &mut Value;

    /// Unwrap the value.
    fn into_value(self) -> Value;

    /// Canonical location of the entity.
    fn abs_loc(&self) -> &str {
        self.value().abs_loc()
    }

    /// Project another entity type over the same value.
    fn cast<T: Entity>(self) -> T {
        T::from_value(self.into_value())
    }
}

/// Implement [`Entity`] for a single-field wrapper around a value.
macro_rules! impl_entity {
    ($($ty:ident),* $(,)?) => {$(
        impl $crate::traits::Entity for $ty {
            fn from_value(value: $crate::value::Value) -> Self {
                Self(value)
            }

            fn value(&self) -> &$crate::value::Value {
                &self.0
            }

            fn value_mut(&mut self) -> &mut $crate::value::Value {
                &mut self.0
            }

            fn into_value(self) -> $crate::value::Value {
                self.0
            }
        }
    )*};
}

pub(crate) use impl_entity;
