// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property endpoints
//!
//! An endpoint is the accessor a leaf handle wraps. Read-only endpoints
//! expose [`ReadEndpoint::read`]; read-write endpoints additionally expose
//! [`ExchangeEndpoint::exchange`], which installs a new value and hands back
//! the previous one.
//!
//! Atomicity of `read` / `exchange` is the endpoint's business. The cell
//! endpoints below are meant for single-context firmware state; the atomic
//! endpoints can be shared with interrupt handlers.

use core::cell::Cell;

use crate::value::LeafValue;

/// Endpoint that can be read
pub trait ReadEndpoint {
    /// Value type behind the endpoint
    type Value: LeafValue;

    /// Current value
    fn read(&self) -> Self::Value;
}

/// Endpoint that can be read and written
pub trait ExchangeEndpoint: ReadEndpoint {
    /// Install `value` and return the previous value
    fn exchange(&self, value: Self::Value) -> Self::Value;
}

/// Read-write property backed by a [`Cell`]
///
/// # Example
///
/// ```
/// use fibre_micro::{ExchangeEndpoint, Property, ReadEndpoint};
///
/// let speed = Property::new(1.0f32);
/// assert_eq!(speed.exchange(2.0), 1.0);
/// assert_eq!(speed.read(), 2.0);
/// ```
#[derive(Debug, Default)]
pub struct Property<T: LeafValue> {
    value: Cell<T>,
}

impl<T: LeafValue> Property<T> {
    /// Create a new property
    pub const fn new(value: T) -> Self {
        Self {
            value: Cell::new(value),
        }
    }

    /// Current value (application side)
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Overwrite the value (application side)
    pub fn set(&self, value: T) {
        self.value.set(value);
    }
}

impl<T: LeafValue> ReadEndpoint for Property<T> {
    type Value = T;

    fn read(&self) -> T {
        self.value.get()
    }
}

impl<T: LeafValue> ExchangeEndpoint for Property<T> {
    fn exchange(&self, value: T) -> T {
        self.value.replace(value)
    }
}

/// Read-only property backed by a [`Cell`]
///
/// Remote callers can only read it. The owning application still updates it
/// through [`ReadOnly::set`] (measurements, status flags, error codes).
#[derive(Debug, Default)]
pub struct ReadOnly<T: LeafValue> {
    value: Cell<T>,
}

impl<T: LeafValue> ReadOnly<T> {
    /// Create a new read-only property
    pub const fn new(value: T) -> Self {
        Self {
            value: Cell::new(value),
        }
    }

    /// Current value (application side)
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Update the value (application side)
    pub fn set(&self, value: T) {
        self.value.set(value);
    }
}

impl<T: LeafValue> ReadEndpoint for ReadOnly<T> {
    type Value = T;

    fn read(&self) -> T {
        self.value.get()
    }
}

macro_rules! impl_atomic_endpoint {
    ($($width:literal => $atomic:ident($t:ty)),* $(,)?) => {
        $(
            #[cfg(target_has_atomic = $width)]
            impl ReadEndpoint for core::sync::atomic::$atomic {
                type Value = $t;

                fn read(&self) -> $t {
                    self.load(core::sync::atomic::Ordering::SeqCst)
                }
            }

            #[cfg(target_has_atomic = $width)]
            impl ExchangeEndpoint for core::sync::atomic::$atomic {
                fn exchange(&self, value: $t) -> $t {
                    self.swap(value, core::sync::atomic::Ordering::SeqCst)
                }
            }
        )*
    };
}

impl_atomic_endpoint!(
    "8" => AtomicBool(bool),
    "8" => AtomicU8(u8),
    "8" => AtomicI8(i8),
    "16" => AtomicU16(u16),
    "16" => AtomicI16(i16),
    "32" => AtomicU32(u32),
    "32" => AtomicI32(i32),
);

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicU32;

    #[test]
    fn test_property_exchange_returns_previous() {
        let p = Property::new(5i32);
        assert_eq!(p.exchange(6), 5);
        assert_eq!(p.read(), 6);
        assert_eq!(p.get(), 6);
    }

    #[test]
    fn test_read_only_application_update() {
        let r = ReadOnly::new(false);
        r.set(true);
        assert!(r.read());
    }

    #[test]
    fn test_atomic_endpoint() {
        let a = AtomicU32::new(10);
        assert_eq!(a.exchange(11), 10);
        assert_eq!(ReadEndpoint::read(&a), 11);
    }
}
