// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf registries
//!
//! Leaves have empty member tables and carry the text hooks instead. The
//! read-only registry has no setter at all, so a write is rejected by the
//! registry shape rather than by a runtime flag.
//!
//! Values are always formatted and parsed through [`LeafValue::Repr`] with
//! precision `0`: enumerations travel as their integer discriminant.

use core::any::Any;

use crate::codec::{from_text, to_text};
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::property::{ExchangeEndpoint, Property, ReadEndpoint, ReadOnly};
use crate::registry::{GetText, Introspect, SetText, TypeRegistry};
use crate::value::LeafValue;

fn get_endpoint_text<E: ReadEndpoint + Any>(handle: &Handle<'_>, buf: &mut [u8]) -> Result<usize> {
    let endpoint = handle.view::<E>()?;
    to_text(&endpoint.read().to_repr(), buf, 0)
}

fn set_endpoint_text<E: ExchangeEndpoint + Any>(handle: &Handle<'_>, text: &[u8]) -> Result<()> {
    let endpoint = handle.view::<E>()?;
    let repr = from_text::<<E::Value as LeafValue>::Repr>(text, 0)?;
    let value = <E::Value as LeafValue>::from_repr(repr).ok_or(Error::InvalidValue)?;
    // Previous value is not reported to the caller
    let _ = endpoint.exchange(value);
    Ok(())
}

fn get_scalar_text(handle: &Handle<'_>, buf: &mut [u8]) -> Result<usize> {
    handle.scalar()?.to_text(buf, 0)
}

impl TypeRegistry {
    /// Registry of computed (by-value, read-only) members
    pub const COMPUTED: &'static TypeRegistry =
        &TypeRegistry::leaf("computed", get_scalar_text as GetText, None);

    /// Leaf registry for a read-only endpoint type
    pub const fn read_only<E: ReadEndpoint + Any>(name: &'static str) -> Self {
        TypeRegistry::leaf(name, get_endpoint_text::<E> as GetText, None)
    }

    /// Leaf registry for a read-write endpoint type
    pub const fn read_write<E: ExchangeEndpoint + Any>(name: &'static str) -> Self {
        TypeRegistry::leaf(
            name,
            get_endpoint_text::<E> as GetText,
            Some(set_endpoint_text::<E> as SetText),
        )
    }
}

impl<T: LeafValue> Introspect for Property<T> {
    const REGISTRY: &'static TypeRegistry = &TypeRegistry::read_write::<Self>("Property");
}

impl<T: LeafValue> Introspect for ReadOnly<T> {
    const REGISTRY: &'static TypeRegistry = &TypeRegistry::read_only::<Self>("ReadOnly");
}

macro_rules! impl_atomic_leaf {
    ($($width:literal => $atomic:ident),* $(,)?) => {
        $(
            #[cfg(target_has_atomic = $width)]
            impl Introspect for core::sync::atomic::$atomic {
                const REGISTRY: &'static TypeRegistry =
                    &TypeRegistry::read_write::<Self>(stringify!($atomic));
            }
        )*
    };
}

impl_atomic_leaf!(
    "8" => AtomicBool,
    "8" => AtomicU8,
    "8" => AtomicI8,
    "16" => AtomicU16,
    "16" => AtomicI16,
    "32" => AtomicU32,
    "32" => AtomicI32,
);

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    crate::leaf_enum! {
        enum State: u8 {
            Undefined = 0,
            Idle = 1,
            ClosedLoop = 8,
        }
    }

    struct Node {
        gain: Property<f32>,
        count: ReadOnly<u32>,
        state: Property<State>,
        armed: AtomicBool,
        errors: AtomicU32,
    }

    impl Node {
        fn doubled(&self) -> u32 {
            self.count.get() * 2
        }
    }

    crate::introspect! {
        Node {
            gain: Property<f32>,
            count: ReadOnly<u32>,
            state: Property<State>,
            armed: AtomicBool,
            errors: AtomicU32,
        }
        computed {
            doubled: u32,
        }
    }

    fn node() -> Node {
        Node {
            gain: Property::new(0.25),
            count: ReadOnly::new(21),
            state: Property::new(State::Idle),
            armed: AtomicBool::new(false),
            errors: AtomicU32::new(0),
        }
    }

    fn read(handle: &Handle<'_>) -> std::string::String {
        let mut buf = [0u8; 32];
        let len = handle.get_as_text(&mut buf).unwrap();
        std::str::from_utf8(&buf[..len]).unwrap().to_owned()
    }

    #[test]
    fn test_read_write_round_trip() {
        let n = node();
        let gain = Handle::new(&n).child("gain");
        gain.set_from_text(b"1.75").unwrap();
        assert_eq!(read(&gain), "1.75");
        assert_eq!(n.gain.get(), 1.75);
    }

    #[test]
    fn test_failed_parse_leaves_value() {
        let n = node();
        let gain = Handle::new(&n).child("gain");
        assert_eq!(gain.set_from_text(b"fast"), Err(Error::ParseError));
        assert_eq!(n.gain.get(), 0.25);
    }

    #[test]
    fn test_read_only_rejects_write() {
        let n = node();
        let count = Handle::new(&n).child("count");
        assert_eq!(read(&count), "21");
        assert_eq!(count.set_from_text(b"5"), Err(Error::ReadOnly));
        assert_eq!(n.count.get(), 21);
    }

    #[test]
    fn test_read_only_small_buffer() {
        let n = node();
        let count = Handle::new(&n).child("count");
        let mut buf = [0u8; 1];
        assert_eq!(count.get_as_text(&mut buf), Err(Error::BufferTooSmall));
        assert_eq!(buf, [0]);
    }

    #[test]
    fn test_enum_travels_as_integer() {
        let n = node();
        let state = Handle::new(&n).child("state");
        assert_eq!(read(&state), "1");

        state.set_from_text(b"8").unwrap();
        assert_eq!(n.state.get(), State::ClosedLoop);

        assert_eq!(state.set_from_text(b"3"), Err(Error::InvalidValue));
        assert_eq!(n.state.get(), State::ClosedLoop);
    }

    #[test]
    fn test_atomic_leaves() {
        let n = node();
        let handle = Handle::new(&n);
        handle.child("armed").set_from_text(b"true").unwrap();
        assert!(n.armed.load(Ordering::SeqCst));
        assert_eq!(read(&handle.child("armed")), "1");

        assert_eq!(
            handle.child("errors").set_from_text(b"0x10"),
            Err(Error::ParseError)
        );
        handle.child("errors").set_from_text(b"16").unwrap();
        assert_eq!(n.errors.load(Ordering::SeqCst), 16);
    }

    #[test]
    fn test_computed_member() {
        let n = node();
        let doubled = Handle::new(&n).child("doubled");
        assert!(doubled.is_valid());
        assert_eq!(read(&doubled), "42");
        assert_eq!(doubled.set_from_text(b"1"), Err(Error::ReadOnly));
        assert!(doubled.registry().unwrap().is_leaf());
    }

    #[test]
    fn test_leaves_cannot_be_entered() {
        let n = node();
        assert!(!Handle::new(&n).child("gain.x").is_valid());
        assert!(!Handle::new(&n).child("doubled.x").is_valid());
    }
}
