// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Navigation handle
//!
//! A [`Handle`] is a small `Copy` cursor into the application's object graph:
//! a type-erased [`Payload`] paired with the [`TypeRegistry`] that knows how
//! to interpret it. A handle without a registry is invalid; once invalid it
//! stays invalid.
//!
//! ## Path Resolution
//!
//! ```text
//! "axis0.motor.current_lim"
//!   root --lookup(axis0)--> Axis --lookup(motor)--> Motor --lookup(current_lim)--> Property<f32>
//! ```
//!
//! Each hop narrows the payload in place and rebinds the registry. A missing
//! segment invalidates the handle and the remaining segments are skipped.

use core::any::Any;

use crate::codec::Scalar;
use crate::error::{Error, Result};
use crate::registry::{Introspect, TypeRegistry};

/// Type-erased payload of a [`Handle`]
///
/// Being `Copy`, a payload can never own resources or need teardown.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// Reference to an object in the application graph
    Object(&'a (dyn Any + 'static)),
    /// Small value computed on demand
    Scalar(Scalar),
}

/// Type-erased cursor over an introspectable object graph
#[derive(Debug, Clone, Copy)]
pub struct Handle<'a> {
    payload: Payload<'a>,
    registry: Option<&'static TypeRegistry>,
}

impl<'a> Handle<'a> {
    /// Create a handle on `root`, bound to `T`'s registry
    pub fn new<T: Introspect>(root: &'a T) -> Self {
        Self {
            payload: Payload::Object(root),
            registry: Some(T::REGISTRY),
        }
    }

    /// Whether the handle is bound to a registry
    pub const fn is_valid(&self) -> bool {
        self.registry.is_some()
    }

    /// Bound registry, `None` if the handle is invalid
    pub const fn registry(&self) -> Option<&'static TypeRegistry> {
        self.registry
    }

    /// Current payload
    pub const fn payload(&self) -> Payload<'a> {
        self.payload
    }

    /// Resolve a dotted path relative to this handle.
    ///
    /// Only the first `length` bytes of `path` are considered, and an
    /// embedded NUL ends the path early. `self` is not modified.
    ///
    /// - empty path: the handle is returned unchanged
    /// - trailing `.` (`"a.b."`): same as `"a.b"`
    /// - doubled `.` (`"a..b"`): the empty segment is not found, the result
    ///   is invalid
    pub fn resolve_path(&self, path: &[u8], length: usize) -> Handle<'a> {
        let mut current = *self;

        let path = &path[..length.min(path.len())];
        let end = path.iter().position(|&b| b == 0).unwrap_or(path.len());

        let mut begin = 0;
        while begin < end {
            let Some(registry) = current.registry else {
                break;
            };

            let token_end = path[begin..end]
                .iter()
                .position(|&b| b == b'.')
                .map_or(end, |offset| begin + offset);
            let name = &path[begin..token_end];

            match registry.lookup(name, name.len()) {
                Some(entry) => {
                    log::trace!("[resolve] {} -> {}", registry.name(), entry.name());
                    entry.narrow(&mut current);
                }
                None => {
                    log::debug!(
                        "[resolve] no member '{}' in {}",
                        core::str::from_utf8(name).unwrap_or("<non-utf8>"),
                        registry.name()
                    );
                    current.invalidate();
                }
            }

            begin = (token_end + 1).min(end);
        }

        current
    }

    /// Resolve a dotted path (see [`Handle::resolve_path`])
    pub fn child(&self, path: &str) -> Handle<'a> {
        self.resolve_path(path.as_bytes(), path.len())
    }

    /// Resolve a dotted path, reporting why resolution failed
    ///
    /// Returns [`Error::InvalidHandle`] if `self` is already invalid and
    /// [`Error::NotFound`] if a segment does not resolve.
    pub fn lookup(&self, path: &str) -> Result<Handle<'a>> {
        if !self.is_valid() {
            return Err(Error::InvalidHandle);
        }
        let resolved = self.child(path);
        if resolved.is_valid() {
            Ok(resolved)
        } else {
            Err(Error::NotFound)
        }
    }

    /// Format the bound value into `buf`, returning the text length
    ///
    /// `buf` is only written on success.
    pub fn get_as_text(&self, buf: &mut [u8]) -> Result<usize> {
        match self.registry {
            Some(registry) => registry.get_as_text(self, buf),
            None => Err(Error::InvalidHandle),
        }
    }

    /// Parse `text` and write it to the bound value
    pub fn set_from_text(&self, text: &[u8]) -> Result<()> {
        match self.registry {
            Some(registry) => {
                let result = registry.set_from_text(self, text);
                if let Err(err) = result {
                    log::debug!("[set] {} rejected write: {}", registry.name(), err);
                }
                result
            }
            None => Err(Error::InvalidHandle),
        }
    }

    /// Format the bound value into an owned bounded string
    #[cfg(feature = "heapless")]
    pub fn get_string<const N: usize>(&self) -> Result<heapless::String<N>> {
        let mut buf = [0u8; N];
        let len = self.get_as_text(&mut buf)?;
        let text = core::str::from_utf8(&buf[..len]).map_err(|_| Error::ParseError)?;
        heapless::String::try_from(text).map_err(|_| Error::BufferTooSmall)
    }

    /// Typed view of the payload
    ///
    /// Fails with [`Error::TypeMismatch`] if the payload is not a `T`.
    pub fn view<T: Any>(&self) -> Result<&'a T> {
        let view = match self.payload {
            Payload::Object(object) => object.downcast_ref::<T>(),
            Payload::Scalar(_) => None,
        };
        view.ok_or_else(|| {
            log::error!(
                "[view] payload bound to {} is not a {}",
                self.registry.map_or("<invalid>", TypeRegistry::name),
                core::any::type_name::<T>()
            );
            Error::TypeMismatch
        })
    }

    /// Computed scalar payload
    pub fn scalar(&self) -> Result<Scalar> {
        match self.payload {
            Payload::Scalar(scalar) => Ok(scalar),
            Payload::Object(_) => Err(Error::TypeMismatch),
        }
    }

    pub(crate) fn rebind(&mut self, payload: Payload<'a>, registry: &'static TypeRegistry) {
        self.payload = payload;
        self.registry = Some(registry);
    }

    pub(crate) fn invalidate(&mut self) {
        self.registry = None;
    }
}
