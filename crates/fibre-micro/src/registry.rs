// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static per-type property registries
//!
//! Every exposed type owns one [`TypeRegistry`]: an immutable table of named
//! members ([`Entry`]) plus, for leaf types, the text conversion hooks.
//! Registries are built by `const` evaluation, so they exist before any code
//! runs and never need initialization or teardown.
//!
//! Tables are usually generated with [`introspect!`](crate::introspect).

use core::any::Any;
use core::fmt;

use crate::error::{Error, Result};
use crate::handle::{Handle, Payload};

/// Narrowing operation of a registry entry
///
/// Receives the owner object and returns the member's payload, or `None`
/// when the owner is not of the type the entry was authored for.
pub type Narrow = for<'a> fn(&'a (dyn Any + 'static)) -> Option<Payload<'a>>;

/// Text formatting hook of a leaf registry
pub type GetText = fn(&Handle<'_>, &mut [u8]) -> Result<usize>;

/// Text parsing hook of a writable leaf registry
pub type SetText = fn(&Handle<'_>, &[u8]) -> Result<()>;

/// Type with a static property registry
///
/// Implementing this trait is what pairs a payload type with its registry;
/// [`Handle::new`] relies on it to bind the right table.
pub trait Introspect: Any {
    /// Registry describing the members of `Self`
    const REGISTRY: &'static TypeRegistry;
}

/// One named, navigable member of a type
#[derive(Clone, Copy)]
pub struct Entry {
    name: &'static str,
    narrow: Narrow,
    registry: &'static TypeRegistry,
}

impl Entry {
    /// Create a registry entry
    ///
    /// `registry` must describe the payload `narrow` produces. A mismatch is
    /// reported as [`Error::TypeMismatch`] when the leaf is accessed.
    pub const fn new(name: &'static str, narrow: Narrow, registry: &'static TypeRegistry) -> Self {
        Self {
            name,
            narrow,
            registry,
        }
    }

    /// Member name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Registry of the member's own type
    pub const fn registry(&self) -> &'static TypeRegistry {
        self.registry
    }

    /// Narrow `handle` in place to this member and rebind it to the
    /// member's registry.
    ///
    /// If the current payload is not an object of the expected owner type
    /// the handle is invalidated.
    pub fn narrow(&self, handle: &mut Handle<'_>) {
        let child = match handle.payload() {
            Payload::Object(owner) => (self.narrow)(owner),
            Payload::Scalar(_) => None,
        };

        match child {
            Some(payload) => handle.rebind(payload, self.registry),
            None => {
                log::error!(
                    "[registry] member '{}' cannot narrow a payload bound to '{}'",
                    self.name,
                    handle.registry().map_or("<invalid>", TypeRegistry::name)
                );
                handle.invalidate();
            }
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("registry", &self.registry.name)
            .finish()
    }
}

/// Immutable, static table of one type's members
pub struct TypeRegistry {
    name: &'static str,
    entries: &'static [Entry],
    get_text: Option<GetText>,
    set_text: Option<SetText>,
}

impl TypeRegistry {
    /// Create a structural (non-leaf) registry
    ///
    /// # Panics
    ///
    /// Panics if two entries share a name, or if a name is empty or contains
    /// a `.`. Registries are built in `const` context, so this surfaces as a
    /// build error.
    pub const fn new(name: &'static str, entries: &'static [Entry]) -> Self {
        let mut i = 0;
        while i < entries.len() {
            let entry_name = entries[i].name.as_bytes();
            assert!(!entry_name.is_empty(), "empty property name in type registry");

            let mut j = 0;
            while j < entry_name.len() {
                assert!(entry_name[j] != b'.', "property name contains '.'");
                j += 1;
            }
            i += 1;
        }

        assert!(
            Self::find_duplicate(entries).is_none(),
            "duplicate property name in type registry"
        );

        Self {
            name,
            entries,
            get_text: None,
            set_text: None,
        }
    }

    /// Create a leaf registry with text conversion hooks
    ///
    /// A `None` setter makes the leaf read-only.
    pub const fn leaf(name: &'static str, get_text: GetText, set_text: Option<SetText>) -> Self {
        Self {
            name,
            entries: &[],
            get_text: Some(get_text),
            set_text,
        }
    }

    /// First name that appears more than once in `entries`, if any
    pub const fn find_duplicate(entries: &[Entry]) -> Option<&'static str> {
        let mut i = 0;
        while i < entries.len() {
            let mut j = i + 1;
            while j < entries.len() {
                if str_eq(entries[i].name, entries[j].name) {
                    return Some(entries[i].name);
                }
                j += 1;
            }
            i += 1;
        }
        None
    }

    /// Type name (diagnostics only)
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Member table, in declaration order
    pub const fn entries(&self) -> &'static [Entry] {
        self.entries
    }

    /// Whether this registry has no navigable members
    pub const fn is_leaf(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the member whose name equals the first `length` bytes of `name`.
    ///
    /// Bytes of `name` past `length` are ignored, so `lookup(b"ab", 1)` finds
    /// an entry called `a`. The first matching entry wins.
    pub fn lookup(&self, name: &[u8], length: usize) -> Option<&'static Entry> {
        let key = &name[..length.min(name.len())];
        self.entries.iter().find(|entry| entry.name.as_bytes() == key)
    }

    /// Format the value bound to `handle` into `buf`
    ///
    /// Fails with [`Error::NotConvertible`] unless this is a leaf registry.
    pub fn get_as_text(&self, handle: &Handle<'_>, buf: &mut [u8]) -> Result<usize> {
        match self.get_text {
            Some(get_text) => get_text(handle, buf),
            None => Err(Error::NotConvertible),
        }
    }

    /// Parse `text` and write it to the value bound to `handle`
    ///
    /// Fails with [`Error::ReadOnly`] unless this registry provides a setter.
    pub fn set_from_text(&self, handle: &Handle<'_>, text: &[u8]) -> Result<()> {
        match self.set_text {
            Some(set_text) => set_text(handle, text),
            None => Err(Error::ReadOnly),
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("name", &self.name)
            .field("entries", &self.entries)
            .field("readable", &self.get_text.is_some())
            .field("writable", &self.set_text.is_some())
            .finish()
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
