// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry authoring macros

/// Implement [`Introspect`](crate::Introspect) for a struct.
///
/// Lists the exposed fields with their types. Each field type must itself
/// implement `Introspect` (nested structs, [`Property`](crate::Property),
/// [`ReadOnly`](crate::ReadOnly), atomics). An optional `computed` block
/// exposes `&self` methods returning a [`LeafValue`](crate::LeafValue) as
/// read-only leaves.
///
/// Member names are the field and method names. Duplicates are a build
/// error:
///
/// ```compile_fail
/// use fibre_micro::{introspect, Handle, Property};
///
/// struct Twin {
///     gain: Property<f32>,
/// }
///
/// introspect! {
///     Twin {
///         gain: Property<f32>,
///         gain: Property<f32>,
///     }
/// }
///
/// let twin = Twin { gain: Property::new(1.0) };
/// let _ = Handle::new(&twin);
/// ```
///
/// # Example
///
/// ```
/// use fibre_micro::{introspect, Handle, Property, ReadOnly};
///
/// struct Encoder {
///     cpr: Property<i32>,
///     shadow_count: ReadOnly<i32>,
/// }
///
/// impl Encoder {
///     fn turns(&self) -> f32 {
///         self.shadow_count.get() as f32 / self.cpr.get() as f32
///     }
/// }
///
/// introspect! {
///     Encoder {
///         cpr: Property<i32>,
///         shadow_count: ReadOnly<i32>,
///     }
///     computed {
///         turns: f32,
///     }
/// }
///
/// let encoder = Encoder {
///     cpr: Property::new(8192),
///     shadow_count: ReadOnly::new(4096),
/// };
/// let mut buf = [0u8; 8];
/// let len = Handle::new(&encoder).child("turns").get_as_text(&mut buf).unwrap();
/// assert_eq!(&buf[..len], b"0.5");
/// ```
#[macro_export]
macro_rules! introspect {
    (
        $owner:ident {
            $($field:ident : $field_ty:ty),* $(,)?
        }
        $(computed {
            $($method:ident : $method_ty:ty),* $(,)?
        })?
    ) => {
        impl $crate::Introspect for $owner {
            const REGISTRY: &'static $crate::TypeRegistry = {
                const ENTRIES: &[$crate::Entry] = &[
                    $(
                        $crate::Entry::new(
                            ::core::stringify!($field),
                            {
                                fn narrow<'a>(
                                    owner: &'a (dyn ::core::any::Any + 'static),
                                ) -> ::core::option::Option<$crate::Payload<'a>> {
                                    match owner.downcast_ref::<$owner>() {
                                        ::core::option::Option::Some(owner) => {
                                            ::core::option::Option::Some(
                                                $crate::Payload::Object(&owner.$field),
                                            )
                                        }
                                        ::core::option::Option::None => ::core::option::Option::None,
                                    }
                                }
                                narrow
                            },
                            <$field_ty as $crate::Introspect>::REGISTRY,
                        ),
                    )*
                    $($(
                        $crate::Entry::new(
                            ::core::stringify!($method),
                            {
                                fn narrow<'a>(
                                    owner: &'a (dyn ::core::any::Any + 'static),
                                ) -> ::core::option::Option<$crate::Payload<'a>> {
                                    match owner.downcast_ref::<$owner>() {
                                        ::core::option::Option::Some(owner) => {
                                            ::core::option::Option::Some($crate::Payload::Scalar(
                                                $crate::Scalar::from_value::<$method_ty>(owner.$method()),
                                            ))
                                        }
                                        ::core::option::Option::None => ::core::option::Option::None,
                                    }
                                }
                                narrow
                            },
                            $crate::TypeRegistry::COMPUTED,
                        ),
                    )*)?
                ];
                const REGISTRY: $crate::TypeRegistry =
                    $crate::TypeRegistry::new(::core::stringify!($owner), ENTRIES);
                &REGISTRY
            };
        }
    };
}

/// Declare an enumeration usable as a leaf value.
///
/// The enum gets `#[repr($repr)]`, the `Debug, Clone, Copy, PartialEq, Eq`
/// derives, and a [`LeafValue`](crate::LeafValue) impl mapping each variant to
/// its discriminant. Parsing an integer that names no variant fails.
///
/// # Example
///
/// ```
/// use fibre_micro::{leaf_enum, LeafValue};
///
/// leaf_enum! {
///     pub enum ControlMode: u8 {
///         Voltage = 0,
///         Torque = 1,
///         Velocity = 2,
///         Position = 3,
///     }
/// }
///
/// assert_eq!(ControlMode::Velocity.to_repr(), 2);
/// assert_eq!(ControlMode::from_repr(3), Some(ControlMode::Position));
/// assert_eq!(ControlMode::from_repr(9), None);
/// ```
#[macro_export]
macro_rules! leaf_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $value:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant = $value),*
        }

        impl $crate::LeafValue for $name {
            type Repr = $repr;

            fn to_repr(self) -> $repr {
                self as $repr
            }

            fn from_repr(repr: $repr) -> ::core::option::Option<Self> {
                $(
                    if repr == $name::$variant as $repr {
                        return ::core::option::Option::Some($name::$variant);
                    }
                )*
                ::core::option::Option::None
            }
        }
    };
}
