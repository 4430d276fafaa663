// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf value representation
//!
//! Leaf text is always produced from the value's underlying representation:
//! primitives represent themselves, enumerations use their integer
//! discriminant. Enumerations are declared with [`leaf_enum!`](crate::leaf_enum).

use crate::codec::{Scalar, TextCodec};

/// Value type that can live behind a property endpoint
pub trait LeafValue: Copy + 'static {
    /// Underlying representation used for text conversion
    type Repr: TextCodec + Copy + Into<Scalar>;

    /// Convert to the underlying representation
    fn to_repr(self) -> Self::Repr;

    /// Convert back from the underlying representation.
    ///
    /// Returns `None` when `repr` names no value of `Self` (unknown enum
    /// discriminant).
    fn from_repr(repr: Self::Repr) -> Option<Self>;
}

macro_rules! impl_primitive_leaf {
    ($($t:ty),* $(,)?) => {
        $(
            impl LeafValue for $t {
                type Repr = $t;

                #[inline]
                fn to_repr(self) -> $t {
                    self
                }

                #[inline]
                fn from_repr(repr: $t) -> Option<Self> {
                    Some(repr)
                }
            }
        )*
    };
}

impl_primitive_leaf!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
