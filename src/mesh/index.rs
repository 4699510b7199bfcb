//! Index buffer element types.
//!
//! Triangle indices are stored at the width the renderer will upload them
//! with: `u16` for small meshes, `u32` for typical meshes, `u64` for massive
//! meshes. The simplifier itself always works in `usize` and converts at the
//! store boundary.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for integer types that can be stored in a triangle index buffer.
///
/// This trait is implemented for `u16`, `u32`, and `u64`.
pub trait MeshIndex: Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static {
    /// The largest vertex index this type can address.
    const MAX: Self;

    /// Name of the index type, used in error messages.
    const NAME: &'static str;

    /// Convert from usize to this index type.
    ///
    /// # Panics
    /// Panics in debug builds if the value is too large for this index type.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Number of distinct vertices addressable by this index type.
    #[inline]
    fn capacity() -> usize {
        Self::MAX.to_usize().saturating_add(1)
    }
}

macro_rules! impl_mesh_index {
    ($ty:ty, $name:literal) => {
        impl MeshIndex for $ty {
            const MAX: Self = <$ty>::MAX;
            const NAME: &'static str = $name;

            #[inline]
            fn from_usize(v: usize) -> Self {
                debug_assert!(
                    v <= <$ty>::MAX as usize,
                    "index {} too large for {}",
                    v,
                    $name
                );
                v as $ty
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    };
}

impl_mesh_index!(u16, "u16");
impl_mesh_index!(u32, "u32");
impl_mesh_index!(u64, "u64");
