#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

pub mod array;
pub(crate) mod backing;
pub mod collection;
pub mod error;

pub use array::{ArrayIndexedCollection, GenericArrayCollection};
pub use collection::{Collection, ElementsGetter, IndexedCollection, Processor, Tester};
pub use error::CollectionError;

/// Construct an [`ArrayIndexedCollection`](crate::array::ArrayIndexedCollection) from a sequence of elements
#[macro_export]
macro_rules! array_collection {
    () => { $crate::array::ArrayIndexedCollection::new() };

    ( $($x:expr),+ $(,)? ) => {{
        vec![$(
            $x,
        ) *].into_iter().collect::<$crate::array::ArrayIndexedCollection<_>>()
    }};
}
