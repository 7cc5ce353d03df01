//! The contract shared by every collection in this crate.
//!
//! [`Collection`] is deliberately small: implementors provide a handful of primitives and a
//! cursor ([`ElementsGetter`]), and get [`for_each`](Collection::for_each),
//! [`add_all`](Collection::add_all) and [`add_all_satisfying`](Collection::add_all_satisfying)
//! for free. The provided methods only ever talk to the cursor, so they work the same for
//! any backing structure.

use crate::error::{CollectionError, Result};

/// Performs some operation on each value handed to it.
///
/// Any `FnMut(T)` closure is a processor.
///
/// # Examples
///
/// ```
/// # use indexed_collections::array_collection;
/// # use indexed_collections::collection::Collection;
/// let collection = array_collection![1, 2, 3];
/// let mut sum = 0;
/// collection.for_each(&mut |value: i32| sum += value).unwrap();
/// assert_eq!(sum, 6);
/// ```
pub trait Processor<T> {
    fn process(&mut self, value: T);
}

impl<T, F: FnMut(T)> Processor<T> for F {
    fn process(&mut self, value: T) {
        self(value)
    }
}

/// Decides whether a value qualifies.
///
/// Any `Fn(&T) -> bool` closure is a tester.
pub trait Tester<T> {
    fn test(&self, value: &T) -> bool;
}

impl<T, F: Fn(&T) -> bool> Tester<T> for F {
    fn test(&self, value: &T) -> bool {
        self(value)
    }
}

/// A single pass, forward only cursor over the elements of a collection.
///
/// A getter cannot be rewound. Implementations are free to refuse to continue once the
/// underlying collection changes; such refusals surface as
/// [`CollectionError::ConcurrentStructuralChange`].
pub trait ElementsGetter<T> {
    /// Returns whether another element can be taken.
    fn has_next_element(&self) -> Result<bool>;

    /// Takes the next element and advances the cursor.
    ///
    /// Fails with [`CollectionError::NoSuchElement`] once every element was taken.
    fn get_next_element(&mut self) -> Result<T>;

    /// Hands every element not yet taken to `processor`, exhausting the getter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array_collection;
    /// # use indexed_collections::collection::ElementsGetter;
    /// let collection = array_collection![10, 20, 30];
    /// let mut getter = collection.create_elements_getter();
    /// getter.get_next_element().unwrap();
    ///
    /// let mut rest = Vec::new();
    /// getter.process_remaining(&mut |value: i32| rest.push(value)).unwrap();
    /// assert_eq!(rest, vec![20, 30]);
    /// assert!(!getter.has_next_element().unwrap());
    /// ```
    fn process_remaining(&mut self, processor: &mut dyn Processor<T>) -> Result<()> {
        while self.has_next_element()? {
            processor.process(self.get_next_element()?);
        }
        Ok(())
    }
}

/// A general collection of values.
///
/// The trait is object safe, so heterogeneous collections can be combined through
/// `&dyn Collection<T>`.
pub trait Collection<T> {
    /// Number of values currently stored.
    fn size(&self) -> usize;

    /// Adds `value` to the collection.
    fn add(&mut self, value: T);

    /// Whether an equal value is stored.
    fn contains(&self, value: &T) -> bool;

    /// Removes one value equal to `value`, returning whether one was found.
    fn remove(&mut self, value: &T) -> bool;

    /// Copies the stored values into a freshly allocated vector.
    fn to_array(&self) -> Vec<T>;

    /// Removes every value.
    fn clear(&mut self);

    /// Creates a cursor positioned before the first value.
    fn create_elements_getter<'a>(&'a self) -> Box<dyn ElementsGetter<T> + 'a>;

    /// Whether no values are stored.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Calls `processor` once for each value, in traversal order.
    fn for_each(&self, processor: &mut dyn Processor<T>) -> Result<()> {
        self.create_elements_getter().process_remaining(processor)
    }

    /// Adds every value of `other` to this collection, preserving `other`'s order.
    ///
    /// `other` is only read through its own getter and is left untouched.
    fn add_all(&mut self, other: &dyn Collection<T>) -> Result<()> {
        let mut getter = other.create_elements_getter();
        while getter.has_next_element()? {
            self.add(getter.get_next_element()?);
        }
        Ok(())
    }

    /// Adds the values of `col` accepted by `tester`, preserving their order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array_collection;
    /// # use indexed_collections::array::ArrayIndexedCollection;
    /// # use indexed_collections::collection::Collection;
    /// let source = array_collection![1, 2, 3, 4, 5, 6];
    /// let mut evens: ArrayIndexedCollection<i32> = ArrayIndexedCollection::new();
    /// evens.add_all_satisfying(&source, &|value: &i32| value % 2 == 0).unwrap();
    /// assert_eq!(evens.to_array(), vec![2, 4, 6]);
    /// assert_eq!(source.size(), 6);
    /// ```
    fn add_all_satisfying(&mut self, col: &dyn Collection<T>, tester: &dyn Tester<T>) -> Result<()> {
        let mut getter = col.create_elements_getter();
        while getter.has_next_element()? {
            let value = getter.get_next_element()?;
            if tester.test(&value) {
                self.add(value);
            }
        }
        Ok(())
    }
}

/// A collection whose values are addressed by position.
///
/// Positions run from `0` to `size() - 1` in insertion order, shifted by positional
/// insertions and removals.
pub trait IndexedCollection<T>: Collection<T> {
    /// Returns the value at `index`.
    fn get(&self, index: usize) -> Result<T>;

    /// Inserts `value` at `position`, shifting later values up by one.
    ///
    /// `position == size()` appends.
    fn insert(&mut self, value: T, position: usize) -> Result<()>;

    /// Position of the first value equal to `value`.
    fn index_of(&self, value: &T) -> Option<usize>;

    /// Removes and returns the value at `index`, shifting later values down by one.
    fn remove_at(&mut self, index: usize) -> Result<T>;
}

/// Checks `index` against an exclusive upper `bound`.
pub(crate) fn check_index(index: usize, bound: usize) -> Result<()> {
    if index < bound {
        Ok(())
    } else {
        Err(CollectionError::IndexOutOfRange { index, bound })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayIndexedCollection;
    use crate::array_collection;

    // Minimal collection relying on every provided method
    #[derive(Default)]
    struct Stack<T>(Vec<T>);

    struct StackGetter<'a, T> {
        values: &'a [T],
        cursor: usize,
    }

    impl<'a, T: Clone> ElementsGetter<T> for StackGetter<'a, T> {
        fn has_next_element(&self) -> Result<bool> {
            Ok(self.cursor < self.values.len())
        }

        fn get_next_element(&mut self) -> Result<T> {
            let value = self
                .values
                .get(self.cursor)
                .cloned()
                .ok_or(CollectionError::NoSuchElement)?;
            self.cursor += 1;
            Ok(value)
        }
    }

    impl<T: Clone + PartialEq> Collection<T> for Stack<T> {
        fn size(&self) -> usize {
            self.0.len()
        }

        fn add(&mut self, value: T) {
            self.0.push(value)
        }

        fn contains(&self, value: &T) -> bool {
            self.0.contains(value)
        }

        fn remove(&mut self, value: &T) -> bool {
            match self.0.iter().position(|x| x == value) {
                Some(index) => {
                    self.0.remove(index);
                    true
                }
                None => false,
            }
        }

        fn to_array(&self) -> Vec<T> {
            self.0.clone()
        }

        fn clear(&mut self) {
            self.0.clear()
        }

        fn create_elements_getter<'a>(&'a self) -> Box<dyn ElementsGetter<T> + 'a> {
            Box::new(StackGetter {
                values: &self.0,
                cursor: 0,
            })
        }
    }

    #[test]
    fn provided_is_empty() {
        let mut stack: Stack<i32> = Stack::default();
        assert!(stack.is_empty());
        stack.add(1);
        assert!(!stack.is_empty());
    }

    #[test]
    fn provided_for_each() {
        let stack = Stack(vec!["a", "b", "c"]);
        let mut joined = String::new();
        stack
            .for_each(&mut |value: &str| joined.push_str(value))
            .unwrap();
        assert_eq!(joined, "abc");
    }

    #[test]
    fn provided_add_all_across_implementations() {
        let array = array_collection![1, 2, 3];
        let mut stack = Stack(vec![0]);
        stack.add_all(&array).unwrap();
        assert_eq!(stack.0, vec![0, 1, 2, 3]);

        let mut array: ArrayIndexedCollection<i32> = ArrayIndexedCollection::new();
        array.add_all(&stack).unwrap();
        assert_eq!(array.to_array(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn provided_add_all_satisfying() {
        let source = Stack(vec![-2, 5, -1, 7]);
        let mut positives: Stack<i32> = Stack::default();
        positives
            .add_all_satisfying(&source, &|value: &i32| *value > 0)
            .unwrap();
        assert_eq!(positives.0, vec![5, 7]);
        assert_eq!(source.0, vec![-2, 5, -1, 7]);
    }

    #[test]
    fn add_all_satisfying_with_nothing_accepted() {
        let source = array_collection![1, 2, 3];
        let mut target: Stack<i32> = Stack::default();
        target.add_all_satisfying(&source, &|_: &i32| false).unwrap();
        assert!(target.is_empty());
    }

    #[test]
    fn process_remaining_on_exhausted_getter() {
        let stack = Stack(vec![1]);
        let mut getter = stack.create_elements_getter();
        getter.get_next_element().unwrap();
        let mut calls = 0;
        getter.process_remaining(&mut |_: i32| calls += 1).unwrap();
        assert_eq!(calls, 0);
    }

    #[test]
    fn for_each_propagates_invalidated_getter() {
        let mut array = array_collection![1, 2, 3];
        let mut getter = array.create_elements_getter();
        getter.get_next_element().unwrap();
        array.clear();

        let mut seen = Vec::new();
        let result = getter.process_remaining(&mut |value: i32| seen.push(value));
        assert!(matches!(
            result,
            Err(CollectionError::ConcurrentStructuralChange { .. })
        ));
        assert!(seen.is_empty());
    }

    #[test]
    fn check_index_bounds() {
        assert_eq!(check_index(0, 1), Ok(()));
        assert_eq!(
            check_index(1, 1),
            Err(CollectionError::IndexOutOfRange { index: 1, bound: 1 })
        );
    }
}
