//! A resizable, array-backed, index-addressable collection.
//!
//! Values live in a contiguous buffer of exact capacity, in positional order. Appending to a
//! full buffer reallocates it to twice its size; nothing ever shrinks it.
//!
//! # Fail-fast getters
//!
//! The collection counts its structural modifications. A getter created with
//! [`create_elements_getter`](GenericArrayCollection::create_elements_getter) remembers the
//! count at creation, and every call on it compares that snapshot against the live count.
//! Once they differ the getter only ever returns
//! [`ConcurrentStructuralChange`](crate::error::CollectionError::ConcurrentStructuralChange).
//!
//! Getters do not borrow the collection, so the collection can be modified while a getter is
//! alive. The borrowing iterator from [`iter`](GenericArrayCollection::iter) cannot outlive a
//! modification in the first place and so never fails.
//!
//! # Performance Notes
//!
//! Let *n* be the number of values. `get`, `size` and appending are O(1) (appending is
//! amortized, a growth step copies all *n* values). `insert`, `remove_at`, `remove`,
//! `contains` and `index_of` are O(n).

use std::{
    cell::{Ref, RefCell},
    fmt,
    iter::FromIterator,
    rc::Rc,
};

use crate::{
    backing::Slots,
    collection::{check_index, Collection, ElementsGetter, IndexedCollection},
    error::{CollectionError, Result},
};

#[cfg(test)]
mod proptests;

/// Number of slots allocated when no capacity is requested.
pub const DEFAULT_CAPACITY: usize = 16;

struct State<T, const G: usize> {
    slots: Slots<T, G>,
    modification_count: u64,
}

impl<T, const G: usize> State<T, G> {
    fn new(slots: Slots<T, G>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(State {
            slots,
            modification_count: 0,
        }))
    }

    // Every structural change goes through here
    fn touch(&mut self) {
        self.modification_count += 1;
    }
}

/// A resizable array-backed collection growing by a factor of `G`.
///
/// Most code wants [`ArrayIndexedCollection`], which doubles.
pub struct GenericArrayCollection<T, const G: usize> {
    state: Rc<RefCell<State<T, G>>>,
}

/// A resizable array-backed collection whose buffer doubles when full.
pub type ArrayIndexedCollection<T> = GenericArrayCollection<T, 2>;

fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        Err(CollectionError::InvalidArgument { capacity })
    } else {
        Ok(())
    }
}

impl<T, const G: usize> GenericArrayCollection<T, G> {
    fn from_slots(slots: Slots<T, G>) -> Self {
        GenericArrayCollection {
            state: State::new(slots),
        }
    }

    fn copied_from<C>(source: &C, capacity: usize) -> Self
    where
        C: Collection<T> + ?Sized,
    {
        let mut slots = Slots::with_capacity(capacity.max(source.size()));
        slots.extend(source.to_array());
        Self::from_slots(slots)
    }

    /// Construct an empty collection with room for [`DEFAULT_CAPACITY`] values.
    pub fn new() -> Self {
        Self::from_slots(Slots::with_capacity(DEFAULT_CAPACITY))
    }

    /// Construct an empty collection with room for `capacity` values.
    ///
    /// Fails with [`CollectionError::InvalidArgument`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array::ArrayIndexedCollection;
    /// # use indexed_collections::error::CollectionError;
    /// let collection = ArrayIndexedCollection::<u8>::with_capacity(4).unwrap();
    /// assert_eq!(collection.capacity(), 4);
    ///
    /// assert_eq!(
    ///     ArrayIndexedCollection::<u8>::with_capacity(0).err(),
    ///     Some(CollectionError::InvalidArgument { capacity: 0 })
    /// );
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self::from_slots(Slots::with_capacity(capacity)))
    }

    /// Construct a collection holding a copy of every value of `source`, in traversal order.
    ///
    /// The buffer starts at [`DEFAULT_CAPACITY`] slots, or at the size of `source` if that
    /// is larger.
    pub fn from_collection<C>(source: &C) -> Self
    where
        C: Collection<T> + ?Sized,
    {
        Self::copied_from(source, DEFAULT_CAPACITY)
    }

    /// Construct a collection holding a copy of every value of `source`, with room for at
    /// least `capacity` values.
    ///
    /// Fails with [`CollectionError::InvalidArgument`] if `capacity` is zero, even when
    /// `source` is not empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array_collection;
    /// # use indexed_collections::array::ArrayIndexedCollection;
    /// let source = array_collection![1, 2, 3];
    /// let copy = ArrayIndexedCollection::from_collection_with_capacity(&source, 1).unwrap();
    /// assert_eq!(copy.capacity(), 3);
    /// assert_eq!(copy.to_array(), vec![1, 2, 3]);
    /// ```
    pub fn from_collection_with_capacity<C>(source: &C, capacity: usize) -> Result<Self>
    where
        C: Collection<T> + ?Sized,
    {
        check_capacity(capacity)?;
        Ok(Self::copied_from(source, capacity))
    }

    /// Get the number of values in the collection
    ///
    /// Time: O(1)
    pub fn size(&self) -> usize {
        self.state.borrow().slots.len()
    }

    /// Get the number of slots in the backing buffer
    ///
    /// Time: O(1)
    pub fn capacity(&self) -> usize {
        self.state.borrow().slots.capacity()
    }

    /// Checks whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Append a value, doubling the buffer first if it is full.
    ///
    /// Time: O(1) amortized
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array::ArrayIndexedCollection;
    /// let mut collection = ArrayIndexedCollection::new();
    /// collection.add(1);
    /// collection.add(2);
    /// collection.add(3);
    /// assert_eq!(collection.to_array(), vec![1, 2, 3]);
    /// ```
    pub fn add(&mut self, value: T) {
        let mut state = self.state.borrow_mut();
        state.slots.push(value);
        state.touch();
    }

    /// Insert `value` at `position`, shifting the values at and after it up by one.
    ///
    /// `position` may equal the size, which appends. Any larger position fails with
    /// [`CollectionError::IndexOutOfRange`] and leaves the collection unchanged.
    ///
    /// Time: O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array_collection;
    /// let mut collection = array_collection![1, 2, 3];
    /// collection.insert(9, 1).unwrap();
    /// assert_eq!(collection.to_array(), vec![1, 9, 2, 3]);
    ///
    /// collection.insert(4, 4).unwrap();
    /// assert_eq!(collection.to_array(), vec![1, 9, 2, 3, 4]);
    ///
    /// assert!(collection.insert(0, 7).is_err());
    /// ```
    pub fn insert(&mut self, value: T, position: usize) -> Result<()> {
        let mut state = self.state.borrow_mut();
        check_index(position, state.slots.len() + 1)?;
        state.slots.insert(position, value);
        state.touch();
        Ok(())
    }

    /// Remove and return the value at `index`, shifting later values down by one.
    ///
    /// Fails with [`CollectionError::IndexOutOfRange`] unless `index < size`.
    ///
    /// Time: O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array_collection;
    /// let mut collection = array_collection![1, 9, 2, 3];
    /// assert_eq!(collection.remove_at(0), Ok(1));
    /// assert_eq!(collection.to_array(), vec![9, 2, 3]);
    /// assert!(collection.remove_at(3).is_err());
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let mut state = self.state.borrow_mut();
        let bound = state.slots.len();
        let removed = state
            .slots
            .remove(index)
            .ok_or(CollectionError::IndexOutOfRange { index, bound })?;
        state.touch();
        Ok(removed)
    }

    /// Remove every value. The buffer keeps its capacity.
    pub fn clear(&mut self) {
        let mut state = self.state.borrow_mut();
        state.slots.clear();
        state.touch();
    }

    /// Position of the first value equal to `value`, or `None`.
    ///
    /// Time: O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array_collection;
    /// let collection = array_collection![9, 2, 3, 2];
    /// assert_eq!(collection.index_of(&2), Some(1));
    /// assert_eq!(collection.index_of(&5), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.state.borrow().slots.position(value)
    }

    /// Checks whether a value equal to `value` is stored.
    ///
    /// Time: O(n)
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Remove the first value equal to `value`, returning whether there was one.
    ///
    /// Time: O(n)
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.index_of(value) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Creates a fail-fast getter positioned before the first value.
    ///
    /// The getter does not borrow the collection. Any structural modification made after
    /// this call makes every later call on the getter fail.
    pub fn create_elements_getter(&self) -> ArrayElementsGetter<T, G> {
        ArrayElementsGetter {
            saved_modification_count: self.state.borrow().modification_count,
            source: Rc::clone(&self.state),
            cursor: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn modification_count(&self) -> u64 {
        self.state.borrow().modification_count
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.state.borrow().slots.assert_invariants();
    }
}

impl<T: Clone, const G: usize> GenericArrayCollection<T, G> {
    /// Get a copy of the value at `index`.
    ///
    /// Fails with [`CollectionError::IndexOutOfRange`] unless `index < size`.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # use indexed_collections::array_collection;
    /// let collection = array_collection![1, 2, 3];
    /// assert_eq!(collection.get(2), Ok(3));
    /// assert!(collection.get(3).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<T> {
        let state = self.state.borrow();
        state
            .slots
            .get(index)
            .cloned()
            .ok_or(CollectionError::IndexOutOfRange {
                index,
                bound: state.slots.len(),
            })
    }

    /// Copy the values into a freshly allocated vector. The vector shares nothing with the
    /// collection.
    ///
    /// Time: O(n)
    pub fn to_array(&self) -> Vec<T> {
        self.state.borrow().slots.iter().cloned().collect()
    }

    /// Constructs an iterator over copies of the values.
    ///
    /// The iterator borrows the collection, so it can never observe a modification.
    pub fn iter(&self) -> Iter<'_, T, G> {
        Iter {
            state: self.state.borrow(),
            index: 0,
        }
    }
}

impl<T: Clone + PartialEq, const G: usize> Collection<T> for GenericArrayCollection<T, G> {
    fn size(&self) -> usize {
        GenericArrayCollection::size(self)
    }

    fn add(&mut self, value: T) {
        GenericArrayCollection::add(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        GenericArrayCollection::contains(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        GenericArrayCollection::remove(self, value)
    }

    fn to_array(&self) -> Vec<T> {
        GenericArrayCollection::to_array(self)
    }

    fn clear(&mut self) {
        GenericArrayCollection::clear(self)
    }

    fn create_elements_getter<'a>(&'a self) -> Box<dyn ElementsGetter<T> + 'a> {
        Box::new(GenericArrayCollection::create_elements_getter(self))
    }

    fn is_empty(&self) -> bool {
        GenericArrayCollection::is_empty(self)
    }

    /// Grows the buffer at most once, to exactly the combined size, then copies `other`
    /// in bulk. A non-empty bulk add counts as one structural modification.
    fn add_all(&mut self, other: &dyn Collection<T>) -> Result<()> {
        let incoming = other.to_array();
        if incoming.is_empty() {
            return Ok(());
        }

        let mut state = self.state.borrow_mut();
        let total = state.slots.len() + incoming.len();
        log::trace!("bulk adding {} values, {} in total", incoming.len(), total);
        state.slots.reserve_total(total);
        state.slots.extend(incoming);
        state.touch();
        Ok(())
    }
}

impl<T: Clone + PartialEq, const G: usize> IndexedCollection<T> for GenericArrayCollection<T, G> {
    fn get(&self, index: usize) -> Result<T> {
        GenericArrayCollection::get(self, index)
    }

    fn insert(&mut self, value: T, position: usize) -> Result<()> {
        GenericArrayCollection::insert(self, value, position)
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        GenericArrayCollection::index_of(self, value)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        GenericArrayCollection::remove_at(self, index)
    }
}

/// Fail-fast cursor over a [`GenericArrayCollection`].
///
/// Holds a handle to the collection's shared state rather than a borrow, plus the
/// modification count observed at creation.
pub struct ArrayElementsGetter<T, const G: usize> {
    source: Rc<RefCell<State<T, G>>>,
    cursor: usize,
    saved_modification_count: u64,
}

impl<T, const G: usize> ArrayElementsGetter<T, G> {
    fn check_generation(&self, state: &State<T, G>) -> Result<()> {
        if state.modification_count == self.saved_modification_count {
            Ok(())
        } else {
            log::debug!(
                "elements getter invalidated: created at generation {}, collection is at {}",
                self.saved_modification_count,
                state.modification_count
            );
            Err(CollectionError::ConcurrentStructuralChange {
                expected: self.saved_modification_count,
                found: state.modification_count,
            })
        }
    }
}

impl<T: Clone, const G: usize> ElementsGetter<T> for ArrayElementsGetter<T, G> {
    fn has_next_element(&self) -> Result<bool> {
        let state = self.source.borrow();
        self.check_generation(&state)?;
        Ok(self.cursor < state.slots.len())
    }

    fn get_next_element(&mut self) -> Result<T> {
        let value = {
            let state = self.source.borrow();
            self.check_generation(&state)?;
            state
                .slots
                .get(self.cursor)
                .cloned()
                .ok_or(CollectionError::NoSuchElement)?
        };
        self.cursor += 1;
        Ok(value)
    }
}

impl<T, const G: usize> fmt::Debug for ArrayElementsGetter<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayElementsGetter")
            .field("cursor", &self.cursor)
            .field("saved_modification_count", &self.saved_modification_count)
            .finish()
    }
}

/// Borrowing iterator over a [`GenericArrayCollection`], yielding copies of the values.
pub struct Iter<'a, T, const G: usize> {
    state: Ref<'a, State<T, G>>,
    index: usize,
}

impl<'a, T: Clone, const G: usize> Iterator for Iter<'a, T, G> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.state.slots.get(self.index).cloned()?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.state.slots.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T: Clone, const G: usize> ExactSizeIterator for Iter<'a, T, G> {}

impl<'a, T: Clone, const G: usize> IntoIterator for &'a GenericArrayCollection<T, G> {
    type Item = T;
    type IntoIter = Iter<'a, T, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone, const G: usize> IntoIterator for GenericArrayCollection<T, G> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        // Outstanding getters keep the state alive, in which case copy it out
        match Rc::try_unwrap(self.state) {
            Ok(state) => state.into_inner().slots.into_vec(),
            Err(shared) => GenericArrayCollection { state: shared }.to_array(),
        }
        .into_iter()
    }
}

impl<T, const G: usize> Default for GenericArrayCollection<T, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const G: usize> Clone for GenericArrayCollection<T, G> {
    /// Deep copy with its own modification count; getters of the original are unaffected
    /// by changes to the clone.
    fn clone(&self) -> Self {
        Self::from_slots(self.state.borrow().slots.clone())
    }
}

impl<T, const G: usize> Extend<T> for GenericArrayCollection<T, G> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T, const G: usize> FromIterator<T> for GenericArrayCollection<T, G> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_slots(iter.into_iter().collect())
    }
}

impl<T, const G: usize> From<Vec<T>> for GenericArrayCollection<T, G> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T: PartialEq, const G: usize> PartialEq for GenericArrayCollection<T, G> {
    fn eq(&self, other: &Self) -> bool {
        self.state
            .borrow()
            .slots
            .iter()
            .eq(other.state.borrow().slots.iter())
    }
}

impl<T: Eq, const G: usize> Eq for GenericArrayCollection<T, G> {}

impl<T: fmt::Debug, const G: usize> fmt::Debug for GenericArrayCollection<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.state.borrow().slots.iter())
            .finish()
    }
}
