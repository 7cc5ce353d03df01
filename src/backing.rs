//! Exact-capacity slot buffer backing the array collection.
//!
//! Invariants:
//!
//! - `slots[..len]` are all `Some`, in positional order.
//!
//! - `slots[len..]` are all `None`.
//!
//! - `slots.len()` (the capacity) is at least 1 and only ever grows, by a factor of `G`
//! when a single value is pushed into a full buffer, or to an exact requested size.

use std::iter::FromIterator;

pub(crate) struct Slots<T, const G: usize> {
    slots: Box<[Option<T>]>,
    len: usize,
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

impl<T, const G: usize> Slots<T, G> {
    const GROWTH_FACTOR: usize = {
        assert!(G >= 2, "growth factor must be at least 2");
        G
    };

    /// `capacity` must be non zero, which callers check before getting here.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "Backing storage needs at least one slot");
        Slots {
            slots: empty_slots(capacity),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.slots[index].as_ref()
        } else {
            None
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots[..self.len].iter().flatten()
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        Vec::from(self.slots).into_iter().flatten().collect()
    }

    pub(crate) fn position(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|x| x == value)
    }

    // Moves every live value into a buffer of exactly `new_capacity` slots
    fn reallocate(&mut self, new_capacity: usize) {
        log::trace!(
            "growing backing storage from {} to {} slots",
            self.capacity(),
            new_capacity
        );

        let mut grown = empty_slots(new_capacity);
        for (dest, source) in grown.iter_mut().zip(self.slots[..self.len].iter_mut()) {
            *dest = source.take();
        }
        self.slots = grown;
    }

    fn grow_if_full(&mut self) {
        if self.len == self.capacity() {
            let new_capacity = self
                .capacity()
                .checked_mul(Self::GROWTH_FACTOR)
                .expect("capacity overflow");
            self.reallocate(new_capacity);
        }
    }

    /// Makes room for at least `total` values, growing to exactly `total` if needed.
    pub(crate) fn reserve_total(&mut self, total: usize) {
        if total > self.capacity() {
            self.reallocate(total);
        }
    }

    pub(crate) fn push(&mut self, value: T) {
        self.grow_if_full();
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// `position` must be at most `len`.
    pub(crate) fn insert(&mut self, position: usize, value: T) {
        debug_assert!(position <= self.len);
        self.grow_if_full();

        // Write into the first free slot, then rotate it down into the gap
        self.slots[self.len] = Some(value);
        self.slots[position..=self.len].rotate_right(1);
        self.len += 1;
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }

        let removed = self.slots[index].take();
        // The emptied slot travels to the end of the live range
        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;
        removed
    }

    pub(crate) fn clear(&mut self) {
        for slot in self.slots[..self.len].iter_mut() {
            *slot = None;
        }
        self.len = 0;
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(self.capacity() >= 1);
        assert!(self.len <= self.capacity());
        assert!(self.slots[..self.len].iter().all(Option::is_some));
        assert!(self.slots[self.len..].iter().all(Option::is_none));
    }
}

impl<T: Clone, const G: usize> Clone for Slots<T, G> {
    fn clone(&self) -> Self {
        Slots {
            slots: self.slots.clone(),
            len: self.len,
        }
    }
}

impl<T, const G: usize> Extend<T> for Slots<T, G> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, const G: usize> FromIterator<T> for Slots<T, G> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let capacity = iter.size_hint().0.max(crate::array::DEFAULT_CAPACITY);
        let mut slots = Slots::with_capacity(capacity);
        slots.extend(iter);
        slots
    }
}
