use super::*;

enum Slot<T> {
    Free,
    Live(T),
}

/// A fixed set of slots with a free list, so allocating and freeing are
/// both O(1) and the storage never grows after construction.
pub(super) struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Free);
        Self {
            slots,
            // Reversed so slots are handed out from the front
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn alloc(&mut self, value: T) -> Option<usize> {
        let idx = self.free.pop()?;
        self.slots[idx] = Slot::Live(value);
        Some(idx)
    }

    pub fn free(&mut self, idx: usize) -> Option<T> {
        let slot = self.slots.get_mut(idx)?;
        match core::mem::replace(slot, Slot::Free) {
            Slot::Live(value) => {
                self.free.push(idx);
                Some(value)
            }
            Slot::Free => None,
        }
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        match self.slots.get(idx)? {
            Slot::Live(value) => Some(value),
            Slot::Free => None,
        }
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        match self.slots.get_mut(idx)? {
            Slot::Live(value) => Some(value),
            Slot::Free => None,
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Free);
        self.free.clear();
        self.free.extend((0..self.slots.len()).rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_free() {
        let mut pool = Pool::new(2);
        let a = pool.alloc('a').unwrap();
        let b = pool.alloc('b').unwrap();
        assert_eq!((a, b), (0, 1));
        assert!(pool.alloc('c').is_none());

        assert_eq!(pool.free(a), Some('a'));
        assert_eq!(pool.free(a), None);
        assert!(pool.get(a).is_none());
        assert_eq!(pool.get(b), Some(&'b'));

        assert_eq!(pool.alloc('d'), Some(a));
        assert_eq!(pool.capacity(), 2);

        pool.clear();
        assert!(pool.get(b).is_none());
        assert_eq!(pool.alloc('e'), Some(0));
    }
}
