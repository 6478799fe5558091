//! Fixed-capacity slot arena used for bullets and enemies.
//!
//! Slots are activated and deactivated in place; the backing array is never
//! resized, so nothing is allocated while a game is running. Lookups scan in
//! pool order, which is also the tie-break order for collisions.

/// An entity record that can live in a [`SlotPool`].
pub trait Slot: Default {
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);
}

#[derive(Clone, Debug)]
pub struct SlotPool<T: Slot, const N: usize> {
    slots: [T; N],
}

impl<T: Slot, const N: usize> SlotPool<T, N> {
    pub fn new() -> Self {
        SlotPool {
            slots: std::array::from_fn(|_| T::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Deactivate every slot.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.deactivate();
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// First inactive slot in pool order, or `None` when the pool is full.
    /// The caller is responsible for filling it in and marking it active.
    pub fn allocate(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find(|s| !s.is_active())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Active slots with their pool index.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, s)| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots.iter_mut().enumerate().filter(|(_, s)| s.is_active())
    }
}

impl<T: Slot, const N: usize> Default for SlotPool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug)]
    struct Dummy {
        id: u32,
        active: bool,
    }

    impl Slot for Dummy {
        fn is_active(&self) -> bool {
            self.active
        }
        fn deactivate(&mut self) {
            self.active = false;
        }
    }

    #[test]
    fn allocate_fills_first_free_slot() {
        let mut pool: SlotPool<Dummy, 3> = SlotPool::new();
        for id in 0..3 {
            let slot = pool.allocate().unwrap();
            slot.id = id;
            slot.active = true;
        }
        assert!(pool.allocate().is_none());

        pool.get_mut(1).unwrap().deactivate();
        let slot = pool.allocate().unwrap();
        slot.id = 7;
        slot.active = true;
        assert_eq!(pool.get(1).unwrap().id, 7);
    }

    #[test]
    fn clear_leaves_no_active_slots() {
        let mut pool: SlotPool<Dummy, 4> = SlotPool::new();
        pool.allocate().unwrap().active = true;
        pool.allocate().unwrap().active = true;
        assert_eq!(pool.active_count(), 2);

        pool.clear();
        assert_eq!(pool.active_count(), 0);
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.capacity(), 4);
    }

    #[test]
    fn iter_active_reports_pool_indices() {
        let mut pool: SlotPool<Dummy, 4> = SlotPool::new();
        pool.get_mut(2).unwrap().active = true;
        let indices: Vec<usize> = pool.iter_active().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![2]);
    }
}
