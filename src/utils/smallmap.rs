use {smallvec::SmallVec, std::cell::RefCell};

/// A vec-backed map for collections that almost always hold `N` or fewer
/// entries. Preserves insertion order except across `remove`.
pub struct SmallMap<K, V, const N: usize> {
    m: RefCell<SmallVec<[(K, V); N]>>,
}

impl<K, V, const N: usize> Default for SmallMap<K, V, N> {
    fn default() -> Self {
        Self {
            m: RefCell::new(SmallVec::new_const()),
        }
    }
}

impl<K: Eq + Copy, V: Clone, const N: usize> SmallMap<K, V, N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.m.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.m.borrow().is_empty()
    }

    pub fn insert(&self, k: K, v: V) -> Option<V> {
        let mut m = self.m.borrow_mut();
        for (ek, ev) in m.iter_mut() {
            if *ek == k {
                return Some(std::mem::replace(ev, v));
            }
        }
        m.push((k, v));
        None
    }

    pub fn get(&self, k: &K) -> Option<V> {
        self.m
            .borrow()
            .iter()
            .find(|(ek, _)| ek == k)
            .map(|(_, v)| v.clone())
    }

    pub fn contains(&self, k: &K) -> bool {
        self.m.borrow().iter().any(|(ek, _)| ek == k)
    }

    pub fn remove(&self, k: &K) -> Option<V> {
        let mut m = self.m.borrow_mut();
        let pos = m.iter().position(|(ek, _)| ek == k)?;
        Some(m.swap_remove(pos).1)
    }

    pub fn pop(&self) -> Option<(K, V)> {
        self.m.borrow_mut().pop()
    }

    pub fn clear(&self) {
        self.m.borrow_mut().clear();
    }
}
