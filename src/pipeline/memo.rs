use tracing::debug;

/// Caches one derived value together with the exact inputs it was built from.
#[derive(Debug)]
pub struct Memo<K, V> {
    name: &'static str,
    slot: Option<(K, V)>,
    computations: usize,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: None,
            computations: 0,
        }
    }

    /// Returns the cached value when `key` matches, otherwise recomputes.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let fresh = matches!(&self.slot, Some((cached, _)) if *cached == key);
        if !fresh {
            self.slot = None;
        }
        let (name, computations) = (self.name, &mut self.computations);
        let (_, value) = self.slot.get_or_insert_with(|| {
            *computations += 1;
            debug!(memo = name, count = *computations, "recomputing");
            (key, compute())
        });
        value
    }

    #[cfg(test)]
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_value_for_equal_key() {
        let mut memo = Memo::new("test");
        assert_eq!(*memo.get_or_compute((1, "a"), || 10), 10);
        assert_eq!(*memo.get_or_compute((1, "a"), || 20), 10);
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn recomputes_when_key_changes() {
        let mut memo = Memo::new("test");
        memo.get_or_compute(1, || "one");
        assert_eq!(*memo.get_or_compute(2, || "two"), "two");
        assert_eq!(*memo.get_or_compute(1, || "again"), "again");
        assert_eq!(memo.computations(), 3);
    }
}
