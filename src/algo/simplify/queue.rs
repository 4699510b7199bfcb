//! Indexed binary min-heap of contraction targets.
//!
//! `std::collections::BinaryHeap` cannot change the key of an entry in place,
//! which forces stale-entry tracking. This heap keeps a reverse index from
//! [`PairId`] to heap slot so a re-evaluated pair can be moved in either
//! direction, and removed outright when it is retired.

use super::pairs::PairId;
use super::target::ContractionTarget;

/// Min-heap over contraction targets ordered by cost.
#[derive(Debug, Clone, Default)]
pub struct ContractionQueue {
    /// Heap-ordered pair ids.
    heap: Vec<PairId>,
    /// Heap slot of each pair id, if queued.
    slot: Vec<Option<usize>>,
    /// Current target of each pair id, if queued.
    targets: Vec<Option<ContractionTarget>>,
}

impl ContractionQueue {
    /// Create an empty queue with room for `capacity` pair ids.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slot: vec![None; capacity],
            targets: vec![None; capacity],
        }
    }

    /// Number of queued targets.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true if `id` is queued.
    pub fn contains(&self, id: PairId) -> bool {
        self.slot.get(id.index()).is_some_and(Option::is_some)
    }

    /// The queued target for `id`.
    pub fn target(&self, id: PairId) -> Option<&ContractionTarget> {
        self.targets.get(id.index())?.as_ref()
    }

    /// The cheapest queued target.
    pub fn peek_min(&self) -> Option<(PairId, &ContractionTarget)> {
        let id = *self.heap.first()?;
        Some((id, self.targets[id.index()].as_ref()?))
    }

    /// Insert a target and sift it up.
    ///
    /// # Panics
    /// Panics if `id` is already queued.
    pub fn push(&mut self, id: PairId, target: ContractionTarget) {
        let i = id.index();
        if i >= self.slot.len() {
            self.slot.resize(i + 1, None);
            self.targets.resize(i + 1, None);
        }
        assert!(self.slot[i].is_none(), "{:?} is already queued", id);

        let pos = self.heap.len();
        self.heap.push(id);
        self.slot[i] = Some(pos);
        self.targets[i] = Some(target);
        self.sift_up(pos);
    }

    /// Remove and return the cheapest target.
    pub fn pop_min(&mut self) -> Option<(PairId, ContractionTarget)> {
        let id = *self.heap.first()?;
        let target = self.remove(id)?;
        Some((id, target))
    }

    /// Replace the target of a queued pair and restore heap order.
    ///
    /// Returns false if `id` is not queued.
    pub fn update(&mut self, id: PairId, target: ContractionTarget) -> bool {
        let Some(pos) = self.slot.get(id.index()).copied().flatten() else {
            return false;
        };
        self.targets[id.index()] = Some(target);
        self.restore(pos);
        true
    }

    /// Remove a queued pair from anywhere in the heap.
    pub fn remove(&mut self, id: PairId) -> Option<ContractionTarget> {
        let pos = self.slot.get(id.index()).copied().flatten()?;
        let last = self.heap.len() - 1;
        self.swap(pos, last);
        self.heap.pop();
        self.slot[id.index()] = None;
        let target = self.targets[id.index()].take();

        if pos < self.heap.len() {
            self.restore(pos);
        }
        target
    }

    /// Check the heap invariant: no entry is cheaper than its parent.
    pub fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.cost_at((i - 1) / 2) <= self.cost_at(i))
    }

    /// Move the entry at `pos` up or down, whichever its cost requires.
    fn restore(&mut self, pos: usize) {
        if pos > 0 && self.cost_at(pos) < self.cost_at((pos - 1) / 2) {
            self.sift_up(pos);
        } else {
            self.sift_down(pos);
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.cost_at(parent) <= self.cost_at(pos) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;

            if left < len && self.cost_at(left) < self.cost_at(smallest) {
                smallest = left;
            }
            if right < len && self.cost_at(right) < self.cost_at(smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slot[self.heap[a].index()] = Some(a);
        self.slot[self.heap[b].index()] = Some(b);
    }

    #[inline]
    fn cost_at(&self, pos: usize) -> f64 {
        self.targets[self.heap[pos].index()]
            .as_ref()
            .map_or(f64::INFINITY, |t| t.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn target(cost: f64) -> ContractionTarget {
        ContractionTarget {
            position: Point3::origin(),
            cost,
        }
    }

    fn filled(costs: &[f64]) -> ContractionQueue {
        let mut queue = ContractionQueue::with_capacity(costs.len());
        for (i, &c) in costs.iter().enumerate() {
            queue.push(PairId::new(i), target(c));
            assert!(queue.is_heap());
        }
        queue
    }

    fn drain(queue: &mut ContractionQueue) -> Vec<f64> {
        let mut out = Vec::new();
        while let Some((_, t)) = queue.pop_min() {
            assert!(queue.is_heap());
            out.push(t.cost);
        }
        out
    }

    #[test]
    fn test_pop_in_cost_order() {
        let mut queue = filled(&[5.0, 3.0, 8.0, 1.0, 9.0, 2.0, 7.0]);
        assert_eq!(queue.peek_min().map(|(id, _)| id), Some(PairId::new(3)));
        assert_eq!(drain(&mut queue), vec![1.0, 2.0, 3.0, 5.0, 7.0, 8.0, 9.0]);
        assert!(queue.pop_min().is_none());
    }

    #[test]
    fn test_update_decrease_moves_up() {
        let mut queue = filled(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(queue.update(PairId::new(5), target(0.5)));
        assert!(queue.is_heap());
        assert_eq!(queue.peek_min().map(|(id, _)| id), Some(PairId::new(5)));
    }

    #[test]
    fn test_update_increase_moves_down() {
        let mut queue = filled(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(queue.update(PairId::new(0), target(10.0)));
        assert!(queue.is_heap());
        assert_eq!(drain(&mut queue), vec![2.0, 3.0, 4.0, 5.0, 6.0, 10.0]);
    }

    #[test]
    fn test_update_missing_id() {
        let mut queue = filled(&[1.0]);
        assert!(!queue.update(PairId::new(7), target(1.0)));
        queue.pop_min();
        assert!(!queue.update(PairId::new(0), target(1.0)));
    }

    #[test]
    fn test_remove_from_middle() {
        let mut queue = filled(&[1.0, 4.0, 2.0, 8.0, 5.0, 3.0, 9.0]);
        assert_eq!(queue.remove(PairId::new(1)).map(|t| t.cost), Some(4.0));
        assert!(queue.is_heap());
        assert!(!queue.contains(PairId::new(1)));
        assert!(queue.remove(PairId::new(1)).is_none());
        assert_eq!(drain(&mut queue), vec![1.0, 2.0, 3.0, 5.0, 8.0, 9.0]);
    }

    #[test]
    fn test_remove_that_needs_sift_up() {
        // Removing id 3 moves the cheap last entry into a deep slot.
        let mut queue = filled(&[0.0, 10.0, 1.0, 11.0, 12.0, 2.0, 3.0]);
        queue.remove(PairId::new(3));
        assert!(queue.is_heap());
        queue.remove(PairId::new(4));
        assert!(queue.is_heap());
        assert_eq!(drain(&mut queue), vec![0.0, 1.0, 2.0, 3.0, 10.0]);
    }

    #[test]
    fn test_many_updates_keep_invariant() {
        let costs: Vec<f64> = (0..64).map(|i| ((i * 37) % 64) as f64).collect();
        let mut queue = filled(&costs);
        for i in 0..64 {
            let new_cost = ((i * 11) % 17) as f64;
            queue.update(PairId::new(i), target(new_cost));
            assert!(queue.is_heap());
        }
        let drained = drain(&mut queue);
        assert_eq!(drained.len(), 64);
        assert!(drained.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn test_double_push_panics() {
        let mut queue = filled(&[1.0]);
        queue.push(PairId::new(0), target(2.0));
    }
}
