//! Linear undo/redo history.

use std::collections::VecDeque;

/// A value with a linear undo/redo history.
///
/// `past` runs oldest to newest, `future` runs from the next redo to the
/// furthest one. Adding a value always discards `future`, so there is never
/// more than one branch to redo into.
#[derive(Debug, Clone)]
pub struct VersionedHistory<T> {
    current: T,
    past: VecDeque<T>,
    future: VecDeque<T>,
    max_depth: Option<usize>,
}

impl<T: Default> Default for VersionedHistory<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> VersionedHistory<T> {
    /// Create a history whose only state is `value`.
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_depth: None,
        }
    }

    /// Limit the number of undo states kept. Oldest states are dropped first.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self.enforce_depth();
        self
    }

    /// The current value.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Make `value` the current state. Clears the redo stack.
    pub fn add(&mut self, value: T) {
        let previous = std::mem::replace(&mut self.current, value);
        self.past.push_back(previous);
        self.future.clear();
        self.enforce_depth();
    }

    /// Step back one state.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, previous);
        self.future.push_front(current);
        true
    }

    /// Step forward one state.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, next);
        self.past.push_back(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of states reachable with undo.
    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    /// Number of states reachable with redo.
    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    fn enforce_depth(&mut self) {
        if let Some(max) = self.max_depth {
            while self.past.len() > max {
                self.past.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_and_undo() {
        let mut history = VersionedHistory::new(0);
        history.add(1);
        history.add(2);

        assert_eq!(*history.current(), 2);
        assert!(history.undo());
        assert_eq!(*history.current(), 1);
        assert!(history.can_redo());
        assert!(history.undo());
        assert_eq!(*history.current(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_order() {
        let mut history = VersionedHistory::new(0);
        history.add(1);
        history.add(2);
        history.undo();
        history.undo();

        assert!(history.redo());
        assert_eq!(*history.current(), 1);
        assert!(history.redo());
        assert_eq!(*history.current(), 2);
        assert!(!history.redo());
    }

    #[test]
    fn test_add_clears_redo() {
        let mut history = VersionedHistory::new(0);
        history.add(1);
        history.undo();
        assert!(history.can_redo());

        history.add(5);
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(*history.current(), 5);
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history: VersionedHistory<Vec<u8>> = VersionedHistory::default();
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.current().is_empty());
    }

    #[test]
    fn test_max_depth_drops_oldest() {
        let mut history = VersionedHistory::new(0).with_max_depth(Some(2));
        for value in 1..=5 {
            history.add(value);
        }

        assert_eq!(history.undo_len(), 2);
        history.undo();
        history.undo();
        assert_eq!(*history.current(), 3);
        assert!(!history.can_undo());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u32),
        Undo,
        Redo,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u32>().prop_map(Op::Add),
            Just(Op::Undo),
            Just(Op::Redo),
        ]
    }

    /// Reference model: a list of states and a cursor into it.
    struct Model {
        states: Vec<u32>,
        index: usize,
    }

    impl Model {
        fn apply(&mut self, op: &Op) {
            match op {
                Op::Add(v) => {
                    self.states.truncate(self.index + 1);
                    self.states.push(*v);
                    self.index += 1;
                }
                Op::Undo => self.index = self.index.saturating_sub(1),
                Op::Redo => {
                    if self.index + 1 < self.states.len() {
                        self.index += 1;
                    }
                }
            }
        }
    }

    proptest! {
        #[test]
        fn matches_linear_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut history = VersionedHistory::new(0u32);
            let mut model = Model { states: vec![0], index: 0 };

            for op in &ops {
                match op {
                    Op::Add(v) => history.add(*v),
                    Op::Undo => { history.undo(); }
                    Op::Redo => { history.redo(); }
                }
                model.apply(op);

                prop_assert_eq!(*history.current(), model.states[model.index]);
                prop_assert_eq!(history.undo_len(), model.index);
                prop_assert_eq!(history.redo_len(), model.states.len() - model.index - 1);
                if matches!(op, Op::Add(_)) {
                    prop_assert!(!history.can_redo());
                }
            }
        }

        #[test]
        fn undo_then_redo_restores(values in prop::collection::vec(any::<u32>(), 1..16)) {
            let mut history = VersionedHistory::new(0u32);
            for v in &values {
                history.add(*v);
            }
            let before = *history.current();
            prop_assert!(history.undo());
            prop_assert!(history.redo());
            prop_assert_eq!(*history.current(), before);
        }

        #[test]
        fn max_depth_is_respected(
            cap in 0usize..8,
            ops in prop::collection::vec(op_strategy(), 0..64),
        ) {
            let mut history = VersionedHistory::new(0u32).with_max_depth(Some(cap));
            for op in &ops {
                match op {
                    Op::Add(v) => history.add(*v),
                    Op::Undo => { history.undo(); }
                    Op::Redo => { history.redo(); }
                }
                prop_assert!(history.undo_len() <= cap);
            }
        }
    }
}
