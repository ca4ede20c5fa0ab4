//! Linear undo/redo history over shape-set snapshots.

use crate::shapes::Shape;
use std::sync::Arc;

/// An immutable shape set stored in history.
pub type Snapshot = Arc<[Shape]>;

/// Undo/redo history.
///
/// Holds every committed shape set plus a cursor. The first snapshot is the
/// empty set and is never discarded; committing drops every snapshot after
/// the cursor before appending.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history holding only the empty initial state.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Arc::from(Vec::<Shape>::new())],
            index: 0,
        }
    }

    /// Record a completed edit.
    pub fn commit(&mut self, shapes: &[Shape]) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(Arc::from(shapes));
        self.index = self.snapshots.len() - 1;
        log::debug!(
            "Committed {} shapes (history entry {} of {})",
            shapes.len(),
            self.index,
            self.snapshots.len() - 1
        );
    }

    /// Step back one entry. At the start of history this is a no-op.
    /// Returns the snapshot now current.
    pub fn undo(&mut self) -> Snapshot {
        if self.can_undo() {
            self.index -= 1;
            log::debug!("Undo to history entry {}", self.index);
        }
        self.current()
    }

    /// Step forward one entry. At the end of history this is a no-op.
    /// Returns the snapshot now current.
    pub fn redo(&mut self) -> Snapshot {
        if self.can_redo() {
            self.index += 1;
            log::debug!("Redo to history entry {}", self.index);
        }
        self.current()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Snapshot {
        Arc::clone(&self.snapshots[self.index])
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored snapshots, including the initial empty one.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the initial empty snapshot is never removed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeKind, ShapeStyle};
    use kurbo::Point;

    fn shape_set(n: usize) -> Vec<Shape> {
        (0..n)
            .map(|i| {
                Shape::new(ShapeKind::Line, Point::new(i as f64, 0.0), ShapeStyle::default())
                    .with_point(Point::new(i as f64, 10.0))
            })
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_sequence() {
        let mut history = History::new();
        let a = shape_set(1);
        let mut b = a.clone();
        b.extend(shape_set(1));

        history.commit(&a);
        history.commit(&b);

        assert_eq!(&*history.undo(), a.as_slice());
        assert!(history.undo().is_empty());
        // Further undo is a no-op.
        assert!(history.undo().is_empty());
        assert_eq!(history.index(), 0);

        assert_eq!(&*history.redo(), a.as_slice());

        let mut c = a.clone();
        c.extend(shape_set(2));
        history.commit(&c);
        assert!(!history.can_redo());
        assert_eq!(&*history.redo(), c.as_slice());
        assert_eq!(history.len(), 3);

        assert_eq!(&*history.undo(), a.as_slice());
    }

    #[test]
    fn test_redo_at_end_is_noop() {
        let mut history = History::new();
        let a = shape_set(2);
        history.commit(&a);
        assert_eq!(&*history.redo(), a.as_slice());
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_commit_empty_set_is_undoable() {
        let mut history = History::new();
        let a = shape_set(3);
        history.commit(&a);
        history.commit(&[]);
        assert!(history.current().is_empty());
        assert!(history.can_undo());
        assert_eq!(history.undo().len(), 3);
    }

    #[test]
    fn test_snapshots_are_independent_copies() {
        let mut history = History::new();
        let mut shapes = shape_set(1);
        history.commit(&shapes);
        shapes[0].points[0] = Point::new(99.0, 99.0);
        assert_eq!(history.current()[0].points[0], Point::new(0.0, 0.0));
    }
}
