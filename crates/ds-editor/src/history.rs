//! Snapshot-based undo/redo history.
//!
//! The manager keeps two [`SnapshotStack`]s (past and undone futures) plus a
//! *baseline*: the snapshot it most recently captured from the surface.
//! Because mutation notifications arrive *after* the surface
//! changed, `record_mutation` pushes the baseline (the pre-mutation state)
//! and then re-captures the surface as the new baseline.
//!
//! Undo and redo always capture the live surface **before** restoring, so
//! the state being left is exactly the state that redo/undo returns to.
//!
//! A gesture made of many mutations (a drag, a multi-step action) can be
//! grouped with `begin_batch`/`end_batch` into a single undo step.

use ds_core::{DocumentSurface, Snapshot, SurfaceError};

/// A last-in/first-out stack of snapshots.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStack {
    items: Vec<Snapshot>,
}

impl SnapshotStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.items.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&Snapshot> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop the bottom (oldest) entry. Only the depth cap uses this.
    fn evict_oldest(&mut self) -> Option<Snapshot> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }
}

/// Linear undo/redo history over a [`DocumentSurface`].
#[derive(Debug, Clone)]
pub struct HistoryManager {
    history: SnapshotStack,
    redo: SnapshotStack,
    /// Last snapshot captured from the surface. Re-captured after every
    /// restore, so it is always in the surface's own encoding.
    baseline: Snapshot,
    /// Maximum undo depth; `None` is unbounded.
    max_depth: Option<usize>,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// Baseline at the moment the outermost batch opened.
    batch_start: Option<Snapshot>,
}

impl HistoryManager {
    /// Unbounded history starting from `initial`, the surface's current state.
    pub fn new(initial: Snapshot) -> Self {
        Self::with_capacity(initial, None)
    }

    /// History that keeps at most `max_depth` undo steps, evicting the oldest.
    pub fn with_capacity(initial: Snapshot, max_depth: Option<usize>) -> Self {
        Self {
            history: SnapshotStack::new(),
            redo: SnapshotStack::new(),
            baseline: initial,
            max_depth,
            batch_depth: 0,
            batch_start: None,
        }
    }

    /// Record that the surface just mutated: the pre-mutation state becomes
    /// an undo step and the redo stack is cleared. Every call records; the
    /// caller is responsible for de-duplicating notifications.
    ///
    /// Inside a batch this only notes the change; `end_batch` records it.
    pub fn record_mutation<S: DocumentSurface + ?Sized>(&mut self, surface: &S) {
        let current = surface.serialize();
        if self.batch_depth > 0 {
            log::trace!("mutation folded into open batch");
            self.baseline = current;
            return;
        }
        let before = std::mem::replace(&mut self.baseline, current);
        self.push_history(before);
        self.redo.clear();
    }

    /// Step back one state. Returns `Ok(false)` if there is nothing to undo.
    ///
    /// If the surface rejects the snapshot, both stacks are left exactly as
    /// they were and the error is returned.
    pub fn undo<S: DocumentSurface + ?Sized>(&mut self, surface: &mut S) -> Result<bool, SurfaceError> {
        self.close_open_batch(surface);
        let Some(target) = self.history.pop() else {
            return Ok(false);
        };
        let current = surface.serialize();
        if let Err(err) = surface.restore(&target) {
            log::warn!("undo restore failed: {err}");
            self.history.push(target);
            return Err(err);
        }
        self.redo.push(current);
        self.baseline = surface.serialize();
        log::debug!(
            "undo: {} undo / {} redo steps left",
            self.history.len(),
            self.redo.len()
        );
        Ok(true)
    }

    /// Re-apply the most recently undone state. Returns `Ok(false)` if there
    /// is nothing to redo. Failure handling mirrors [`undo`](Self::undo).
    pub fn redo<S: DocumentSurface + ?Sized>(&mut self, surface: &mut S) -> Result<bool, SurfaceError> {
        self.close_open_batch(surface);
        let Some(target) = self.redo.pop() else {
            return Ok(false);
        };
        let current = surface.serialize();
        if let Err(err) = surface.restore(&target) {
            log::warn!("redo restore failed: {err}");
            self.redo.push(target);
            return Err(err);
        }
        self.push_history(current);
        self.baseline = surface.serialize();
        log::debug!(
            "redo: {} undo / {} redo steps left",
            self.history.len(),
            self.redo.len()
        );
        Ok(true)
    }

    /// Load `initial` into the surface and forget all history.
    /// On error nothing changes.
    pub fn reset<S: DocumentSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        initial: Snapshot,
    ) -> Result<(), SurfaceError> {
        surface.restore(&initial)?;
        self.history.clear();
        self.redo.clear();
        self.batch_depth = 0;
        self.batch_start = None;
        self.baseline = surface.serialize();
        Ok(())
    }

    /// Open a batch. Batches nest; only the outermost one records.
    pub fn begin_batch(&mut self) {
        if self.batch_depth == 0 {
            self.batch_start = Some(self.baseline.clone());
        }
        self.batch_depth += 1;
    }

    /// Close a batch. When the outermost batch closes and the surface differs
    /// from its state when the batch opened, one undo step is pushed.
    pub fn end_batch<S: DocumentSurface + ?Sized>(&mut self, surface: &S) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth > 0 {
            return;
        }
        let Some(before) = self.batch_start.take() else {
            return;
        };
        let after = surface.serialize();
        if before != after {
            self.push_history(before);
            self.redo.clear();
        }
        self.baseline = after;
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    /// The state an undo would return to, without popping it.
    pub fn peek_undo(&self) -> Option<&Snapshot> {
        self.history.peek()
    }

    /// The state a redo would return to, without popping it.
    pub fn peek_redo(&self) -> Option<&Snapshot> {
        self.redo.peek()
    }

    /// The most recently captured snapshot.
    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    fn push_history(&mut self, snapshot: Snapshot) {
        self.history.push(snapshot);
        if let Some(max) = self.max_depth {
            while self.history.len() > max {
                if self.history.evict_oldest().is_some() {
                    log::debug!("history full ({max}), evicted oldest step");
                }
            }
        }
    }

    /// Undo/redo inside a gesture: commit what the gesture did so far as
    /// one step, then let the undo/redo proceed.
    fn close_open_batch<S: DocumentSurface + ?Sized>(&mut self, surface: &S) {
        if self.batch_depth > 0 {
            log::warn!("undo/redo during an open batch; closing it first");
            self.batch_depth = 1;
            self.end_batch(surface);
        }
    }
}
