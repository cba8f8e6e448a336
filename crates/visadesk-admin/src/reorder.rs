//! Optimistic drag-and-drop reordering.
//!
//! A drop is applied to the visible list immediately and persisted with one
//! batch request. The operation is split in two phases so that a UI shell
//! can render between them:
//!
//! 1. [`ReorderController::begin`] moves the item, renumbers every `order`
//!    to its 1-based position and hands back an [`UndoToken`] holding the
//!    pre-drag list.
//! 2. [`ReorderController::settle`] commits the new order when the server
//!    accepted it, or restores the last known-good list when it did not.
//!
//! [`ReorderController::reorder`] runs both phases around a [`ReorderSink`].
//! While a reorder is in flight further drops are refused with
//! [`Begin::Busy`]. Dropping the `reorder` future before the sink answers
//! restores the last confirmed list, as does [`ReorderController::cancel`].

use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::BoxFuture;
use tracing::{debug, info, warn};
use visadesk_client::models::{Attribute, Country, ReorderEntry};
use visadesk_client::services::ResourceService;
use visadesk_client::ClientError;

/// An item with a stable id and a display position.
pub trait Orderable {
    /// Unique id.
    fn id(&self) -> i64;

    /// Display position; smaller comes first.
    fn order(&self) -> i64;

    /// Sets the display position.
    fn set_order(&mut self, order: i64);
}

impl Orderable for Attribute {
    fn id(&self) -> i64 {
        self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Orderable for Country {
    fn id(&self) -> i64 {
        self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

/// Sorts by `order`, breaking ties by id.
pub fn sort_by_order<T: Orderable>(items: &mut [T]) {
    items.sort_by_key(|item| (item.order(), item.id()));
}

/// Moves the element at `from` to index `to`, shifting the ones in between.
///
/// Out-of-range indices leave the slice untouched.
pub fn array_move<T>(items: &mut [T], from: usize, to: usize) {
    if from >= items.len() || to >= items.len() {
        return;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
}

/// Sets every item's `order` to its 1-based position.
pub fn renumber<T: Orderable>(items: &mut [T]) {
    for (position, item) in (1_i64..).zip(items.iter_mut()) {
        item.set_order(position);
    }
}

/// The `{id, order}` pairs of a list, in display order.
pub fn reorder_entries<T: Orderable>(items: &[T]) -> Vec<ReorderEntry> {
    items
        .iter()
        .map(|item| ReorderEntry {
            id: item.id(),
            order: item.order(),
        })
        .collect()
}

/// The end of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    /// Id of the dragged item.
    pub source: i64,
    /// Id of the item it was dropped on; `None` when dropped outside the list.
    pub target: Option<i64>,
}

impl DragEnd {
    /// A drop of `source` onto `target`.
    pub fn new(source: i64, target: i64) -> Self {
        Self {
            source,
            target: Some(target),
        }
    }

    /// A drop outside the list.
    pub fn outside(source: i64) -> Self {
        Self {
            source,
            target: None,
        }
    }
}

/// Computes the list after a drop, renumbered.
///
/// Returns `None` when the drop changes nothing: fewer than two items, no
/// target, source equal to target, or an id that is not in the list.
pub fn plan_move<T: Orderable + Clone>(items: &[T], event: DragEnd) -> Option<Vec<T>> {
    let target = event.target?;
    if items.len() < 2 || event.source == target {
        return None;
    }
    let from = items.iter().position(|item| item.id() == event.source)?;
    let to = items.iter().position(|item| item.id() == target)?;

    let mut moved = items.to_vec();
    array_move(&mut moved, from, to);
    renumber(&mut moved);
    Some(moved)
}

/// Persists a new order.
pub trait ReorderSink: Send + Sync {
    /// Sends the `{id, order}` pairs in one batch.
    fn persist<'a>(
        &'a self,
        entries: &'a [ReorderEntry],
    ) -> BoxFuture<'a, Result<(), ClientError>>;
}

impl<T> ReorderSink for ResourceService<T> {
    fn persist<'a>(
        &'a self,
        entries: &'a [ReorderEntry],
    ) -> BoxFuture<'a, Result<(), ClientError>> {
        Box::pin(self.reorder(entries))
    }
}

/// Tickets are unique across controllers so a token only settles its own.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Proof of an applied optimistic move, consumed by
/// [`ReorderController::settle`].
#[derive(Debug)]
#[must_use = "an applied reorder must be settled"]
pub struct UndoToken<T> {
    ticket: u64,
    snapshot: Vec<T>,
    entries: Vec<ReorderEntry>,
}

impl<T> UndoToken<T> {
    /// The pairs to persist.
    pub fn entries(&self) -> &[ReorderEntry] {
        &self.entries
    }

    /// The list as it was before the drop.
    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }
}

/// Result of [`ReorderController::begin`].
#[derive(Debug)]
pub enum Begin<T> {
    /// Nothing to do.
    NoOp,
    /// Another reorder is in flight; the drop was ignored.
    Busy,
    /// The move is visible and must be settled.
    Applied(UndoToken<T>),
}

/// Final state of a reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The drop changed nothing.
    NoOp,
    /// Another reorder was in flight.
    Busy,
    /// The server accepted the new order.
    Committed,
    /// The server rejected it; the list was restored.
    RolledBack(String),
    /// The token did not belong to the reorder in flight and was ignored.
    Stale,
}

/// Owns a reorderable list and its last server-confirmed state.
#[derive(Debug, Clone)]
pub struct ReorderController<T> {
    items: Vec<T>,
    in_flight: Option<u64>,
    refreshed: Option<Vec<T>>,
}

impl<T> Default for ReorderController<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            in_flight: None,
            refreshed: None,
        }
    }
}

impl<T: Orderable + Clone> ReorderController<T> {
    /// Creates a controller over a server list.
    pub fn new(items: Vec<T>) -> Self {
        let mut controller = Self::default();
        controller.replace_confirmed(items);
        controller
    }

    /// The visible list.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether a reorder awaits its settle.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Installs a fresh server list, sorted by order then id.
    ///
    /// While a reorder is in flight the list is kept aside and becomes the
    /// rollback target instead of replacing the optimistic view.
    pub fn replace_confirmed(&mut self, mut items: Vec<T>) {
        sort_by_order(&mut items);
        if self.is_busy() {
            debug!(count = items.len(), "server list arrived during reorder, deferred");
            self.refreshed = Some(items);
        } else {
            self.items = items;
        }
    }

    /// Applies a drop to the visible list.
    pub fn begin(&mut self, event: DragEnd) -> Begin<T> {
        if self.is_busy() {
            debug!(source = event.source, "reorder in flight, drop ignored");
            return Begin::Busy;
        }
        let Some(moved) = plan_move(&self.items, event) else {
            return Begin::NoOp;
        };

        let ticket = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        self.in_flight = Some(ticket);

        let entries = reorder_entries(&moved);
        let snapshot = std::mem::replace(&mut self.items, moved);
        info!(source = event.source, target = ?event.target, "reorder applied locally");
        Begin::Applied(UndoToken {
            ticket,
            snapshot,
            entries,
        })
    }

    /// Commits or rolls back the reorder identified by `token`.
    pub fn settle<E: std::fmt::Display>(
        &mut self,
        token: UndoToken<T>,
        result: Result<(), E>,
    ) -> ReorderOutcome {
        if self.in_flight != Some(token.ticket) {
            warn!(ticket = token.ticket, "settle for a reorder that is not in flight");
            return ReorderOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(()) => {
                if let Some(refreshed) = self.refreshed.take() {
                    self.merge_refreshed(refreshed);
                }
                info!(count = token.entries.len(), "reorder committed");
                ReorderOutcome::Committed
            }
            Err(error) => {
                self.items = self.refreshed.take().unwrap_or(token.snapshot);
                warn!(%error, "reorder rejected, restored last confirmed order");
                ReorderOutcome::RolledBack(error.to_string())
            }
        }
    }

    /// Abandons the reorder identified by `token` without a server answer,
    /// restoring the last confirmed list.
    pub fn cancel(&mut self, token: UndoToken<T>) {
        if self.in_flight != Some(token.ticket) {
            return;
        }
        self.in_flight = None;
        self.items = self.refreshed.take().unwrap_or(token.snapshot);
        warn!(ticket = token.ticket, "reorder abandoned, restored last confirmed order");
    }

    /// Keeps the committed order and appends items only the server list has.
    fn merge_refreshed(&mut self, refreshed: Vec<T>) {
        let before = self.items.len();
        for item in refreshed {
            if !self.items.iter().any(|known| known.id() == item.id()) {
                self.items.push(item);
            }
        }
        debug!(added = self.items.len() - before, "merged server list fetched during reorder");
    }

    /// Applies a drop, persists it through `sink` and settles.
    ///
    /// Dropping the returned future before it completes cancels the reorder.
    pub async fn reorder<S>(&mut self, event: DragEnd, sink: &S) -> ReorderOutcome
    where
        S: ReorderSink + ?Sized,
    {
        let token = match self.begin(event) {
            Begin::NoOp => return ReorderOutcome::NoOp,
            Begin::Busy => return ReorderOutcome::Busy,
            Begin::Applied(token) => token,
        };
        let entries = token.entries.clone();
        let mut guard = InFlight {
            controller: self,
            token: Some(token),
        };
        let result = sink.persist(&entries).await;
        match guard.token.take() {
            Some(token) => guard.controller.settle(token, result),
            None => ReorderOutcome::Stale,
        }
    }
}

/// Cancels an unsettled reorder when dropped.
struct InFlight<'a, T: Orderable + Clone> {
    controller: &'a mut ReorderController<T>,
    token: Option<UndoToken<T>>,
}

impl<T: Orderable + Clone> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.controller.cancel(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id: i64,
        order: i64,
    }

    impl Orderable for Row {
        fn id(&self) -> i64 {
            self.id
        }

        fn order(&self) -> i64 {
            self.order
        }

        fn set_order(&mut self, order: i64) {
            self.order = order;
        }
    }

    fn rows(pairs: &[(i64, i64)]) -> Vec<Row> {
        pairs.iter().map(|&(id, order)| Row { id, order }).collect()
    }

    #[test]
    fn test_array_move_both_directions() {
        let mut v = vec![1, 2, 3, 4];
        array_move(&mut v, 0, 2);
        assert_eq!(v, vec![2, 3, 1, 4]);
        array_move(&mut v, 3, 0);
        assert_eq!(v, vec![4, 2, 3, 1]);
        array_move(&mut v, 1, 9);
        assert_eq!(v, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_sort_breaks_ties_by_id() {
        let mut items = rows(&[(5, 2), (3, 1), (4, 2), (1, 7)]);
        sort_by_order(&mut items);
        let ids: Vec<i64> = items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4, 5, 1]);
    }

    #[test]
    fn test_plan_move_noops() {
        let items = rows(&[(1, 1), (2, 2)]);
        assert!(plan_move(&items, DragEnd::new(1, 1)).is_none());
        assert!(plan_move(&items, DragEnd::outside(1)).is_none());
        assert!(plan_move(&items, DragEnd::new(1, 99)).is_none());
        assert!(plan_move(&items, DragEnd::new(99, 1)).is_none());
        assert!(plan_move(&items[..1], DragEnd::new(1, 2)).is_none());
    }

    #[test]
    fn test_plan_move_renumbers_gaps() {
        let items = rows(&[(1, 10), (2, 20), (3, 35)]);
        let moved = plan_move(&items, DragEnd::new(1, 3)).unwrap();
        assert_eq!(moved, rows(&[(2, 1), (3, 2), (1, 3)]));
    }

    #[test]
    fn test_begin_is_busy_until_settled() {
        let mut controller = ReorderController::new(rows(&[(1, 1), (2, 2), (3, 3)]));
        let Begin::Applied(token) = controller.begin(DragEnd::new(3, 1)) else {
            panic!("expected an applied move");
        };
        assert!(controller.is_busy());
        assert!(matches!(controller.begin(DragEnd::new(1, 2)), Begin::Busy));

        assert_eq!(
            controller.settle(token, Ok::<(), String>(())),
            ReorderOutcome::Committed
        );
        assert!(!controller.is_busy());
        assert_eq!(controller.items(), rows(&[(3, 1), (1, 2), (2, 3)]).as_slice());
    }

    #[test]
    fn test_rollback_restores_snapshot() {
        let original = rows(&[(1, 1), (2, 2), (3, 3)]);
        let mut controller = ReorderController::new(original.clone());
        let Begin::Applied(token) = controller.begin(DragEnd::new(1, 3)) else {
            panic!("expected an applied move");
        };
        assert_eq!(token.snapshot(), original.as_slice());

        let outcome = controller.settle(token, Err("Reorder failed"));
        assert_eq!(outcome, ReorderOutcome::RolledBack("Reorder failed".to_string()));
        assert_eq!(controller.items(), original.as_slice());
    }

    #[test]
    fn test_refresh_during_flight_becomes_rollback_target() {
        let mut controller = ReorderController::new(rows(&[(1, 1), (2, 2), (3, 3)]));
        let Begin::Applied(token) = controller.begin(DragEnd::new(1, 3)) else {
            panic!("expected an applied move");
        };

        controller.replace_confirmed(rows(&[(4, 4), (2, 1), (1, 2), (3, 3)]));
        // the optimistic view stays until settle
        assert_eq!(controller.items().len(), 3);

        controller.settle(token, Err("boom"));
        let ids: Vec<i64> = controller.items().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_foreign_token_is_stale() {
        let mut a = ReorderController::new(rows(&[(1, 1), (2, 2)]));
        let mut b = ReorderController::new(rows(&[(1, 1), (2, 2)]));
        let Begin::Applied(token_a) = a.begin(DragEnd::new(1, 2)) else {
            panic!("expected an applied move");
        };
        let Begin::Applied(token_b) = b.begin(DragEnd::new(2, 1)) else {
            panic!("expected an applied move");
        };

        assert_eq!(b.settle(token_a, Ok::<(), String>(())), ReorderOutcome::Stale);
        assert!(a.is_busy());
        assert!(b.is_busy());
        assert_eq!(b.settle(token_b, Ok::<(), String>(())), ReorderOutcome::Committed);
    }

    #[test]
    fn test_commit_keeps_items_added_meanwhile() {
        let mut controller = ReorderController::new(rows(&[(1, 1), (2, 2), (3, 3)]));
        let Begin::Applied(token) = controller.begin(DragEnd::new(3, 1)) else {
            panic!("expected an applied move");
        };
        controller.replace_confirmed(rows(&[(1, 1), (2, 2), (3, 3), (4, 4)]));

        assert_eq!(
            controller.settle(token, Ok::<(), String>(())),
            ReorderOutcome::Committed
        );
        assert_eq!(
            controller.items(),
            rows(&[(3, 1), (1, 2), (2, 3), (4, 4)]).as_slice()
        );
    }

    struct PendingSink;

    impl ReorderSink for PendingSink {
        fn persist<'a>(
            &'a self,
            _entries: &'a [ReorderEntry],
        ) -> BoxFuture<'a, Result<(), ClientError>> {
            Box::pin(futures::future::pending())
        }
    }

    #[test]
    fn test_dropped_reorder_restores_and_unlocks() {
        use futures::FutureExt;

        let mut controller = ReorderController::new(rows(&[(1, 1), (2, 2)]));
        let outcome = controller
            .reorder(DragEnd::new(2, 1), &PendingSink)
            .now_or_never();
        assert!(outcome.is_none());

        assert!(!controller.is_busy());
        assert_eq!(controller.items(), rows(&[(1, 1), (2, 2)]).as_slice());
        controller.replace_confirmed(rows(&[(2, 1), (1, 2)]));
        assert_eq!(controller.items(), rows(&[(2, 1), (1, 2)]).as_slice());
        assert!(matches!(controller.begin(DragEnd::new(2, 1)), Begin::Applied(_)));
    }

    #[test]
    fn test_cancel_prefers_refreshed_list() {
        let mut controller = ReorderController::new(rows(&[(1, 1), (2, 2)]));
        let Begin::Applied(token) = controller.begin(DragEnd::new(2, 1)) else {
            panic!("expected an applied move");
        };
        controller.replace_confirmed(rows(&[(1, 1), (2, 2), (5, 3)]));
        controller.cancel(token);
        assert!(!controller.is_busy());
        assert_eq!(controller.items(), rows(&[(1, 1), (2, 2), (5, 3)]).as_slice());
    }
}
