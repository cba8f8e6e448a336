//! # visadesk-admin
//!
//! Controllers behind the visadesk dashboard and public site.
//!
//! - [`reorder`]: optimistic drag-and-drop reordering persisted with one
//!   batch request and rolled back when the server refuses it
//! - [`ListPage`]: pagination, search and filters with stale-response
//!   protection
//! - [`pages`]: the attribute, country, FAQ, "About Us", contact request and
//!   login screens plus the public catalog
//!
//! ## Reordering
//!
//! ```rust
//! use visadesk_admin::reorder::{Begin, DragEnd, Orderable, ReorderController, ReorderOutcome};
//!
//! #[derive(Clone)]
//! struct Row {
//!     id: i64,
//!     order: i64,
//! }
//!
//! impl Orderable for Row {
//!     fn id(&self) -> i64 {
//!         self.id
//!     }
//!     fn order(&self) -> i64 {
//!         self.order
//!     }
//!     fn set_order(&mut self, order: i64) {
//!         self.order = order;
//!     }
//! }
//!
//! let rows = (1..=3).map(|id| Row { id, order: id }).collect();
//! let mut controller = ReorderController::new(rows);
//!
//! let Begin::Applied(token) = controller.begin(DragEnd::new(3, 1)) else {
//!     unreachable!()
//! };
//! // the new order is visible before the server answers
//! let ids: Vec<i64> = controller.items().iter().map(|r| r.id).collect();
//! assert_eq!(ids, [3, 1, 2]);
//! assert_eq!(token.entries()[0].order, 1);
//!
//! // the server refused: the previous order comes back
//! let outcome = controller.settle(token, Err("Reorder failed"));
//! assert!(matches!(outcome, ReorderOutcome::RolledBack(_)));
//! let ids: Vec<i64> = controller.items().iter().map(|r| r.id).collect();
//! assert_eq!(ids, [1, 2, 3]);
//! ```

mod error;
mod list;
pub mod pages;
pub mod reorder;

pub use error::{AdminError, Result};
pub use list::{ListPage, LoadTicket};
pub use reorder::{DragEnd, Orderable, ReorderController, ReorderOutcome, ReorderSink};
