// Job board widget: slot validation, the list view-model and its renderer seam.
// The view-model is synchronous; only `BoardHandle::refresh` awaits the job source.

pub mod handle;
pub mod handlers;
pub mod render;
pub mod slots;
pub mod snapshot;
pub mod view_model;

// Re-export the public API consumed by main and the router.
pub use handle::{BoardHandle, BoardView};
pub use slots::SlotName;
pub use snapshot::SnapshotRenderer;
pub use view_model::{BoardError, LoadOutcome};
