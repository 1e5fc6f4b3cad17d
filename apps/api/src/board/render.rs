//! Rendering seam between the board and whatever surface displays it.
//!
//! The board never touches markup. It describes each card and control as a
//! small view value and hands it to a `Renderer`, which clones its template
//! and binds the fields. `SnapshotRenderer` is the headless implementation.

use serde::{Deserialize, Serialize};

use crate::board::slots::SlotName;
use crate::models::JobRecord;

/// Link target used for every call-to-action.
pub const CTA_TARGET: &str = "_blank";
/// Isolates the opened page from the board's window.
pub const CTA_REL: &str = "noopener noreferrer";

/// Container regions the board clears and fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Filters,
    JobList,
    FeaturedList,
    PageButtons,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub href: String,
    pub target: String,
    pub rel: String,
}

/// One bound job card: the same shape for the main list and featured list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub job_id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub cta: CallToAction,
}

impl From<&JobRecord> for CardView {
    fn from(job: &JobRecord) -> Self {
        Self {
            job_id: job.id,
            title: job.title.clone(),
            description: job.location.label.clone(),
            category: job.department.clone(),
            cta: CallToAction {
                href: job.posting_url.clone(),
                target: CTA_TARGET.to_string(),
                rel: CTA_REL.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterControl {
    pub label: String,
    /// `None` for the "View all" control.
    pub department: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageButton {
    pub page: usize,
    pub active: bool,
}

/// The rendering capability the board drives.
///
/// Every `clear` is followed by a full set of `append_*` calls for that
/// region; implementations never need to diff.
pub trait Renderer: Send {
    /// Whether the host page provides the named slot.
    fn has_slot(&self, slot: SlotName) -> bool;

    fn clear(&mut self, region: Region);

    fn append_card(&mut self, region: Region, card: CardView);

    fn append_filter(&mut self, filter: FilterControl);

    /// Deactivates every filter control, then activates the one at `index`.
    fn activate_filter(&mut self, index: usize);

    fn append_page_button(&mut self, button: PageButton);

    fn set_pagination_hidden(&mut self, hidden: bool);

    fn set_nav_disabled(&mut self, prev_disabled: bool, next_disabled: bool);

    /// Smooth-scrolls `region` so its top aligns with the viewport's.
    /// Headless renderers may ignore this.
    fn scroll_into_view(&mut self, region: Region);
}
