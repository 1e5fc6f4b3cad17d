//! Headless renderer that records the rendered board as plain data.
//!
//! The service serves `BoardSnapshot` as JSON; tests assert against it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::render::{CardView, FilterControl, PageButton, Region, Renderer};
use crate::board::slots::SlotName;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationView {
    pub hidden: bool,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub pages: Vec<PageButton>,
}

/// Everything currently rendered, region by region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub filters: Vec<FilterControl>,
    pub jobs: Vec<CardView>,
    pub featured: Vec<CardView>,
    pub pagination: PaginationView,
}

#[derive(Debug, Clone)]
pub struct SnapshotRenderer {
    slots: HashSet<SlotName>,
    snapshot: BoardSnapshot,
    scrolls: Vec<Region>,
}

impl SnapshotRenderer {
    pub fn new(slots: impl IntoIterator<Item = SlotName>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
            snapshot: BoardSnapshot::default(),
            scrolls: Vec::new(),
        }
    }

    pub fn with_all_slots() -> Self {
        Self::new(SlotName::ALL)
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Regions scrolled into view, oldest first.
    pub fn scrolls(&self) -> &[Region] {
        &self.scrolls
    }
}

impl Renderer for SnapshotRenderer {
    fn has_slot(&self, slot: SlotName) -> bool {
        self.slots.contains(&slot)
    }

    fn clear(&mut self, region: Region) {
        match region {
            Region::Filters => self.snapshot.filters.clear(),
            Region::JobList => self.snapshot.jobs.clear(),
            Region::FeaturedList => self.snapshot.featured.clear(),
            Region::PageButtons => self.snapshot.pagination.pages.clear(),
        }
    }

    fn append_card(&mut self, region: Region, card: CardView) {
        match region {
            Region::JobList => self.snapshot.jobs.push(card),
            Region::FeaturedList => self.snapshot.featured.push(card),
            Region::Filters | Region::PageButtons => {
                debug!("Ignoring job card {} for {:?} region", card.job_id, region);
            }
        }
    }

    fn append_filter(&mut self, filter: FilterControl) {
        self.snapshot.filters.push(filter);
    }

    fn activate_filter(&mut self, index: usize) {
        for (i, filter) in self.snapshot.filters.iter_mut().enumerate() {
            filter.active = i == index;
        }
    }

    fn append_page_button(&mut self, button: PageButton) {
        self.snapshot.pagination.pages.push(button);
    }

    fn set_pagination_hidden(&mut self, hidden: bool) {
        self.snapshot.pagination.hidden = hidden;
    }

    fn set_nav_disabled(&mut self, prev_disabled: bool, next_disabled: bool) {
        self.snapshot.pagination.prev_disabled = prev_disabled;
        self.snapshot.pagination.next_disabled = next_disabled;
    }

    fn scroll_into_view(&mut self, region: Region) {
        self.scrolls.push(region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::job;

    fn filter(label: &str) -> FilterControl {
        FilterControl {
            label: label.to_string(),
            department: Some(label.to_string()),
            active: false,
        }
    }

    #[test]
    fn test_activate_filter_leaves_exactly_one_active() {
        let mut renderer = SnapshotRenderer::with_all_slots();
        renderer.append_filter(filter("A"));
        renderer.append_filter(filter("B"));
        renderer.append_filter(filter("C"));

        renderer.activate_filter(0);
        renderer.activate_filter(2);

        let active: Vec<_> = renderer
            .snapshot()
            .filters
            .iter()
            .filter(|f| f.active)
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(active, vec!["C"]);
    }

    #[test]
    fn test_has_slot_reflects_construction() {
        let renderer = SnapshotRenderer::new([SlotName::JobContainer]);
        assert!(renderer.has_slot(SlotName::JobContainer));
        assert!(!renderer.has_slot(SlotName::JobList));
    }

    #[test]
    fn test_cards_only_land_in_card_regions() {
        let mut renderer = SnapshotRenderer::with_all_slots();
        let card = CardView::from(&job(1, "Ops", "2024-01-01"));

        renderer.append_card(Region::JobList, card.clone());
        renderer.append_card(Region::FeaturedList, card.clone());
        renderer.append_card(Region::Filters, card.clone());
        renderer.append_card(Region::PageButtons, card.clone());

        let snapshot = renderer.snapshot();
        assert_eq!(snapshot.jobs, vec![card.clone()]);
        assert_eq!(snapshot.featured, vec![card]);
        assert!(snapshot.filters.is_empty());
        assert!(snapshot.pagination.pages.is_empty());
    }

    #[test]
    fn test_clear_only_touches_its_region() {
        let mut renderer = SnapshotRenderer::with_all_slots();
        renderer.append_filter(filter("A"));
        renderer.append_page_button(PageButton {
            page: 1,
            active: true,
        });

        renderer.clear(Region::PageButtons);
        assert!(renderer.snapshot().pagination.pages.is_empty());
        assert_eq!(renderer.snapshot().filters.len(), 1);
    }
}
