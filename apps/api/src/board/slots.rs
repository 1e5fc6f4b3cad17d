use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named template region on the host page.
///
/// Names match the `dev-role` / `dev-target` attribute values the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotName {
    JobContainer,
    JobFiltersWrapper,
    JobFilterTag,
    JobList,
    OneJobCard,
    JobPaginationWrapper,
    BtnPrev,
    BtnNext,
    PageBtnTemplate,
    PageBtnWrapper,
    JobListFeatured,
    FeaturedJobCard,
}

impl SlotName {
    /// Slots without which the board refuses to initialize, in check order.
    pub const REQUIRED: [SlotName; 10] = [
        SlotName::JobContainer,
        SlotName::JobFiltersWrapper,
        SlotName::JobFilterTag,
        SlotName::JobList,
        SlotName::OneJobCard,
        SlotName::JobPaginationWrapper,
        SlotName::BtnPrev,
        SlotName::BtnNext,
        SlotName::PageBtnTemplate,
        SlotName::PageBtnWrapper,
    ];

    pub const ALL: [SlotName; 12] = [
        SlotName::JobContainer,
        SlotName::JobFiltersWrapper,
        SlotName::JobFilterTag,
        SlotName::JobList,
        SlotName::OneJobCard,
        SlotName::JobPaginationWrapper,
        SlotName::BtnPrev,
        SlotName::BtnNext,
        SlotName::PageBtnTemplate,
        SlotName::PageBtnWrapper,
        SlotName::JobListFeatured,
        SlotName::FeaturedJobCard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotName::JobContainer => "job-container",
            SlotName::JobFiltersWrapper => "job-filters-wrapper",
            SlotName::JobFilterTag => "job-filter-tag",
            SlotName::JobList => "job-list",
            SlotName::OneJobCard => "one-job-card",
            SlotName::JobPaginationWrapper => "job-pagination-wrapper",
            SlotName::BtnPrev => "btn-prev",
            SlotName::BtnNext => "btn-next",
            SlotName::PageBtnTemplate => "page-btn-template",
            SlotName::PageBtnWrapper => "page-btn-wrapper",
            SlotName::JobListFeatured => "job-list-featured",
            SlotName::FeaturedJobCard => "featured-job-card",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown slot name: {0}")]
pub struct UnknownSlot(pub String);

impl FromStr for SlotName {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SlotName::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| UnknownSlot(s.to_string()))
    }
}

/// Parses a comma-separated slot list such as `"job-container,job-list"`.
/// Empty items are skipped.
pub fn parse_slot_list(raw: &str) -> Result<Vec<SlotName>, UnknownSlot> {
    raw.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(str::parse)
        .collect()
}
