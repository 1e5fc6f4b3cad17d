//! Job List View-Model — owns the job set and everything derived from it.
//!
//! # State
//! - `jobs`: the full set from the last applied load, in feed order.
//! - `departments`: distinct non-empty departments, ascending. Rebuilt per load.
//! - `filtered`: `jobs` narrowed by the active department filter.
//! - `current_page`: 1-based, always within `1..=max(1, page_count)`.
//!
//! # Load pipeline
//! departments → featured → filter controls → "all" filter (list + pagination).
//!
//! # Overlapping loads
//! Each load takes a `LoadTicket` before the source is awaited. A response is
//! applied only when its ticket is newer than the last applied one; older
//! responses arriving late are dropped as stale.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::board::render::{CardView, FilterControl, PageButton, Region, Renderer};
use crate::board::slots::SlotName;
use crate::models::JobRecord;
use crate::source::SourceError;

pub const JOBS_PER_PAGE: usize = 5;
pub const FEATURED_JOBS_COUNT: usize = 4;
pub const VIEW_ALL_LABEL: &str = "View all";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Missing required slot: {0}")]
    MissingSlot(SlotName),

    #[error("Unknown department: {0}")]
    UnknownDepartment(String),
}

/// Issued by `begin_load`, redeemed by `complete_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The response replaced the job set and the board re-rendered.
    Applied,
    /// The source failed; prior state is untouched.
    Failed,
    /// A newer load was already applied; the response was dropped.
    Stale,
}

pub struct JobBoard<R> {
    renderer: R,
    featured_enabled: bool,
    jobs: Vec<JobRecord>,
    filtered: Vec<JobRecord>,
    departments: Vec<String>,
    current_filter: Option<String>,
    current_page: usize,
    issued_ticket: u64,
    applied_ticket: u64,
}

impl<R: Renderer> JobBoard<R> {
    // ────────────────────────────────────────────────────────────────────────
    // Initialization
    // ────────────────────────────────────────────────────────────────────────

    /// Validates the host page's slots. Nothing is rendered here.
    ///
    /// Fails on the first missing required slot. A featured list without a
    /// featured card template is logged and featured rendering is disabled.
    pub fn init(renderer: R) -> Result<Self, BoardError> {
        if let Some(missing) = SlotName::REQUIRED
            .into_iter()
            .find(|slot| !renderer.has_slot(*slot))
        {
            error!("[JobBoard] Missing required slot: {missing}");
            return Err(BoardError::MissingSlot(missing));
        }

        let has_featured_list = renderer.has_slot(SlotName::JobListFeatured);
        let has_featured_card = renderer.has_slot(SlotName::FeaturedJobCard);
        if has_featured_list && !has_featured_card {
            error!(
                "[JobBoard] Missing slot: {}; featured jobs will not render",
                SlotName::FeaturedJobCard
            );
        }

        Ok(Self {
            renderer,
            featured_enabled: has_featured_list && has_featured_card,
            jobs: Vec::new(),
            filtered: Vec::new(),
            departments: Vec::new(),
            current_filter: None,
            current_page: 1,
            issued_ticket: 0,
            applied_ticket: 0,
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Loading
    // ────────────────────────────────────────────────────────────────────────

    /// Fetches from `source` and applies the result.
    ///
    /// Holds `&mut self` across the fetch; callers sharing the board should
    /// use `begin_load` / `complete_load` around their own fetch instead.
    #[cfg(test)]
    pub async fn load(&mut self, source: &dyn crate::source::JobSource) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = source.fetch_jobs().await;
        self.complete_load(ticket, result)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_ticket += 1;
        LoadTicket(self.issued_ticket)
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<JobRecord>, SourceError>,
    ) -> LoadOutcome {
        let jobs = match result {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("[JobBoard] Failed to fetch jobs (load {ticket}): {e}");
                return LoadOutcome::Failed;
            }
        };

        if ticket.0 <= self.applied_ticket {
            warn!(
                "[JobBoard] Discarding stale load {ticket}; load #{} already applied",
                self.applied_ticket
            );
            return LoadOutcome::Stale;
        }

        self.applied_ticket = ticket.0;
        info!("[JobBoard] Loaded {} jobs (load {ticket})", jobs.len());
        self.replace_jobs(jobs);
        LoadOutcome::Applied
    }

    fn replace_jobs(&mut self, jobs: Vec<JobRecord>) {
        self.jobs = jobs;
        self.departments = extract_departments(&self.jobs);
        self.render_featured();
        self.render_filters();
        self.filter_by(None);
    }

    // ────────────────────────────────────────────────────────────────────────
    // Filtering
    // ────────────────────────────────────────────────────────────────────────

    /// Shows only `department` (or everything for `None`) starting at page 1.
    ///
    /// Only departments present in the current facet can be selected.
    pub fn apply_filter(&mut self, department: Option<&str>) -> Result<(), BoardError> {
        let index = match department {
            None => 0,
            Some(dept) => {
                let position = self
                    .departments
                    .iter()
                    .position(|d| d == dept)
                    .ok_or_else(|| BoardError::UnknownDepartment(dept.to_string()))?;
                position + 1
            }
        };

        self.renderer.activate_filter(index);
        self.filter_by(department.map(str::to_string));
        Ok(())
    }

    fn filter_by(&mut self, department: Option<String>) {
        self.filtered = match &department {
            None => self.jobs.clone(),
            Some(dept) => self
                .jobs
                .iter()
                .filter(|job| &job.department == dept)
                .cloned()
                .collect(),
        };
        self.current_filter = department;
        self.current_page = 1;

        self.render_jobs();
        self.render_pagination();
    }

    // ────────────────────────────────────────────────────────────────────────
    // Navigation
    // ────────────────────────────────────────────────────────────────────────

    /// Moves to `page`. Returns false (and changes nothing) when out of range.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.page_count() {
            return false;
        }

        self.current_page = page;
        self.render_jobs();
        self.render_pagination();
        self.renderer.scroll_into_view(Region::JobList);
        true
    }

    pub fn prev_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Rendering
    // ────────────────────────────────────────────────────────────────────────

    fn render_featured(&mut self) {
        if !self.featured_enabled {
            return;
        }

        self.renderer.clear(Region::FeaturedList);
        for job in featured_jobs(&self.jobs, FEATURED_JOBS_COUNT) {
            self.renderer
                .append_card(Region::FeaturedList, CardView::from(job));
        }
    }

    fn render_filters(&mut self) {
        self.renderer.clear(Region::Filters);
        self.renderer.append_filter(FilterControl {
            label: VIEW_ALL_LABEL.to_string(),
            department: None,
            active: true,
        });
        for dept in &self.departments {
            self.renderer.append_filter(FilterControl {
                label: dept.clone(),
                department: Some(dept.clone()),
                active: false,
            });
        }
    }

    fn render_jobs(&mut self) {
        self.renderer.clear(Region::JobList);
        let start = (self.current_page - 1) * JOBS_PER_PAGE;
        for job in self.filtered.iter().skip(start).take(JOBS_PER_PAGE) {
            self.renderer.append_card(Region::JobList, CardView::from(job));
        }
    }

    fn render_pagination(&mut self) {
        let fits_one_page = self.filtered.len() <= JOBS_PER_PAGE;
        let at_first = self.current_page <= 1;
        let at_last = self.current_page >= self.total_pages();
        let page_count = self.page_count();

        self.renderer.set_pagination_hidden(fits_one_page);
        self.renderer.set_nav_disabled(at_first, at_last);

        self.renderer.clear(Region::PageButtons);
        for page in 1..=page_count {
            self.renderer.append_page_button(PageButton {
                page,
                active: page == self.current_page,
            });
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Accessors
    // ────────────────────────────────────────────────────────────────────────

    /// Number of pages the filtered set spans; zero when it is empty.
    pub fn page_count(&self) -> usize {
        self.filtered.len().div_ceil(JOBS_PER_PAGE)
    }

    /// Page count for display and bounds: an empty set still has one page.
    pub fn total_pages(&self) -> usize {
        self.page_count().max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn current_filter(&self) -> Option<&str> {
        self.current_filter.as_deref()
    }

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn filtered_jobs(&self) -> &[JobRecord] {
        &self.filtered
    }

    #[cfg(test)]
    pub fn featured_enabled(&self) -> bool {
        self.featured_enabled
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Distinct non-empty departments, sorted ascending.
pub fn extract_departments(jobs: &[JobRecord]) -> Vec<String> {
    jobs.iter()
        .filter(|job| !job.department.is_empty())
        .map(|job| job.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The `count` most recently posted jobs, newest first.
///
/// Stable: equal dates keep feed order. Undated records sort last.
pub fn featured_jobs(jobs: &[JobRecord], count: usize) -> Vec<&JobRecord> {
    let mut by_date: Vec<&JobRecord> = jobs.iter().collect();
    by_date.sort_by_key(|job| std::cmp::Reverse(job.posted_at()));
    by_date.truncate(count);
    by_date
}
