use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Department assigned to records the feed leaves without one.
pub const DEFAULT_DEPARTMENT: &str = "General";
/// Title assigned to records the feed leaves without one.
pub const DEFAULT_TITLE: &str = "Untitled Position";

/// A single open position as served to the job board.
///
/// Immutable once fetched; the board only ever replaces whole sets of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: u64,
    #[serde(default = "default_title", deserialize_with = "title_or_default")]
    pub title: String,
    pub posted_date: String,
    pub location: JobLocation,
    #[serde(
        default = "default_department",
        deserialize_with = "department_or_default"
    )]
    pub department: String,
    pub posting_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiring_lead: Option<HiringLead>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicants: Option<ApplicantCounts>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobLocation {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Posting status in the applicant tracking system (e.g. `Open`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringLead {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicantCounts {
    pub new: u32,
    pub active: u32,
    pub total: u32,
}

impl JobRecord {
    /// Parses `posted_date` into a sortable timestamp.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and bare
    /// `YYYY-MM-DD` (midnight). Returns `None` for anything else.
    pub fn posted_at(&self) -> Option<NaiveDateTime> {
        let raw = self.posted_date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }
        for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

fn default_department() -> String {
    DEFAULT_DEPARTMENT.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn department_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_department))
}

fn title_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_department_defaults_to_general() {
        let job: JobRecord = serde_json::from_value(json!({
            "id": 7,
            "title": "Pilot",
            "postedDate": "2024-01-01",
            "location": { "label": "Phoenix, AZ" },
            "department": null,
            "postingUrl": "https://example.com/jobs/7"
        }))
        .unwrap();
        assert_eq!(job.department, "General");
    }

    #[test]
    fn test_missing_title_and_department_get_defaults() {
        let job: JobRecord = serde_json::from_value(json!({
            "id": 8,
            "postedDate": "2024-01-01",
            "location": { "label": "Remote" },
            "postingUrl": "https://example.com/jobs/8"
        }))
        .unwrap();
        assert_eq!(job.title, "Untitled Position");
        assert_eq!(job.department, "General");
    }

    #[test]
    fn test_empty_department_is_kept_verbatim() {
        let job: JobRecord = serde_json::from_value(json!({
            "id": 9,
            "title": "Mechanic",
            "postedDate": "2024-01-01",
            "location": { "label": "Mesa, AZ" },
            "department": "",
            "postingUrl": "https://example.com/jobs/9"
        }))
        .unwrap();
        assert_eq!(job.department, "");
    }

    #[test]
    fn test_tracking_fields_pass_through() {
        let feed = json!({
            "id": 10,
            "title": "Dispatcher",
            "postedDate": "2024-03-05 08:15:00",
            "location": {
                "label": "Tucson, AZ",
                "city": "Tucson",
                "state": "AZ",
                "address": {
                    "line1": "1 Main St",
                    "line2": null,
                    "city": "Tucson",
                    "state": "AZ",
                    "zipcode": "85701",
                    "country": "United States"
                }
            },
            "department": "Operations",
            "status": { "id": 1, "label": "Open" },
            "hiringLead": { "name": "Dana Reyes", "avatar": "https://example.com/a.png" },
            "applicants": { "new": 1, "active": 2, "total": 3 },
            "postingUrl": "https://example.com/jobs/10"
        });

        let job: JobRecord = serde_json::from_value(feed.clone()).unwrap();
        assert_eq!(job.location.city.as_deref(), Some("Tucson"));
        assert!(job.posted_at().is_some());
        assert_eq!(job.status.as_ref().map(|s| s.label.as_str()), Some("Open"));
        assert_eq!(job.applicants.map(|a| a.total), Some(3));
        assert_eq!(
            job.location.address.as_ref().and_then(|a| a.zipcode.as_deref()),
            Some("85701")
        );

        assert_eq!(serde_json::to_value(&job).unwrap(), feed);
    }

    #[test]
    fn test_absent_tracking_fields_are_not_serialized() {
        let job: JobRecord = serde_json::from_value(json!({
            "id": 11,
            "title": "Fueler",
            "postedDate": "2024-03-05",
            "location": { "label": "Mesa, AZ" },
            "department": "Ops",
            "postingUrl": "https://example.com/jobs/11"
        }))
        .unwrap();
        let value = serde_json::to_value(&job).unwrap();
        assert!(value.get("status").is_none());
        assert!(value.get("hiringLead").is_none());
        assert!(value.get("applicants").is_none());
        assert!(value["location"].get("address").is_none());
    }

    #[test]
    fn test_posted_at_formats() {
        let mut job = JobRecord {
            id: 1,
            title: "t".into(),
            posted_date: "2024-06-01".into(),
            location: JobLocation::default(),
            department: "Ops".into(),
            posting_url: "u".into(),
            status: None,
            hiring_lead: None,
            applicants: None,
        };
        let midnight = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(job.posted_at(), Some(midnight));

        job.posted_date = "2024-06-01T00:00:00Z".into();
        assert_eq!(job.posted_at(), Some(midnight));

        job.posted_date = "not a date".into();
        assert_eq!(job.posted_at(), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let job = JobRecord {
            id: 1,
            title: "Pilot".into(),
            posted_date: "2024-06-01".into(),
            location: JobLocation {
                label: "Remote".into(),
                city: None,
                state: None,
                address: None,
            },
            department: "Flight".into(),
            posting_url: "https://example.com/1".into(),
            status: None,
            hiring_lead: None,
            applicants: None,
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["postedDate"], "2024-06-01");
        assert_eq!(value["postingUrl"], "https://example.com/1");
        assert!(value["location"].get("city").is_none());
    }
}
