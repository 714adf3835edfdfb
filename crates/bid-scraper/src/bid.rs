use serde::{Deserialize, Serialize};

pub const UNKNOWN_FILENAME: &str = "unknown_file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidItem {
    pub title: String,
    pub signal_source_unique_id: String,
    /// Never published by this source
    pub due_date: Option<String>,
    pub details_url_for_item: Option<String>,
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_filename: Option<String>,
}

impl Attachment {
    /// Names the attachment after the last segment of its URL.
    pub fn from_url(url: &str) -> Self {
        let filename = url
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(UNKNOWN_FILENAME)
            .to_string();

        Self {
            suggested_filename: Some(filename.clone()),
            filename,
            key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_last_url_segment() {
        let att = Attachment::from_url("https://etowahcounty.org/docs/Addendum-1.pdf");
        assert_eq!(att.filename, "Addendum-1.pdf");
        assert_eq!(att.suggested_filename.as_deref(), Some("Addendum-1.pdf"));
        assert_eq!(att.key, None);
    }

    #[test]
    fn filename_keeps_query_string() {
        let att = Attachment::from_url("/wp-content/uploads/specs.pdf?ver=2");
        assert_eq!(att.filename, "specs.pdf?ver=2");
    }

    #[test]
    fn trailing_slash_falls_back_to_unknown() {
        let att = Attachment::from_url("https://etowahcounty.org/docs/");
        assert_eq!(att.filename, UNKNOWN_FILENAME);
        assert_eq!(att.suggested_filename.as_deref(), Some(UNKNOWN_FILENAME));
    }

    #[test]
    fn bare_name_is_its_own_filename() {
        assert_eq!(Attachment::from_url("notice.docx").filename, "notice.docx");
    }

    #[test]
    fn serializes_null_due_date_and_skips_absent_optionals() {
        let bid = BidItem {
            title: "BID NO FY 2025-11 Road Salt".into(),
            signal_source_unique_id: "FY 2025-11".into(),
            due_date: None,
            details_url_for_item: None,
            attachments: vec![Attachment::from_url("/docs/a.pdf")],
            source_url: None,
        };
        let json = serde_json::to_value(&bid).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "BID NO FY 2025-11 Road Salt",
                "signal_source_unique_id": "FY 2025-11",
                "due_date": null,
                "details_url_for_item": null,
                "attachments": [{"filename": "a.pdf", "suggested_filename": "a.pdf"}],
            })
        );
    }
}
