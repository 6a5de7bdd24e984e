//! Result data shapes

use serde::{Deserialize, Serialize};

use crate::utils::MAX_RESULTS;

/// A single scraped search result.
///
/// Construction goes through [`ResultRecord::new`], which refuses empty
/// fields; a record with a blank title, URL or snippet cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct ResultRecord {
    pub(crate) title: String,
    /// Absolute URL.
    pub(crate) url: String,
    pub(crate) snippet: String,
}

impl ResultRecord {
    /// Build a record if every field is non-empty after trimming.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Option<Self> {
        let title = title.into().trim().to_string();
        let url = url.into().trim().to_string();
        let snippet = snippet.into().trim().to_string();

        if title.is_empty() || url.is_empty() || snippet.is_empty() {
            return None;
        }

        Some(Self {
            title,
            url,
            snippet,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

#[derive(Deserialize)]
struct RecordFields {
    title: String,
    url: String,
    snippet: String,
}

impl TryFrom<RecordFields> for ResultRecord {
    type Error = &'static str;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        Self::new(fields.title, fields.url, fields.snippet)
            .ok_or("result records require a non-empty title, url and snippet")
    }
}

/// Ordered result records, never longer than its cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<ResultRecord>,
}

impl ResultSet {
    /// Keep the first `MAX_RESULTS` records, in order.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = ResultRecord>) -> Self {
        Self::with_limit(records, MAX_RESULTS)
    }

    /// Keep the first `min(limit, MAX_RESULTS)` records, in order.
    #[must_use]
    pub fn with_limit(records: impl IntoIterator<Item = ResultRecord>, limit: usize) -> Self {
        Self {
            records: records.into_iter().take(limit.min(MAX_RESULTS)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ResultRecord] {
        &self.records
    }
}

impl<'de> Deserialize<'de> for ResultSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<ResultRecord>::deserialize(deserializer)?;
        Ok(Self::from_records(records))
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultRecord;
    type IntoIter = std::vec::IntoIter<ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(i: usize) -> ResultRecord {
        ResultRecord::new(format!("t{i}"), format!("https://e.com/{i}"), format!("s{i}")).unwrap()
    }

    #[test]
    fn record_rejects_blank_fields() {
        assert!(ResultRecord::new("", "https://e.com", "s").is_none());
        assert!(ResultRecord::new("t", "  ", "s").is_none());
        assert!(ResultRecord::new("t", "https://e.com", "\n").is_none());
    }

    #[test]
    fn set_truncates_in_order() {
        let set = ResultSet::from_records((0..15).map(record));
        assert_eq!(set.len(), MAX_RESULTS);
        assert_eq!(set.as_slice()[0].title(), "t0");
        assert_eq!(set.as_slice()[9].title(), "t9");
    }

    #[test]
    fn limit_never_exceeds_cap() {
        assert_eq!(ResultSet::with_limit((0..15).map(record), 50).len(), MAX_RESULTS);
        assert_eq!(ResultSet::with_limit((0..15).map(record), 3).len(), 3);
    }

    #[test]
    fn deserializing_blank_record_fails() {
        let json = r#"{"title":"t","url":"https://e.com","snippet":""}"#;
        assert!(serde_json::from_str::<ResultRecord>(json).is_err());
    }

    #[test]
    fn deserialized_set_is_capped() {
        let json = serde_json::to_string(&(0..12).map(record).collect::<Vec<_>>()).unwrap();
        let set: ResultSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set.len(), MAX_RESULTS);
    }
}
