use super::normalizer::{normalize_text, tidy_salary};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ProfesiaRecord {
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) location: String,
    pub(crate) description: String,
    pub(crate) requirements: String,
    pub(crate) salary_range: Option<String>,
    pub(crate) url: String,
    pub(crate) source: Option<String>,
    pub(crate) scraped_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub(crate) struct ParsedRows {
    pub(crate) records: Vec<(u64, ProfesiaRecord)>,
    pub(crate) issues: Vec<(u64, String)>,
}

/// Read every row, keeping malformed ones as per-row issues instead of
/// failing the whole export. Only transport errors abort.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<ParsedRows, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    let mut issues = Vec::new();

    for (index, row) in csv_reader.deserialize::<ProfesiaRow>().enumerate() {
        // The header occupies line 1, so the first data row reads as line 2.
        let line = index as u64 + 2;
        match row {
            Ok(row) => records.push((line, ProfesiaRecord::from(row))),
            Err(err) if err.is_io_error() => return Err(err),
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(line);
                issues.push((line, format!("unreadable row: {err}")));
            }
        }
    }

    Ok(ParsedRows { records, issues })
}

#[derive(Debug, Deserialize)]
struct ProfesiaRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Company", default)]
    company: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Requirements", default)]
    requirements: String,
    #[serde(rename = "Salary", default, deserialize_with = "empty_string_as_none")]
    salary: Option<String>,
    #[serde(rename = "URL", default)]
    url: String,
    #[serde(rename = "Source", default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(
        rename = "Scraped At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    scraped_at: Option<String>,
}

impl From<ProfesiaRow> for ProfesiaRecord {
    fn from(row: ProfesiaRow) -> Self {
        Self {
            title: normalize_text(&row.title),
            company: normalize_text(&row.company),
            location: normalize_text(&row.location),
            description: normalize_text(&row.description),
            requirements: normalize_text(&row.requirements),
            salary_range: row.salary.as_deref().and_then(tidy_salary),
            url: row.url.trim().to_string(),
            source: row.source,
            scraped_at: row.scraped_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}
