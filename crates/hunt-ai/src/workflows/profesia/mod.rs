mod mapping;
mod normalizer;
mod parser;

use crate::workflows::matching::JobPosting;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ProfesiaImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ProfesiaImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfesiaImportError::Io(err) => write!(f, "failed to read listings export: {}", err),
            ProfesiaImportError::Csv(err) => write!(f, "invalid listings CSV data: {}", err),
        }
    }
}

impl std::error::Error for ProfesiaImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfesiaImportError::Io(err) => Some(err),
            ProfesiaImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProfesiaImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProfesiaImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A row that could not be turned into a posting, with its CSV line number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportIssue {
    pub row: u64,
    pub reason: String,
}

/// Outcome of one export import: usable postings plus what was left behind.
#[derive(Debug, Serialize)]
pub struct ProfesiaImportReport {
    pub postings: Vec<JobPosting>,
    pub issues: Vec<ImportIssue>,
    pub duplicates: usize,
}

impl ProfesiaImportReport {
    pub fn imported(&self) -> usize {
        self.postings.len()
    }

    pub fn skipped(&self) -> usize {
        self.issues.len() + self.duplicates
    }
}

pub struct ProfesiaExportImporter;

impl ProfesiaExportImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ProfesiaImportReport, ProfesiaImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ProfesiaImportReport, ProfesiaImportError> {
        let parsed = parser::parse_rows(reader)?;
        let mut issues: Vec<ImportIssue> = parsed
            .issues
            .into_iter()
            .map(|(row, reason)| ImportIssue { row, reason })
            .collect();
        let mut postings = Vec::new();
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut duplicates = 0usize;

        for (row, record) in parsed.records {
            if record.title.is_empty() {
                issues.push(ImportIssue {
                    row,
                    reason: "missing job title".to_string(),
                });
                continue;
            }
            if record.url.is_empty() {
                issues.push(ImportIssue {
                    row,
                    reason: "missing listing url".to_string(),
                });
                continue;
            }
            if !seen_urls.insert(record.url.clone()) {
                duplicates += 1;
                continue;
            }

            postings.push(JobPosting {
                title: record.title,
                company: record.company,
                location: record.location,
                description: record.description,
                requirements: record.requirements,
                salary_range: record.salary_range,
                url: record.url,
                source: mapping::canonical_source(record.source.as_deref().unwrap_or("")),
                scraped_at: record.scraped_at,
            });
        }

        issues.sort_by_key(|issue| issue.row);

        Ok(ProfesiaImportReport {
            postings,
            issues,
            duplicates,
        })
    }
}
