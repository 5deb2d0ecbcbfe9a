use serde::{Deserialize, Serialize};

/// Structured result of a free-text match or critique response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Match score in `[0.0, 1.0]`, defaulting to 0.0 when absent.
    pub score: f64,
    /// Approval verdict, present only when the text carried one.
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
}

#[derive(Clone, Copy)]
enum ListSection {
    Reasons,
    MissingSkills,
    Feedback,
    RedFlags,
    Strengths,
}

/// Parse a protocol response into a record.
///
/// The format is line oriented: scalar labels (`APPROVED:`, `SCORE:`,
/// `REJECTION_REASON:`) carry their value on the same line, list labels
/// (`REASONS:`, `MISSING_SKILLS:`, `FEEDBACK:`, `RED_FLAGS:`, `STRENGTHS:`)
/// open a section whose items follow as `- ` bullets. The parser is total:
/// unknown lines are ignored, malformed values fall back to defaults, and
/// arbitrary input never fails to produce a record.
pub fn parse_assessment(text: &str) -> AssessmentRecord {
    let mut record = AssessmentRecord::default();
    let mut section: Option<ListSection> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if let Some(value) = line.strip_prefix("APPROVED:") {
            record.approved = Some(parse_approval(value));
        } else if line.starts_with("SCORE:") {
            record.score = extract_score(line);
        } else if let Some(value) = line.strip_prefix("REJECTION_REASON:") {
            let reason = value.trim();
            if !reason.is_empty() {
                record.rejection_reason = Some(reason.to_string());
            }
        } else if line.starts_with("REASONS:") {
            section = Some(ListSection::Reasons);
        } else if line.starts_with("MISSING_SKILLS:") {
            section = Some(ListSection::MissingSkills);
        } else if line.starts_with("FEEDBACK:") {
            section = Some(ListSection::Feedback);
        } else if line.starts_with("RED_FLAGS:") {
            section = Some(ListSection::RedFlags);
        } else if line.starts_with("STRENGTHS:") {
            section = Some(ListSection::Strengths);
        } else if let Some(item) = line.strip_prefix("- ") {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            match section {
                Some(ListSection::Reasons) => record.reasons.push(item.to_string()),
                Some(ListSection::MissingSkills) => record.missing_skills.push(item.to_string()),
                Some(ListSection::Feedback) => record.feedback.push(item.to_string()),
                Some(ListSection::RedFlags) => record.red_flags.push(item.to_string()),
                Some(ListSection::Strengths) => record.strengths.push(item.to_string()),
                None => {}
            }
        }
    }

    record
}

fn parse_approval(value: &str) -> bool {
    matches!(value.trim().to_uppercase().as_str(), "YES" | "TRUE" | "APPROVE")
}

/// First decimal fraction in the text.
///
/// Accepts `.N`, `0.N`, and the literal `1.0`; integer parts other than a
/// single leading zero are dropped, so noisy lines like "SCORE: 2.5" yield
/// the fractional token `.5`.
fn extract_score(text: &str) -> f64 {
    for (index, _) in text.char_indices() {
        if let Some(token) = decimal_token(&text[index..]) {
            if let Ok(score) = token.parse::<f64>() {
                return score;
            }
        }
    }
    0.0
}

fn decimal_token(rest: &str) -> Option<&str> {
    if let Some(after_zero) = rest.strip_prefix('0') {
        if let Some(len) = fraction_len(after_zero) {
            return Some(&rest[..1 + len]);
        }
    }
    if let Some(len) = fraction_len(rest) {
        return Some(&rest[..len]);
    }
    if rest.starts_with("1.0") {
        return Some(&rest[..3]);
    }
    None
}

fn fraction_len(text: &str) -> Option<usize> {
    let digits = text.strip_prefix('.')?;
    let count = digits.chars().take_while(|ch| ch.is_ascii_digit()).count();
    if count == 0 {
        None
    } else {
        Some(1 + count)
    }
}

#[cfg(test)]
pub(crate) fn extract_score_for_tests(text: &str) -> f64 {
    extract_score(text)
}
