//! Deterministic scoring and critique used when no assessor is available.

use super::assessment::AssessmentRecord;
use super::domain::{CandidateProfile, JobPosting};

/// Phrases in a posting description that warrant a closer look.
const RED_FLAG_PHRASES: [&str; 4] = ["unpaid", "no salary", "commission only", "must have car"];

/// Weighted keyword score for a posting.
///
/// Weights: 0.25 title, 0.10 location, 0.40 spread across required skills,
/// 0.20 across preferred skills. Comparisons are lowercase substring checks
/// against the combined title, description, and requirements text.
pub(crate) fn score_posting(posting: &JobPosting, profile: &CandidateProfile) -> AssessmentRecord {
    let preferences = &profile.preferences;
    let mut score = 0.0;
    let mut reasons = Vec::new();
    let mut missing_skills = Vec::new();

    let job_text = format!(
        "{} {} {}",
        posting.title, posting.description, posting.requirements
    )
    .to_lowercase();
    let title = posting.title.to_lowercase();
    let location = posting.location.to_lowercase();

    if preferences
        .job_titles
        .iter()
        .any(|wanted| title.contains(&wanted.to_lowercase()))
    {
        score += 0.25;
        reasons.push("Job title matches preferences".to_string());
    }

    if preferences
        .locations
        .iter()
        .any(|wanted| location.contains(&wanted.to_lowercase()))
    {
        score += 0.1;
        reasons.push("Location matches preferences".to_string());
    }

    if !preferences.required_skills.is_empty() {
        let matched = preferences
            .required_skills
            .iter()
            .filter(|skill| job_text.contains(&skill.to_lowercase()))
            .count();
        let fraction = matched as f64 / preferences.required_skills.len() as f64;
        score += fraction * 0.4;
        if fraction > 0.0 {
            reasons.push(format!(
                "Matches {matched}/{} required skills",
                preferences.required_skills.len()
            ));
        }
        missing_skills = preferences
            .required_skills
            .iter()
            .filter(|skill| !job_text.contains(&skill.to_lowercase()))
            .cloned()
            .collect();
    }

    if !preferences.preferred_skills.is_empty() {
        let matched = preferences
            .preferred_skills
            .iter()
            .filter(|skill| job_text.contains(&skill.to_lowercase()))
            .count();
        let fraction = matched as f64 / preferences.preferred_skills.len() as f64;
        score += fraction * 0.2;
        if fraction > 0.0 {
            reasons.push(format!(
                "Matches {matched}/{} preferred skills",
                preferences.preferred_skills.len()
            ));
        }
    }

    let wants_salary = preferences.min_salary.is_some_and(|min| min > 0.0);
    let has_salary = posting
        .salary_range
        .as_deref()
        .is_some_and(|salary| !salary.is_empty());
    if wants_salary && has_salary {
        reasons.push("Salary information available".to_string());
    }

    if reasons.is_empty() {
        reasons.push("No strong matches found".to_string());
    }

    AssessmentRecord {
        score: round2(score),
        reasons,
        missing_skills,
        ..AssessmentRecord::default()
    }
}

/// Rule-based critique of a scored posting.
///
/// Scores under 0.5 are rejected outright. More than three missing required
/// skills rejects in strict mode and raises a red flag otherwise; the flag
/// names the first three. The verdict is always present in the result.
pub(crate) fn critique_posting(
    posting: &JobPosting,
    assessment: &AssessmentRecord,
    strict: bool,
) -> AssessmentRecord {
    let mut approved = true;
    let mut rejection_reason = None;
    let mut red_flags = Vec::new();
    let mut strengths = Vec::new();

    if assessment.score < 0.5 {
        approved = false;
        rejection_reason = Some("Match score too low".to_string());
    }

    let missing = &assessment.missing_skills;
    if missing.len() > 3 {
        if strict {
            approved = false;
            rejection_reason = Some("Too many missing required skills".to_string());
        } else {
            red_flags.push(format!(
                "Missing {} skills: {}",
                missing.len(),
                missing[..3].join(", ")
            ));
        }
    }

    let description = posting.description.to_lowercase();
    for phrase in RED_FLAG_PHRASES {
        if description.contains(phrase) {
            red_flags.push(format!("Found potential red flag: '{phrase}'"));
        }
    }

    if assessment.score >= 0.8 {
        strengths.push("Strong match score".to_string());
    }
    if missing.is_empty() {
        strengths.push("All required skills matched".to_string());
    }
    if red_flags.is_empty() {
        strengths.push("No obvious red flags detected".to_string());
    }

    let feedback = if approved {
        vec!["Job passes basic validation criteria".to_string()]
    } else {
        vec![rejection_reason.clone().unwrap_or_default()]
    };

    AssessmentRecord {
        score: assessment.score,
        approved: Some(approved),
        rejection_reason,
        feedback,
        red_flags,
        strengths,
        ..AssessmentRecord::default()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
