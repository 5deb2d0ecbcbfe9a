use crate::workflows::matching::assessment::{
    extract_score_for_tests, parse_assessment, AssessmentRecord,
};

#[test]
fn parses_scalar_fields_and_sections() {
    let response = "\
APPROVED: YES
SCORE: 0.85
REJECTION_REASON:
FEEDBACK:
- Job passes basic validation criteria
RED_FLAGS:
- Found potential red flag: 'no salary'
STRENGTHS:
- Strong match score
- No obvious red flags detected
";

    let record = parse_assessment(response);

    assert_eq!(record.approved, Some(true));
    assert_eq!(record.score, 0.85);
    assert_eq!(record.rejection_reason, None);
    assert_eq!(record.feedback, vec!["Job passes basic validation criteria"]);
    assert_eq!(record.red_flags, vec!["Found potential red flag: 'no salary'"]);
    assert_eq!(
        record.strengths,
        vec!["Strong match score", "No obvious red flags detected"]
    );
}

#[test]
fn match_responses_keep_reasons_and_missing_skills() {
    let response = "\
SCORE: 0.78
REASONS:
- Matches 2/2 required skills
- Location matches preferences
MISSING_SKILLS:
- Kubernetes
";

    let record = parse_assessment(response);

    assert_eq!(record.score, 0.78);
    assert_eq!(record.approved, None);
    assert_eq!(
        record.reasons,
        vec!["Matches 2/2 required skills", "Location matches preferences"]
    );
    assert_eq!(record.missing_skills, vec!["Kubernetes"]);
}

#[test]
fn score_extraction_takes_first_decimal() {
    assert_eq!(extract_score_for_tests("SCORE: 0.85"), 0.85);
    assert_eq!(extract_score_for_tests("SCORE: around 0.7, maybe 0.9"), 0.7);
    assert_eq!(extract_score_for_tests("SCORE: 1.0"), 1.0);
    assert_eq!(extract_score_for_tests("SCORE: .65"), 0.65);
    assert_eq!(extract_score_for_tests("SCORE: none given"), 0.0);
}

#[test]
fn score_extraction_drops_integer_parts() {
    // "2.5" carries no valid fraction prefix, so only ".5" is read.
    assert_eq!(extract_score_for_tests("SCORE: 2.5"), 0.5);
    assert_eq!(extract_score_for_tests("SCORE: 1.05"), 1.0);
}

#[test]
fn score_extraction_survives_accented_text() {
    assert_eq!(extract_score_for_tests("SCORE: výborné, I'd say 0.9"), 0.9);
}

#[test]
fn approval_vocabulary_is_small() {
    for value in ["YES", "yes", "TRUE", "APPROVE", " approve "] {
        let record = parse_assessment(&format!("APPROVED: {value}"));
        assert_eq!(record.approved, Some(true), "value {value:?}");
    }
    for value in ["NO", "REJECT", "definitely", ""] {
        let record = parse_assessment(&format!("APPROVED: {value}"));
        assert_eq!(record.approved, Some(false), "value {value:?}");
    }
}

#[test]
fn scalar_lines_do_not_close_sections() {
    let response = "\
FEEDBACK:
- first note
SCORE: 0.4
- second note
";

    let record = parse_assessment(response);

    assert_eq!(record.feedback, vec!["first note", "second note"]);
    assert_eq!(record.score, 0.4);
}

#[test]
fn bullets_before_any_section_are_dropped() {
    let record = parse_assessment("- stray item\nREASONS:\n- kept item");

    assert_eq!(record.reasons, vec!["kept item"]);
    assert!(record.feedback.is_empty());
}

#[test]
fn bare_dashes_are_ignored() {
    let record = parse_assessment("REASONS:\n- \n- real reason");

    assert_eq!(record.reasons, vec!["real reason"]);
}

#[test]
fn rejection_reason_requires_text() {
    let record = parse_assessment("REJECTION_REASON: Salary too low");
    assert_eq!(record.rejection_reason.as_deref(), Some("Salary too low"));

    let record = parse_assessment("REJECTION_REASON:");
    assert_eq!(record.rejection_reason, None);
}

#[test]
fn arbitrary_prose_yields_default_record() {
    let record = parse_assessment("I could not evaluate this posting, sorry.");
    assert_eq!(record, AssessmentRecord::default());

    let record = parse_assessment("");
    assert_eq!(record, AssessmentRecord::default());
}
