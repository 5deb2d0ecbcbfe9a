pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Exports write salary as free text; placeholder values mean "not stated".
pub(crate) fn tidy_salary(value: &str) -> Option<String> {
    let cleaned = normalize_text(value);
    if cleaned.is_empty() {
        return None;
    }
    let lowered = cleaned.to_lowercase();
    if matches!(lowered.as_str(), "n/a" | "dohodou" | "by agreement" | "-") {
        return None;
    }
    Some(cleaned.replace(" - ", "-"))
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_text(value)
}

#[cfg(test)]
pub(crate) fn tidy_salary_for_tests(value: &str) -> Option<String> {
    tidy_salary(value)
}
