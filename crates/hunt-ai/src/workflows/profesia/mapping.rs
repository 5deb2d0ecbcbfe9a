use super::normalizer::normalize_text;
use std::collections::HashMap;
use std::sync::OnceLock;

static SOURCE_ALIASES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Collapse portal-name spellings to one canonical source label.
///
/// Blank sources default to profesia.sk, the portal the export tooling
/// scrapes. Unrecognized labels pass through with whitespace normalized.
pub(crate) fn canonical_source(value: &str) -> String {
    let cleaned = normalize_text(value);
    if cleaned.is_empty() {
        return "profesia.sk".to_string();
    }
    match source_alias_map().get(cleaned.to_lowercase().as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => cleaned,
    }
}

fn source_alias_map() -> &'static HashMap<&'static str, &'static str> {
    SOURCE_ALIASES.get_or_init(|| {
        const ALIASES: &[(&str, &str)] = &[
            ("profesia", "profesia.sk"),
            ("profesia.sk", "profesia.sk"),
            ("www.profesia.sk", "profesia.sk"),
            ("kariera", "kariera.sk"),
            ("kariera.sk", "kariera.sk"),
            ("kariera.zoznam.sk", "kariera.sk"),
            ("linkedin", "linkedin"),
            ("linkedin.com", "linkedin"),
            ("www.linkedin.com", "linkedin"),
        ];

        ALIASES.iter().copied().collect()
    })
}

#[cfg(test)]
pub(crate) fn canonical_source_for_tests(value: &str) -> String {
    canonical_source(value)
}
