use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::matching::domain::JobPosting;

use super::domain::MarketDistribution;

/// Percentile rows per role and location: average, min, max, p25, p50, p75.
const GLASSDOOR_ROWS: &[(&str, &str, [f64; 6])] = &[
    ("python developer", "bratislava", [3200.0, 2400.0, 4800.0, 2800.0, 3200.0, 3800.0]),
    ("python developer", "kosice", [2600.0, 2000.0, 3800.0, 2300.0, 2600.0, 3100.0]),
    ("python developer", "remote", [3500.0, 2600.0, 5200.0, 3000.0, 3500.0, 4200.0]),
    ("backend developer", "bratislava", [3400.0, 2600.0, 5000.0, 2900.0, 3400.0, 4000.0]),
    ("backend developer", "kosice", [2800.0, 2200.0, 4000.0, 2500.0, 2800.0, 3300.0]),
    ("backend developer", "remote", [3700.0, 2800.0, 5400.0, 3200.0, 3700.0, 4400.0]),
    ("fullstack developer", "bratislava", [3300.0, 2500.0, 4900.0, 2850.0, 3300.0, 3900.0]),
    ("fullstack developer", "remote", [3600.0, 2700.0, 5300.0, 3100.0, 3600.0, 4300.0]),
    ("senior python developer", "bratislava", [4200.0, 3400.0, 6000.0, 3700.0, 4200.0, 5000.0]),
    ("senior python developer", "remote", [4800.0, 3800.0, 6800.0, 4200.0, 4800.0, 5600.0]),
    ("devops engineer", "bratislava", [3800.0, 3000.0, 5500.0, 3300.0, 3800.0, 4500.0]),
    ("devops engineer", "remote", [4200.0, 3300.0, 6000.0, 3700.0, 4200.0, 5000.0]),
];

/// Role-keyword estimates, highest matching keyword wins over the base.
const PROFESIA_BASE_SALARY: f64 = 2800.0;
const PROFESIA_KEYWORD_SALARIES: &[(&str, f64)] = &[
    ("python", 3100.0),
    ("backend", 3300.0),
    ("fullstack", 3200.0),
    ("frontend", 2900.0),
    ("devops", 3700.0),
    ("senior", 4500.0),
];

/// Regional pay factors; first substring match in listed order wins.
const LOCATION_MULTIPLIERS: &[(&str, f64)] = &[
    ("bratislava", 1.0),
    ("košice", 0.85),
    ("žilina", 0.80),
    ("banská bystrica", 0.78),
    ("prešov", 0.80),
    ("nitra", 0.82),
    ("remote", 1.1),
    ("eu remote", 1.3),
];

/// One source's contribution for a role/location query.
#[derive(Debug, Default, Clone, PartialEq)]
struct SourceFragment {
    average_salary: Option<f64>,
    min_salary: Option<f64>,
    max_salary: Option<f64>,
    percentile_25: Option<f64>,
    percentile_50: Option<f64>,
    percentile_75: Option<f64>,
    data_points: u32,
}

fn glassdoor_lookup(title_key: &str, location_key: &str) -> Option<SourceFragment> {
    for (role, location, values) in GLASSDOOR_ROWS {
        let role_matches = title_key.contains(role) || role.contains(title_key);
        if role_matches && *location == location_key {
            let [average, min, max, p25, p50, p75] = *values;
            return Some(SourceFragment {
                average_salary: Some(average),
                min_salary: Some(min),
                max_salary: Some(max),
                percentile_25: Some(p25),
                percentile_50: Some(p50),
                percentile_75: Some(p75),
                data_points: 100,
            });
        }
    }
    None
}

fn profesia_estimate(title_key: &str) -> SourceFragment {
    let mut estimate = PROFESIA_BASE_SALARY;
    for (keyword, salary) in PROFESIA_KEYWORD_SALARIES {
        if title_key.contains(keyword) {
            estimate = estimate.max(*salary);
        }
    }
    SourceFragment {
        average_salary: Some(estimate),
        ..SourceFragment::default()
    }
}

fn platy_estimate(title_key: &str) -> Option<SourceFragment> {
    let average = if title_key.contains("python") {
        3000.0
    } else if title_key.contains("senior") {
        4300.0
    } else {
        return None;
    };
    Some(SourceFragment {
        average_salary: Some(average),
        ..SourceFragment::default()
    })
}

/// Distribution derived from the posting's own salary text.
///
/// The first two digit runs are read as min and max; the midpoint stands in
/// for both the average and the median.
fn posting_salary_fragment(posting: &JobPosting) -> Option<SourceFragment> {
    let text = posting.salary_range.as_deref()?;
    let numbers = digit_runs(text);
    if numbers.len() < 2 {
        return None;
    }
    let min = numbers[0];
    let max = numbers[1];
    let midpoint = (min + max) / 2.0;
    Some(SourceFragment {
        average_salary: Some(midpoint),
        min_salary: Some(min),
        max_salary: Some(max),
        percentile_50: Some(midpoint),
        ..SourceFragment::default()
    })
}

fn digit_runs(text: &str) -> Vec<f64> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs.iter().filter_map(|run| run.parse::<f64>().ok()).collect()
}

fn location_multiplier(location_key: &str) -> f64 {
    for (keyword, multiplier) in LOCATION_MULTIPLIERS {
        if location_key.contains(keyword) {
            return *multiplier;
        }
    }
    1.0
}

/// Merge a source fragment into the running distribution.
///
/// Averages from multiple sources are combined pairwise; every other field
/// keeps its first contributor's value. Percentiles therefore always come
/// from a single source and stay mutually consistent.
fn absorb(distribution: &mut MarketDistribution, fragment: SourceFragment, source: &str) {
    distribution.average_salary = match (distribution.average_salary, fragment.average_salary) {
        (Some(existing), Some(new)) => Some((existing + new) / 2.0),
        (None, Some(new)) => Some(new),
        (existing, None) => existing,
    };

    if distribution.min_salary.is_none() {
        distribution.min_salary = fragment.min_salary;
    }
    if distribution.max_salary.is_none() {
        distribution.max_salary = fragment.max_salary;
    }
    if distribution.percentile_25.is_none() {
        distribution.percentile_25 = fragment.percentile_25;
    }
    if distribution.percentile_50.is_none() {
        distribution.percentile_50 = fragment.percentile_50;
    }
    if distribution.percentile_75.is_none() {
        distribution.percentile_75 = fragment.percentile_75;
    }
    if distribution.data_points == 0 {
        distribution.data_points = fragment.data_points;
    }

    distribution.sources.push(source.to_string());
}

/// Scale the headline figures by the regional factor, truncating to whole
/// euros. Percentiles are left untouched.
fn apply_location_factors(distribution: &mut MarketDistribution, location_key: &str) {
    let multiplier = location_multiplier(location_key);

    if let Some(average) = distribution.average_salary {
        distribution.average_salary = Some((average * multiplier).trunc());
    }
    if let Some(min) = distribution.min_salary {
        distribution.min_salary = Some((min * multiplier).trunc());
    }
    if let Some(max) = distribution.max_salary {
        distribution.max_salary = Some((max * multiplier).trunc());
    }
}

/// Shared read-through cache for market estimates.
///
/// Loss or eviction is always safe; estimates are recomputed from the
/// built-in tables on the next miss.
#[derive(Default)]
pub struct MarketCache {
    entries: Mutex<HashMap<(String, String), MarketDistribution>>,
}

impl MarketCache {
    pub fn get(&self, title_key: &str, location_key: &str) -> Option<MarketDistribution> {
        let entries = self.entries.lock().expect("market cache mutex poisoned");
        entries
            .get(&(title_key.to_string(), location_key.to_string()))
            .cloned()
    }

    pub fn put(&self, title_key: &str, location_key: &str, distribution: MarketDistribution) {
        let mut entries = self.entries.lock().expect("market cache mutex poisoned");
        entries.insert(
            (title_key.to_string(), location_key.to_string()),
            distribution,
        );
    }

    pub fn evict_all(&self) {
        let mut entries = self.entries.lock().expect("market cache mutex poisoned");
        entries.clear();
    }
}

/// Salary-market estimator fusing the built-in Slovak sources.
pub struct MarketDataEngine {
    cache: Option<Arc<MarketCache>>,
}

impl MarketDataEngine {
    pub fn new() -> Self {
        Self { cache: None }
    }

    pub fn with_cache(cache: Arc<MarketCache>) -> Self {
        Self { cache: Some(cache) }
    }

    /// Estimate the market distribution for a posting's title and location.
    ///
    /// Sources are consulted in a fixed order: the percentile table first,
    /// then the keyword estimators. The posting's own salary text is used
    /// only when no source produced an average.
    pub fn estimate(&self, posting: &JobPosting) -> MarketDistribution {
        let title_key = posting.title.trim().to_lowercase();
        let location_key = posting.location.trim().to_lowercase();

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&title_key, &location_key) {
                return hit;
            }
        }

        let mut distribution = MarketDistribution::default();

        if let Some(fragment) = glassdoor_lookup(&title_key, &location_key) {
            absorb(&mut distribution, fragment, "Glassdoor SK");
        }

        absorb(&mut distribution, profesia_estimate(&title_key), "Profesia SK");

        if let Some(fragment) = platy_estimate(&title_key) {
            absorb(&mut distribution, fragment, "Platy.sk");
        }

        if distribution.average_salary.is_none() {
            if let Some(fragment) = posting_salary_fragment(posting) {
                absorb(&mut distribution, fragment, "Job Posting");
            }
        }

        apply_location_factors(&mut distribution, &location_key);

        if let Some(cache) = &self.cache {
            cache.put(&title_key, &location_key, distribution.clone());
        }

        distribution
    }
}

impl Default for MarketDataEngine {
    fn default() -> Self {
        Self::new()
    }
}
