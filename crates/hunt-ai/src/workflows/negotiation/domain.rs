use serde::{Deserialize, Serialize};

use crate::workflows::matching::domain::JobPosting;

/// Fused salary distribution for a role and location, in EUR per month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketDistribution {
    pub average_salary: Option<f64>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub percentile_25: Option<f64>,
    pub percentile_50: Option<f64>,
    pub percentile_75: Option<f64>,
    pub data_points: u32,
    pub sources: Vec<String>,
}

/// Relative position of an offer against the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    Unknown,
    BelowMarket,
    Fair,
    Good,
    Excellent,
}

/// How much room the data suggests for negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationRoom {
    High,
    Medium,
    Low,
}

/// Percentile band an offer falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentileBand {
    #[serde(rename = "<25th")]
    BelowP25,
    #[serde(rename = "25-50th")]
    P25ToP50,
    #[serde(rename = "50-75th")]
    P50ToP75,
    #[serde(rename = ">75th")]
    AboveP75,
}

/// Gap between the user's target salary and the current offer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetGap {
    pub amount: f64,
    pub percent: f64,
}

/// Offer-versus-market analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferAnalysis {
    pub offer_vs_market: MarketPosition,
    pub percentile: Option<PercentileBand>,
    pub gap_to_target: Option<TargetGap>,
    pub negotiation_room: NegotiationRoom,
    pub market_position: MarketPosition,
}

impl Default for OfferAnalysis {
    fn default() -> Self {
        Self {
            offer_vs_market: MarketPosition::Unknown,
            percentile: None,
            gap_to_target: None,
            negotiation_room: NegotiationRoom::Medium,
            market_position: MarketPosition::Fair,
        }
    }
}

/// Counter-offer plan produced by the decision table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationStrategy {
    pub should_negotiate: bool,
    pub counter_offer: Option<f64>,
    pub min_acceptable: Option<f64>,
    pub ideal_outcome: Option<f64>,
    pub leverage_points: Vec<String>,
    pub risks: Vec<String>,
    pub alternative_benefits: Vec<String>,
}

impl Default for NegotiationStrategy {
    fn default() -> Self {
        Self {
            should_negotiate: true,
            counter_offer: None,
            min_acceptable: None,
            ideal_outcome: None,
            leverage_points: Vec::new(),
            risks: Vec::new(),
            alternative_benefits: Vec::new(),
        }
    }
}

/// Candidate move within a simulated round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    Counter,
    Evaluate,
    Accept,
}

/// One employer-offer step in a simulated exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationRound {
    pub round: u32,
    pub employer_offer: f64,
    pub your_response: ResponseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_counter: Option<f64>,
    pub analysis: String,
}

/// Company-size hint used to shape risk guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Scaleup,
    Enterprise,
}

/// Inputs for building a negotiation plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationRequest {
    pub posting: JobPosting,
    pub current_offer: Option<f64>,
    pub target_salary: Option<f64>,
    pub company_size: Option<CompanySize>,
}

/// Conversation scripts rendered from a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationScripts {
    pub email: String,
    pub phone: String,
    pub counter_offer_letter: String,
}

/// Full negotiation bundle for one request.
#[derive(Debug, Clone, Serialize)]
pub struct NegotiationPlan {
    pub market_data: MarketDistribution,
    pub analysis: OfferAnalysis,
    pub strategy: NegotiationStrategy,
    pub scripts: NegotiationScripts,
    pub recommended_counter_offer: Option<f64>,
}

/// Format a euro amount with thousands separators, truncating cents.
pub(crate) fn format_eur(amount: f64) -> String {
    let whole = amount.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
