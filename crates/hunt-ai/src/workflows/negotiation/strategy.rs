use super::domain::{
    format_eur, CompanySize, MarketDistribution, MarketPosition, NegotiationRoom,
    NegotiationStrategy, OfferAnalysis, PercentileBand, TargetGap,
};

/// Position an offer within the market distribution.
///
/// Without both an offer and a market average the analysis stays at its
/// defaults. The percentile band is assigned only when the distribution
/// carries all three percentiles; the market position is always derived
/// from the percentage distance to the average.
pub(crate) fn analyze_offer(
    current_offer: Option<f64>,
    market: &MarketDistribution,
    user_target: Option<f64>,
) -> OfferAnalysis {
    let mut analysis = OfferAnalysis::default();

    let offer = match current_offer {
        Some(offer) => offer,
        None => return analysis,
    };
    let average = match market.average_salary {
        Some(average) => average,
        None => return analysis,
    };

    if let (Some(p25), Some(p50), Some(p75)) = (
        market.percentile_25,
        market.percentile_50,
        market.percentile_75,
    ) {
        if offer < p25 {
            analysis.percentile = Some(PercentileBand::BelowP25);
            analysis.offer_vs_market = MarketPosition::BelowMarket;
            analysis.negotiation_room = NegotiationRoom::High;
        } else if offer < p50 {
            analysis.percentile = Some(PercentileBand::P25ToP50);
            analysis.offer_vs_market = MarketPosition::Fair;
            analysis.negotiation_room = NegotiationRoom::Medium;
        } else if offer < p75 {
            analysis.percentile = Some(PercentileBand::P50ToP75);
            analysis.offer_vs_market = MarketPosition::Good;
            analysis.negotiation_room = NegotiationRoom::Medium;
        } else {
            analysis.percentile = Some(PercentileBand::AboveP75);
            analysis.offer_vs_market = MarketPosition::Excellent;
            analysis.negotiation_room = NegotiationRoom::Low;
        }
    }

    if let Some(target) = user_target {
        let amount = target - offer;
        analysis.gap_to_target = Some(TargetGap {
            amount,
            percent: amount / offer * 100.0,
        });
    }

    let diff_percent = (offer - average) / average * 100.0;
    analysis.market_position = if diff_percent < -10.0 {
        MarketPosition::BelowMarket
    } else if diff_percent < 5.0 {
        MarketPosition::Fair
    } else if diff_percent < 15.0 {
        MarketPosition::Good
    } else {
        MarketPosition::Excellent
    };

    analysis
}

/// Decision table turning the analysis into a counter-offer plan.
pub(crate) fn build_strategy(
    current_offer: Option<f64>,
    market: &MarketDistribution,
    analysis: &OfferAnalysis,
    user_target: Option<f64>,
    company_size: Option<CompanySize>,
) -> NegotiationStrategy {
    let mut strategy = NegotiationStrategy::default();

    // No offer yet: aim at the top quartile, or fixed figures when even the
    // market is silent.
    let offer = match current_offer {
        Some(offer) => offer,
        None => {
            let counter = if let Some(p75) = market.percentile_75 {
                strategy.min_acceptable = market.percentile_50;
                strategy.ideal_outcome = market.max_salary;
                p75
            } else {
                strategy.min_acceptable = Some(3500.0);
                user_target.unwrap_or(4000.0)
            };
            strategy.counter_offer = Some(counter);
            strategy.leverage_points = vec![
                format!("Market data shows role commands €{}", format_eur(counter)),
                "Your skills in Python, Django, REST APIs are in high demand".to_string(),
                "Remote work capabilities add value".to_string(),
            ];
            return strategy;
        }
    };

    let counter = match analysis.offer_vs_market {
        MarketPosition::BelowMarket | MarketPosition::Fair => {
            if let Some(average) = market.average_salary {
                strategy.leverage_points.push(format!(
                    "Current offer is below market average by {} EUR",
                    format_eur(average - offer)
                ));
            }
            market.percentile_75.unwrap_or(offer * 1.15)
        }
        MarketPosition::Good => {
            strategy.leverage_points.push(
                "Requesting slight adjustment to align with top market performers".to_string(),
            );
            offer * 1.08
        }
        MarketPosition::Excellent | MarketPosition::Unknown => {
            strategy.should_negotiate = false;
            strategy.alternative_benefits = vec![
                "Additional vacation days".to_string(),
                "Remote work flexibility".to_string(),
                "Professional development budget".to_string(),
                "Sign-on bonus".to_string(),
                "Stock options or equity".to_string(),
            ];
            offer
        }
    };

    strategy.counter_offer = Some(counter);
    strategy.min_acceptable = Some(offer * 1.05);
    strategy.ideal_outcome = Some(user_target.unwrap_or(counter));

    strategy.leverage_points.extend([
        format!("Market data from {}", market.sources.join(", ")),
        format!(
            "Average salary for this role: €{}",
            format_eur(market.average_salary.unwrap_or(0.0))
        ),
        "Proven track record in similar positions".to_string(),
        "Immediate availability and no notice period".to_string(),
    ]);

    if analysis.negotiation_room == NegotiationRoom::Low {
        strategy
            .risks
            .push("Offer already at top of market range".to_string());
    }

    if matches!(company_size, Some(CompanySize::Startup)) {
        strategy
            .risks
            .push("Startup may have limited salary flexibility".to_string());
        strategy
            .alternative_benefits
            .push("Equity compensation".to_string());
    }

    strategy
}
