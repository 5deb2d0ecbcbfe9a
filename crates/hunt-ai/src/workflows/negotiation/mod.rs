//! Salary negotiation planning against Slovak market data.
//!
//! The planner fuses salary sources into a [`MarketDistribution`], positions
//! the current offer inside it, and renders ready-to-send scripts.

pub mod domain;
pub mod market;
pub mod router;
pub mod simulation;

mod scripts;
mod strategy;

use tracing::debug;

pub use domain::{
    CompanySize, MarketDistribution, MarketPosition, NegotiationPlan, NegotiationRequest,
    NegotiationRoom, NegotiationRound, NegotiationScripts, NegotiationStrategy, OfferAnalysis,
    PercentileBand, ResponseCategory, TargetGap,
};
pub use market::{MarketCache, MarketDataEngine};
pub use router::negotiation_router;
pub use simulation::simulate_negotiation;

/// Stateless facade assembling a [`NegotiationPlan`] from a request.
pub struct NegotiationPlanner {
    market: MarketDataEngine,
}

impl NegotiationPlanner {
    pub fn new(market: MarketDataEngine) -> Self {
        Self { market }
    }

    pub fn plan(&self, request: &NegotiationRequest) -> NegotiationPlan {
        debug!(job_title = %request.posting.title, "building negotiation plan");
        let market_data = self.market.estimate(&request.posting);
        let analysis =
            strategy::analyze_offer(request.current_offer, &market_data, request.target_salary);
        let strategy = strategy::build_strategy(
            request.current_offer,
            &market_data,
            &analysis,
            request.target_salary,
            request.company_size,
        );
        let scripts = scripts::render_scripts(&strategy, &request.posting);
        let recommended_counter_offer = strategy.counter_offer;

        NegotiationPlan {
            market_data,
            analysis,
            strategy,
            scripts,
            recommended_counter_offer,
        }
    }
}

impl Default for NegotiationPlanner {
    fn default() -> Self {
        Self::new(MarketDataEngine::new())
    }
}
