use super::domain::{format_eur, NegotiationRound, ResponseCategory};

/// Play out a two-round counter-offer exchange against an employer with a
/// fixed budget ceiling.
///
/// The employer accepts a counter within budget unless it stretches more
/// than 15% of the ceiling above the initial offer, in which case they come
/// back at the middle ground. A counter above the ceiling is met with their
/// maximum.
pub fn simulate_negotiation(
    initial_offer: f64,
    your_counter: f64,
    employer_max: f64,
) -> Vec<NegotiationRound> {
    let mut rounds = vec![NegotiationRound {
        round: 1,
        employer_offer: initial_offer,
        your_response: ResponseCategory::Counter,
        your_counter: Some(your_counter),
        analysis: "Initial counter-offer submitted".to_string(),
    }];

    if your_counter <= employer_max && your_counter - initial_offer > 0.15 * employer_max {
        let midpoint = (initial_offer + your_counter) / 2.0;
        rounds.push(NegotiationRound {
            round: 2,
            employer_offer: midpoint,
            your_response: ResponseCategory::Evaluate,
            your_counter: None,
            analysis: format!(
                "Employer countered at middle ground: €{}",
                format_eur(midpoint.round())
            ),
        });
    } else if your_counter <= employer_max {
        rounds.push(NegotiationRound {
            round: 2,
            employer_offer: your_counter,
            your_response: ResponseCategory::Accept,
            your_counter: None,
            analysis: "Employer accepted your counter-offer".to_string(),
        });
    } else {
        rounds.push(NegotiationRound {
            round: 2,
            employer_offer: employer_max,
            your_response: ResponseCategory::Evaluate,
            your_counter: None,
            analysis: format!(
                "Employer countered at their maximum: €{}",
                format_eur(employer_max.round())
            ),
        });
    }

    rounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modest_counters_within_budget_are_accepted() {
        let rounds = simulate_negotiation(3000.0, 3200.0, 3500.0);

        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[1].employer_offer, 3200.0);
        assert_eq!(rounds[1].your_response, ResponseCategory::Accept);
        assert_eq!(rounds[1].analysis, "Employer accepted your counter-offer");
    }

    #[test]
    fn counters_above_budget_hit_the_ceiling() {
        let rounds = simulate_negotiation(3000.0, 4000.0, 3500.0);

        assert_eq!(rounds[1].employer_offer, 3500.0);
        assert_eq!(rounds[1].your_response, ResponseCategory::Evaluate);
        assert_eq!(
            rounds[1].analysis,
            "Employer countered at their maximum: €3,500"
        );
    }

    #[test]
    fn ambitious_counters_within_budget_meet_in_the_middle() {
        let rounds = simulate_negotiation(3000.0, 3800.0, 4000.0);

        assert_eq!(rounds[1].employer_offer, 3400.0);
        assert_eq!(rounds[1].your_response, ResponseCategory::Evaluate);
        assert_eq!(
            rounds[1].analysis,
            "Employer countered at middle ground: €3,400"
        );
    }

    #[test]
    fn the_opening_round_restates_the_exchange() {
        let rounds = simulate_negotiation(2800.0, 3100.0, 3600.0);

        assert_eq!(rounds[0].round, 1);
        assert_eq!(rounds[0].employer_offer, 2800.0);
        assert_eq!(rounds[0].your_response, ResponseCategory::Counter);
        assert_eq!(rounds[0].your_counter, Some(3100.0));
        assert_eq!(rounds[0].analysis, "Initial counter-offer submitted");
        assert_eq!(rounds[1].round, 2);
        assert_eq!(rounds[1].your_counter, None);
    }

    #[test]
    fn the_simulation_is_deterministic() {
        let first = simulate_negotiation(3000.0, 3800.0, 4000.0);
        let second = simulate_negotiation(3000.0, 3800.0, 4000.0);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.employer_offer, b.employer_offer);
            assert_eq!(a.your_response, b.your_response);
            assert_eq!(a.analysis, b.analysis);
        }
    }
}
