use crate::infra::{parse_company_size, InMemoryEvaluationRepository, LoggingNotificationPublisher};
use clap::Args;
use hunt_ai::error::AppError;
use hunt_ai::workflows::matching::{
    CandidateProfile, EvaluationStatus, ExperienceLevel, JobMatchingService, JobPosting,
    MatchEngine, MatchSettings, SearchPreferences,
};
use hunt_ai::workflows::negotiation::{
    simulate_negotiation, CompanySize, NegotiationPlanner, NegotiationRequest,
};
use hunt_ai::workflows::profesia::ProfesiaExportImporter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional listings CSV export to run through the pipeline instead of
    /// the built-in sample posting.
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
    /// Offer on the table for the negotiation portion, EUR per month
    /// (defaults to 2500).
    #[arg(long)]
    pub(crate) offer: Option<f64>,
    /// Target salary used to shape the negotiation plan.
    #[arg(long)]
    pub(crate) target: Option<f64>,
    /// Company size hint (startup, scaleup, enterprise).
    #[arg(long, value_parser = parse_company_size)]
    pub(crate) company_size: Option<CompanySize>,
    /// Skip the negotiation portion of the demo.
    #[arg(long)]
    pub(crate) skip_negotiation: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        listings_csv,
        offer,
        target,
        company_size,
        skip_negotiation,
    } = args;

    println!("Job hunt pipeline demo");

    let postings = match listings_csv {
        Some(path) => {
            let report = ProfesiaExportImporter::from_path(&path)?;
            println!("Data source: listings export {}", path.display());
            println!(
                "Imported {} postings ({} rows skipped, {} duplicates)",
                report.imported(),
                report.skipped(),
                report.duplicates
            );
            for issue in &report.issues {
                println!("  - row {}: {}", issue.row, issue.reason);
            }
            report.postings
        }
        None => {
            println!("Data source: built-in sample posting");
            vec![sample_posting()]
        }
    };

    let profile = sample_profile();
    let repository = Arc::new(InMemoryEvaluationRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let service = JobMatchingService::new(
        repository,
        notifications.clone(),
        MatchEngine::new(MatchSettings::default()),
    );

    let report = match service.run(postings, &profile) {
        Ok(report) => report,
        Err(err) => {
            println!("  Pipeline run failed: {}", err);
            return Ok(());
        }
    };

    println!(
        "\nPipeline counts: {} scraped | {} matched | {} approved | {} rejected",
        report.scraped, report.matched, report.approved, report.rejected
    );

    println!("\nEvaluations");
    for evaluation in &report.evaluations {
        let view = evaluation.status_view();
        println!(
            "- {} | {} at {} | {} (score {:.2})",
            view.evaluation_id.0, view.job_title, view.company, view.status, view.match_score
        );
        println!("  Rationale: {}", view.decision_rationale);
    }

    if let Some(approved) = report
        .evaluations
        .iter()
        .find(|record| record.status == EvaluationStatus::Approved)
    {
        match serde_json::to_string_pretty(&approved.status_view()) {
            Ok(json) => println!("\nPublic status payload:\n{}", json),
            Err(err) => println!("\nPublic status payload unavailable: {}", err),
        }
    }

    let events = notifications.events();
    if events.is_empty() {
        println!("\nNotifications: none dispatched");
    } else {
        println!("\nNotifications");
        for event in events {
            println!(
                "- {} -> {} at {} (score {:.2})",
                event.evaluation_id.0, event.job_title, event.company, event.match_score
            );
        }
    }

    if skip_negotiation {
        return Ok(());
    }

    let offer = offer.unwrap_or(2500.0);
    let posting = report
        .evaluations
        .iter()
        .find(|record| record.status == EvaluationStatus::Approved)
        .or_else(|| report.evaluations.first())
        .map(|record| record.posting.clone())
        .unwrap_or_else(sample_posting);

    println!(
        "\nNegotiation plan for {} at {} ({})",
        posting.title, posting.company, posting.location
    );

    let planner = NegotiationPlanner::default();
    let plan = planner.plan(&NegotiationRequest {
        posting,
        current_offer: Some(offer),
        target_salary: target,
        company_size,
    });

    let market = &plan.market_data;
    match market.average_salary {
        Some(average) => println!(
            "Market average EUR {:.0} from {} ({} data points)",
            average,
            market.sources.join(", "),
            market.data_points
        ),
        None => println!("Market average unavailable"),
    }
    if let (Some(p25), Some(p50), Some(p75)) = (
        market.percentile_25,
        market.percentile_50,
        market.percentile_75,
    ) {
        println!("Percentiles: p25 {:.0} | p50 {:.0} | p75 {:.0}", p25, p50, p75);
    }

    println!(
        "Offer EUR {:.0} reads as {:?} with {:?} negotiation room",
        offer, plan.analysis.offer_vs_market, plan.analysis.negotiation_room
    );
    if let Some(band) = plan.analysis.percentile {
        println!("Percentile band: {:?}", band);
    }
    if let Some(gap) = plan.analysis.gap_to_target {
        println!("Gap to target: EUR {:.0} ({:.1}%)", gap.amount, gap.percent);
    }

    let strategy = &plan.strategy;
    if strategy.should_negotiate {
        if let Some(counter) = plan.recommended_counter_offer {
            println!("Recommended counter-offer: EUR {:.0}", counter);
        }
        if let (Some(min), Some(ideal)) = (strategy.min_acceptable, strategy.ideal_outcome) {
            println!("Acceptable range: EUR {:.0} to EUR {:.0}", min, ideal);
        }
    } else {
        println!("Recommendation: accept; the offer already beats the market");
    }

    if !strategy.leverage_points.is_empty() {
        println!("Leverage:");
        for point in &strategy.leverage_points {
            println!("- {}", point);
        }
    }
    if !strategy.risks.is_empty() {
        println!("Risks:");
        for risk in &strategy.risks {
            println!("- {}", risk);
        }
    }
    if !strategy.alternative_benefits.is_empty() {
        println!("Fallback benefits:");
        for benefit in &strategy.alternative_benefits {
            println!("- {}", benefit);
        }
    }

    println!("\nNegotiation email draft\n{}", plan.scripts.email);

    if let (Some(counter), Some(ideal)) = (plan.recommended_counter_offer, strategy.ideal_outcome) {
        println!("\nSimulated exchange");
        for round in simulate_negotiation(offer, counter, ideal) {
            match round.your_counter {
                Some(your_counter) => println!(
                    "- Round {}: employer EUR {:.0}, you counter EUR {:.0} ({})",
                    round.round, round.employer_offer, your_counter, round.analysis
                ),
                None => println!(
                    "- Round {}: employer EUR {:.0} ({})",
                    round.round, round.employer_offer, round.analysis
                ),
            }
        }
    }

    Ok(())
}

fn sample_posting() -> JobPosting {
    JobPosting {
        title: "Python Developer".to_string(),
        company: "Tech Company".to_string(),
        location: "Bratislava".to_string(),
        description: "Backend services for a logistics platform; small product team.".to_string(),
        requirements: "Python, Django, REST APIs, PostgreSQL".to_string(),
        salary_range: Some("3000-4000 EUR".to_string()),
        url: "https://www.profesia.sk/praca/sample/12345".to_string(),
        source: "profesia.sk".to_string(),
        scraped_at: None,
    }
}

fn sample_profile() -> CandidateProfile {
    CandidateProfile {
        cv_content: "Python developer with five years of backend experience, Django and \
                     PostgreSQL in production, comfortable owning services end to end."
            .to_string(),
        preferences: SearchPreferences {
            job_titles: vec![
                "Python Developer".to_string(),
                "Backend Developer".to_string(),
            ],
            locations: vec!["Bratislava".to_string(), "Remote".to_string()],
            required_skills: vec!["Python".to_string(), "Django".to_string()],
            preferred_skills: vec!["Docker".to_string(), "AWS".to_string()],
            experience_level: ExperienceLevel::Mid,
            min_salary: Some(3000.0),
        },
    }
}
