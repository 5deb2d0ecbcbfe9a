use super::domain::{format_eur, NegotiationScripts, NegotiationStrategy};
use crate::workflows::matching::JobPosting;

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Render the email, phone, and letter templates from a strategy.
pub(crate) fn render_scripts(
    strategy: &NegotiationStrategy,
    posting: &JobPosting,
) -> NegotiationScripts {
    let counter_offer = strategy.counter_offer.unwrap_or(0.0);
    let counter = format_eur(counter_offer.round());

    let email = format!(
        "Subject: Re: Job Offer - {title}\n\
         \n\
         Dear Hiring Manager,\n\
         \n\
         Thank you for the offer for the {title} position. I'm very excited about the \
         opportunity to join your team and contribute to {company}.\n\
         \n\
         After careful consideration and based on my research of the current market for \
         this role in Slovakia, I would like to discuss the compensation package. Based \
         on my experience and the value I can bring to the team, I was hoping we could \
         meet at €{counter} per month.\n\
         \n\
         This figure reflects:\n\
         - Market data from multiple Slovak salary sources\n\
         - My track record of relevant experience\n\
         - The specialized skills I bring in {skills}\n\
         \n\
         I'm confident that I can deliver significant value to your team from day one. \
         I'm happy to discuss this further and find a mutually beneficial arrangement.\n\
         \n\
         Looking forward to your response.\n\
         \n\
         Best regards",
        title = posting.title,
        company = non_empty_or(&posting.company, "the company"),
        counter = counter,
        skills = non_empty_or(&posting.requirements, "Python development"),
    );

    let justification = strategy
        .leverage_points
        .iter()
        .take(3)
        .map(|point| format!("- {point}"))
        .collect::<Vec<_>>()
        .join("\n");
    let pivot_benefits = strategy
        .alternative_benefits
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let min_acceptable = format_eur(strategy.min_acceptable.unwrap_or(counter_offer).round());

    let phone = format!(
        "\n\
         OPENING:\n\
         \"Thank you so much for the offer. I'm really excited about this opportunity \
         and I can see myself thriving in this role.\"\n\
         \n\
         TRANSITION TO NEGOTIATION:\n\
         \"I've done some market research, and I was wondering if there's any \
         flexibility in the compensation package?\"\n\
         \n\
         YOUR ASK:\n\
         \"Based on the market data I've gathered from Glassdoor, Profesia, and \
         Platy.sk, similar roles in Bratislava are ranging from €{min_acceptable} to \
         €{counter}. Would it be possible to meet at €{counter}?\"\n\
         \n\
         JUSTIFICATION:\n\
         {justification}\n\
         \n\
         IF THEY PUSH BACK:\n\
         \"I completely understand. Would you be open to exploring alternative \
         benefits such as {pivot_benefits}?\"\n\
         \n\
         CLOSING:\n\
         \"I'm really excited to join the team. What do you think about this \
         proposal?\"\n",
    );

    let value_points = strategy
        .leverage_points
        .iter()
        .take(4)
        .map(|point| format!("   - {point}"))
        .collect::<Vec<_>>()
        .join("\n");
    let benefit_lines = strategy
        .alternative_benefits
        .iter()
        .take(3)
        .map(|benefit| format!("   - {benefit}"))
        .collect::<Vec<_>>()
        .join("\n");

    let counter_offer_letter = format!(
        "Dear [Hiring Manager],\n\
         \n\
         I want to express my enthusiasm for the {title} position at {company}. After \
         our discussions, I'm confident this role aligns perfectly with my career \
         goals.\n\
         \n\
         Regarding the compensation package, I'd like to propose €{counter} monthly \
         gross salary. This figure is based on:\n\
         \n\
         1. Market Research: Data from Glassdoor Slovakia, Profesia.sk, and Platy.sk \
         shows the market rate for this position in Bratislava ranges from €{floor} \
         to €{ceiling}.\n\
         \n\
         2. My Value Proposition:\n\
         {value_points}\n\
         \n\
         I'm flexible and open to discussing the total compensation package, \
         including:\n\
         {benefit_lines}\n\
         \n\
         I'm excited to contribute to your team's success and look forward to \
         reaching an agreement that works for both of us.\n\
         \n\
         Best regards",
        title = posting.title,
        company = non_empty_or(&posting.company, "your company"),
        counter = counter,
        floor = format_eur(strategy.min_acceptable.unwrap_or(3000.0).round()),
        ceiling = format_eur(strategy.ideal_outcome.unwrap_or(5000.0).round()),
        value_points = value_points,
        benefit_lines = benefit_lines,
    );

    NegotiationScripts {
        email,
        phone,
        counter_offer_letter,
    }
}
