use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_intake::collection::LeadCollection;
use lead_intake::config::Config;
use lead_intake::models::{AgeGroup, FamilyBackground};
use lead_intake::scoring_client::ScoringClient;
use lead_intake::session::{LeadSession, SubmissionState};

/// Prompts for one line of input; `None` on end of input.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Numbered select prompt; empty input keeps the default option.
fn prompt_choice<T: Copy + Display + PartialEq>(
    label: &str,
    options: &[T],
    default: T,
) -> io::Result<Option<T>> {
    println!("{}:", label);
    for (i, option) in options.iter().enumerate() {
        let marker = if *option == default { "*" } else { " " };
        println!("  {} {}. {}", marker, i + 1, option);
    }
    loop {
        let Some(input) = prompt("Select")? else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(Some(default));
        }
        if let Ok(index) = input.parse::<usize>() {
            if (1..=options.len()).contains(&index) {
                return Ok(Some(options[index - 1]));
            }
        }
        println!("Invalid selection");
    }
}

fn prompt_yes_no(label: &str) -> io::Result<Option<bool>> {
    let Some(input) = prompt(&format!("{} [y/N]", label))? else {
        return Ok(None);
    };
    Ok(Some(matches!(input.as_str(), "y" | "Y" | "yes" | "Yes")))
}

/// Renders the four-column scored-lead table.
fn render_table(leads: &LeadCollection) {
    if leads.is_empty() {
        println!("No scored leads yet.");
        return;
    }
    println!(
        "{:<30} {:>13} {:>14}  {}",
        "Email", "Initial Score", "Reranked Score", "Comments"
    );
    for row in leads.rows() {
        println!(
            "{:<30} {:>13} {:>14}  {}",
            row.email, row.initial_score, row.reranked_score, row.comments
        );
    }
}

/// Fills the session draft from the console form. Returns `false` when input
/// ended before the form was complete.
fn read_form(session: &mut LeadSession) -> io::Result<bool> {
    println!();
    println!("Add New Lead");

    let Some(phone_number) = prompt("Phone number")? else {
        return Ok(false);
    };
    session.draft_mut().phone_number = phone_number;

    let Some(email) = prompt("Email")? else {
        return Ok(false);
    };
    session.draft_mut().email = email;

    let Some(credit_score) = prompt("Credit score")? else {
        return Ok(false);
    };
    session.draft_mut().credit_score = credit_score;

    let current = session.draft().age_group;
    let Some(age_group) = prompt_choice("Age group", &AgeGroup::ALL, current)? else {
        return Ok(false);
    };
    session.draft_mut().age_group = age_group;

    let current = session.draft().family_background;
    let Some(family_background) =
        prompt_choice("Family background", &FamilyBackground::ALL, current)?
    else {
        return Ok(false);
    };
    session.draft_mut().family_background = family_background;

    let Some(income) = prompt("Income")? else {
        return Ok(false);
    };
    session.draft_mut().income = income;

    let Some(comments) = prompt("Comments")? else {
        return Ok(false);
    };
    session.draft_mut().comments = comments;

    let Some(consent) = prompt_yes_no("I consent to data processing")? else {
        return Ok(false);
    };
    session.draft_mut().consent = consent;

    Ok(true)
}

/// Main entry point: initializes tracing and configuration, performs the
/// one-shot startup fetch, then runs the console intake loop.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_intake=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let client = ScoringClient::new(&config)?;
    let mut session = LeadSession::new(client);

    println!("Lead Scoring Dashboard");

    // Startup fetch failures are logged, not surfaced; the table simply
    // starts empty.
    if session.load_leads().await.is_err() {
        tracing::warn!("Continuing with an empty lead list");
    }
    println!();
    println!("Scored Leads");
    render_table(session.leads());

    loop {
        if !read_form(&mut session)? {
            break;
        }

        match session.submit().await {
            SubmissionState::Failed(message) => println!("Error: {}", message),
            SubmissionState::Idle => {
                println!();
                println!("Scored Leads");
                render_table(session.leads());
            }
            SubmissionState::Submitting => unreachable!("submit() always completes the attempt"),
        }

        match prompt_yes_no("Add another lead?")? {
            Some(true) => continue,
            _ => break,
        }
    }

    Ok(())
}
