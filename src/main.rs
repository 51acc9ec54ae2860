use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use recsec_client::api::{ApiClient, RecSecBackend};
use recsec_client::config::{ClientConfig, SessionConfig};
use recsec_client::model::{Project, SecurityPatternRecommendation};
use recsec_client::projects::ProjectDirectory;
use recsec_client::recommender::{ExplanationCache, Question, RecommenderSession, SessionStep};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let client_config = ClientConfig::from_env().context("reading client configuration")?;
    let session_config = SessionConfig::from_env().context("reading session configuration")?;

    eprintln!("RecSec recommender v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", client_config.base_url);
    eprintln!(
        "   Authenticated: {}",
        if client_config.access_token.is_some() { "yes" } else { "no" }
    );
    eprintln!("   Project: {}", session_config.project_id);
    eprintln!("   Security control: {}", session_config.security_control_id);
    eprintln!("   Answer with a number, type a question to ask the assistant,");
    eprintln!("   /reset to start over, /quit to exit.\n");

    let client = ApiClient::from_config(&client_config)?;
    let backend: Arc<dyn RecSecBackend> = Arc::new(client);

    let mut directory = ProjectDirectory::new();
    directory
        .refresh(backend.as_ref())
        .await
        .context("listing projects")?;
    let project = directory
        .select_project(backend.as_ref(), session_config.project_id)
        .await
        .context("selecting the configured project")?;
    print_project(project);

    let mut session = RecommenderSession::load(
        Arc::clone(&backend),
        session_config.project_id,
        session_config.security_control_id,
    )
    .await
    .context("loading the preference elicitation dialog")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(question) = session.current_question() {
        print_question(question);
    }

    while let Some(line) = read_line(&mut lines).await? {
        match line.as_str() {
            "/quit" => return Ok(()),
            "/reset" => {
                session.reset();
                if let Some(question) = session.current_question() {
                    print_question(question);
                }
                continue;
            }
            _ => {}
        }

        let Some(answer_key) = pick_answer(session.current_question(), &line) else {
            match session.ask(&line).await {
                Ok(reply) => println!("\n{reply}\n"),
                Err(e) => eprintln!("   Assistant unavailable: {e}"),
            }
            if let Some(question) = session.current_question() {
                print_question(question);
            }
            continue;
        };

        match session.select_answer(&answer_key).await {
            Ok(SessionStep::Question(question)) => print_question(question),
            Ok(SessionStep::Recommendations(recommendations)) => {
                let recommendations = recommendations.to_vec();
                print_recommendations(&recommendations);
                return explain_loop(backend.as_ref(), &recommendations, &mut lines).await;
            }
            Err(e) => {
                eprintln!("   {e}");
                eprintln!("   Type /reset to start over.");
            }
        }
    }

    Ok(())
}

type StdinLines = Lines<BufReader<Stdin>>;

/// Next non-empty trimmed line, `None` on EOF.
async fn read_line(lines: &mut StdinLines) -> anyhow::Result<Option<String>> {
    loop {
        eprint!("> ");
        match lines.next_line().await? {
            Some(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    return Ok(Some(line));
                }
            }
            None => return Ok(None),
        }
    }
}

/// Map a 1-based answer number to its answer key.
fn pick_answer(question: Option<&Question>, input: &str) -> Option<String> {
    let index: usize = input.parse().ok()?;
    let answer = question?.answers.get(index.checked_sub(1)?)?;
    Some(answer.answer_key.clone())
}

fn print_project(project: &Project) {
    println!("Project: {}", project.name);
    for (property, values) in project.properties.describe() {
        println!("  {property}: {}", values.join(", "));
    }
}

fn print_question(question: &Question) {
    println!("\n{}", question.display_text);
    for (i, answer) in question.answers.iter().enumerate() {
        println!("  {}. {}", i + 1, answer.display_text);
    }
}

fn print_recommendations(recommendations: &[SecurityPatternRecommendation]) {
    if recommendations.is_empty() {
        println!("\nNo security pattern matches your preferences.");
        return;
    }
    println!("\nRecommended security patterns:");
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "  {}. {} (score {:.2})",
            i + 1,
            rec.security_pattern.name,
            rec.score
        );
        for explanation in rec.satisfied() {
            println!("       + {}", explanation.constraint_name);
        }
        for explanation in rec.violated() {
            println!("       - {}", explanation.constraint_name);
        }
    }
    println!("\nEnter a number for a detailed explanation, /quit to exit.");
}

async fn explain_loop(
    backend: &dyn RecSecBackend,
    recommendations: &[SecurityPatternRecommendation],
    lines: &mut StdinLines,
) -> anyhow::Result<()> {
    let cache = ExplanationCache::new();
    while let Some(line) = read_line(lines).await? {
        if line == "/quit" {
            break;
        }
        let picked = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| recommendations.get(i));
        let Some(rec) = picked else {
            eprintln!("   Pick a number between 1 and {}.", recommendations.len());
            continue;
        };
        match cache.explain(backend, rec).await {
            Ok(text) => println!("\n{}\n\n{text}\n", rec.security_pattern.name),
            Err(e) => eprintln!("   Explanation unavailable: {e}"),
        }
    }
    Ok(())
}
