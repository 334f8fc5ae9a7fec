//! Analyze command: submit a contract, render the dashboard, then drop into
//! an interactive loop for chat, negotiation drafts, and page navigation.

use anyhow::{Context, Result};
use dealbreaker_application::AnalysisUseCase;
use dealbreaker_core::analysis::{score_band, AnalysisSession, ScoreBand, Severity, SourceKind};
use dealbreaker_core::chat::ChatRole;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Analyzes a local PDF file.
pub async fn run_file(usecase: &AnalysisUseCase, path: &Path) -> Result<()> {
    if path.extension().and_then(|e| e.to_str()) != Some("pdf") {
        anyhow::bail!("Only PDF files are allowed!");
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Path has no file name")?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {:?}", path))?;

    println!("Analyzing contract...");
    let session = usecase.analyze_file(&filename, bytes).await?;
    render_dashboard(&session);
    interactive_loop(usecase).await
}

/// Analyzes a contract published at a URL.
pub async fn run_url(usecase: &AnalysisUseCase, url: &str) -> Result<()> {
    println!("Scanning {url}...");
    let session = usecase.analyze_url(url).await?;
    render_dashboard(&session);
    interactive_loop(usecase).await
}

fn render_dashboard(session: &AnalysisSession) {
    let band = match score_band(session.safety_score) {
        ScoreBand::Safe => "safe",
        ScoreBand::Caution => "caution",
        ScoreBand::Danger => "danger",
    };

    println!();
    println!("=== {} ===", session.filename);
    println!("Safety score: {} ({band})", session.safety_score);
    println!("Summary: {}", session.summary);
    println!();

    if session.red_flags.is_empty() {
        println!("No risks found! This contract looks unusually safe.");
        return;
    }

    println!("Identified risks ({} issues):", session.red_flags.len());
    for (index, flag) in session.red_flags.iter().enumerate() {
        let severity = match flag.severity {
            Severity::High => "HIGH",
            Severity::Other => "MEDIUM",
        };
        let page = match (session.source_kind, flag.source_page) {
            (SourceKind::Pdf, Some(page)) => format!(" (page {page})"),
            _ => String::new(),
        };
        println!("  [{index}] {severity}{page}: {}", flag.risk);
        println!("      Clause: \"{}\"", flag.clause);
    }
}

const HELP: &str = "\
Commands:
  <question>   ask the assistant about the document
  /fix <n>     draft a negotiation email for risk n
  /fixall      draft one master email for all risks
  /close       close the draft view
  /page <n>    jump the source viewer to page n (PDF only)
  /help        show this help
  /quit        end the session";

async fn interactive_loop(usecase: &AnalysisUseCase) -> Result<()> {
    // Show the assistant greeting before the first prompt.
    if let Some(greeting) = usecase.transcript().await.first() {
        println!();
        println!("assistant: {}", greeting.text);
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let line = line.trim().to_string();

        match line.split_once(' ').map_or((line.as_str(), ""), |(a, b)| (a, b)) {
            ("/quit", _) => break,
            ("/help", _) => println!("{HELP}"),
            ("/close", _) => {
                usecase.close_draft().await;
                println!("Draft closed.");
            }
            ("/fixall", _) => {
                usecase.request_bulk_draft().await?;
                print_draft(usecase).await;
            }
            ("/fix", rest) => match rest.trim().parse::<usize>() {
                Ok(index) => {
                    usecase.request_single_draft(index).await?;
                    print_draft(usecase).await;
                }
                Err(_) => println!("Usage: /fix <risk index>"),
            },
            ("/page", rest) => match rest.trim().parse::<u32>() {
                Ok(page) => {
                    usecase.set_active_page(page).await;
                    match usecase.active_page().await {
                        Some(page) => println!("Viewer on page {page}."),
                        None => println!("PDF preview not available for this session."),
                    }
                }
                Err(_) => println!("Usage: /page <page number>"),
            },
            _ if line.is_empty() => {}
            _ => {
                usecase.ask(&line).await?;
                print_last_answer(usecase).await;
            }
        }
    }

    usecase.reset_session().await;
    Ok(())
}

async fn print_draft(usecase: &AnalysisUseCase) {
    match usecase.visible_draft().await {
        Some(draft) => {
            println!();
            println!("--- Draft email ---");
            println!("{draft}");
            println!("-------------------");
        }
        None => println!("No draft to show."),
    }
}

async fn print_last_answer(usecase: &AnalysisUseCase) {
    let transcript = usecase.transcript().await;
    if let Some(message) = transcript.iter().rev().find(|m| m.role == ChatRole::Assistant) {
        println!("assistant: {}", message.text);
    }
}
