use anyhow::{Context, Result};
use clap::Parser;
use interview_coach::{describe_question, load_settings, write_reports};
use interview_core::{
    http_client::HttpInterviewService, runner::InterviewRunner, service::InterviewService,
    voice::VoiceCapture,
};
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::time::ChronoLocal;

/// Runs a mock interview against the interview API from the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the interview API
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,
    /// JSON file with the interview settings
    #[arg(long)]
    settings: PathBuf,
    /// Directory the summary files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Parse Command-Line Arguments ---
    let args = Cli::parse();

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // --- 3. Request the Interview Plan ---
    let settings = load_settings(&args.settings)?;
    let service: Arc<dyn InterviewService> = Arc::new(HttpInterviewService::new(&args.server));
    println!("Preparing your interview...");
    let config = service
        .generate_plan(&settings)
        .await
        .context("Failed to generate the interview plan")?;
    for stage in &config.interview_process {
        println!("  {} ({} questions)", stage.stage_name, stage.questions.len());
    }

    // No speech recognizer in the terminal; `:voice` reports that.
    let mut runner = InterviewRunner::new(service, config, VoiceCapture::Unavailable);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // --- 4. Opening Turn ---
    while let Err(e) = runner.start().await {
        println!("Could not start the interview ({e}). Press Enter to retry or :quit.");
        match lines.next_line().await? {
            Some(line) if line.trim() != ":quit" => continue,
            _ => return Ok(()),
        }
    }

    // --- 5. Answer Loop ---
    while !runner.session().is_complete() {
        if let Some(header) = describe_question(runner.session()) {
            println!("\n{header}");
        }
        let Some(line) = lines.next_line().await? else {
            println!("Input closed before the interview finished.");
            return Ok(());
        };
        match line.trim() {
            ":quit" => return Ok(()),
            ":voice" => {
                runner.toggle_listening();
                if !runner.voice().is_available() {
                    println!("Voice input is not available in this terminal.");
                }
                continue;
            }
            _ => runner.type_answer(line.as_str()),
        }
        if let Err(e) = runner.submit().await {
            println!("Submitting failed ({e}). Enter your answer again to retry.");
        }
    }

    // --- 6. Summary ---
    if let Some(summary) = runner.session().summary() {
        println!("\nInterview complete. Total score: {}", summary.total_score);
        println!("{}", summary.summary);
    }
    let (summary_path, log_path) = write_reports(&args.output_dir, runner.session())?;
    println!(
        "Reports written to {} and {}",
        summary_path.display(),
        log_path.display()
    );
    Ok(())
}
