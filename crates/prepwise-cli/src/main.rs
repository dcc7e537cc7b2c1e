//! PrepWise CLI - Mock interviews from the terminal
//!
//! Manage interviews, read feedback, and replay recorded voice sessions
//! against the PrepWise API.

mod api;
mod config;
mod voice;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use api::{FeedbackReport, PrepWiseClient};
use config::{Config, Profile};
use prepwise::{
    AgentConfig, CallStatus, FeedbackRequest, Interview, InterviewAgent, Route, TranscriptMessage,
};
use voice::{ConsoleNavigator, ScriptedVoiceSession};

#[derive(Parser)]
#[command(name = "prepwise")]
#[command(about = "PrepWise CLI - Mock interviews and AI feedback", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Manage profiles (candidate shortcuts)
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Interview operations
    Interview {
        #[command(subcommand)]
        action: InterviewAction,
    },

    /// Feedback operations
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },

    /// Run interview sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Add a new profile
    Add {
        /// Profile name (e.g., "ada")
        name: String,
        /// User ID
        #[arg(long)]
        user_id: String,
        /// Display name spoken by the interviewer
        #[arg(long)]
        display_name: Option<String>,
        /// Phone number for phone interviews
        #[arg(long)]
        phone: Option<String>,
        /// Voice workflow ID for web interviews
        #[arg(long)]
        workflow_id: Option<String>,
    },
    /// List all profiles
    List,
    /// Set default profile
    Set {
        /// Profile name to set as default
        name: String,
    },
    /// Remove a profile
    Remove {
        /// Profile name to remove
        name: String,
    },
}

#[derive(Subcommand)]
enum InterviewAction {
    /// Mark an interview started (creates one when no ID is given)
    Start {
        /// Interview ID
        #[arg(short, long)]
        interview: Option<String>,
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Show an interview
    Show {
        /// Interview ID
        id: String,
    },
    /// List your interviews
    List {
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// List recent finalized interviews of other candidates
    Latest {
        /// Max results
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },
}

#[derive(Subcommand)]
enum FeedbackAction {
    /// Show the latest feedback for an interview
    Show {
        /// Interview ID
        interview: String,
    },
    /// Generate feedback from a transcript file (JSON array of {role, content})
    Generate {
        /// Interview ID
        interview: String,
        /// Transcript file
        #[arg(short, long)]
        transcript: PathBuf,
        /// Overwrite this existing feedback record
        #[arg(long)]
        feedback_id: Option<String>,
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Replay a recorded provider-event script through a live session
    Run {
        /// JSONL file of provider events
        script: PathBuf,
        /// Interview to conduct (questions are loaded from it)
        #[arg(short, long)]
        interview: Option<String>,
        /// Extra questions (used when no interview is given)
        #[arg(short, long)]
        question: Vec<String>,
        /// Place a phone call instead of a web call
        #[arg(long)]
        phone: bool,
        /// Overwrite the interview's existing feedback with this session's evaluation
        #[arg(long)]
        regenerate: bool,
        /// Profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Profile { action } => cmd_profile(action),
        Commands::Interview { action } => cmd_interview(action).await,
        Commands::Feedback { action } => cmd_feedback(action).await,
        Commands::Session { action } => cmd_session(action).await,
        Commands::Config => cmd_config(),
    }
}

// ============================================
// Helpers
// ============================================

fn build_client(config: &Config) -> PrepWiseClient {
    PrepWiseClient::new(&config.base_url, config.api_key.as_deref())
        .with_telephony_url(config.telephony_url.clone())
}

fn require_profile<'a>(config: &'a Config, profile: Option<&str>) -> Result<&'a Profile> {
    config.get_profile(profile).context(
        "No profile specified and no default profile set. Use -p <profile> or set a default.",
    )
}

fn print_interview_row(interview: &Interview) {
    let status = if interview.finalized {
        "finalized".green()
    } else if interview.started_at.is_some() {
        "started".yellow()
    } else {
        "new".dimmed()
    };

    println!(
        "  {} {} [{}] {} ({} questions) {}",
        interview.id.dimmed(),
        interview.role.cyan().bold(),
        interview.interview_type,
        interview.level.dimmed(),
        interview.questions.len(),
        status
    );
}

fn print_feedback(report: &FeedbackReport) {
    let score = format!("{:.0}/100", report.total_score);
    let score = if report.total_score >= 70.0 {
        score.green()
    } else if report.total_score >= 40.0 {
        score.yellow()
    } else {
        score.red()
    };

    println!("{} {}", "Overall:".bold(), score);
    println!("\n{}", "Breakdown:".bold());
    for (i, category) in report.category_scores.iter().enumerate() {
        println!(
            "  {}. {} ({:.0}/100)",
            i + 1,
            category.name.cyan(),
            category.score
        );
        println!("     {}", category.comment.dimmed());
    }

    println!("\n{}", "Strengths:".bold());
    for strength in &report.strengths {
        println!("  {} {}", "+".green(), strength);
    }

    println!("\n{}", "Areas for improvement:".bold());
    for area in &report.areas_for_improvement {
        println!("  {} {}", "-".yellow(), area);
    }

    println!("\n{}", "Final assessment:".bold());
    println!("  {}", report.final_assessment);
    println!(
        "\n{}",
        format!("Feedback {} ({})", report.id, report.created_at).dimmed()
    );
}

/// Split existing feedback into (skip dispatch, overwrite on dispatch)
fn feedback_ids(existing: Option<String>, regenerate: bool) -> (Option<String>, Option<String>) {
    if regenerate {
        (None, existing)
    } else {
        (existing, None)
    }
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    // Test connection
    let client = PrepWiseClient::new(&config.base_url, Some(&api_key));
    print!("Testing connection... ");

    if !client.health().await.unwrap_or(false) {
        println!("{}", "Failed".red());
        bail!("PrepWise API at {} is not reachable.", config.base_url);
    }

    match client.verify_key().await {
        Ok(true) => println!("{}", "OK".green()),
        Ok(false) => {
            println!("{}", "Rejected".red());
            bail!("The PrepWise API rejected this API key.");
        }
        Err(e) => {
            println!("{}", "Failed".red());
            bail!("Could not connect to PrepWise API at {}: {}", config.base_url, e);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    if config.profiles.is_empty() {
        println!("\n{}", "Tip: Set up a profile to avoid typing user IDs:".yellow());
        println!("  prepwise profile add ada --user-id <USER_ID> --display-name Ada");
        println!("  prepwise profile set ada");
    }

    Ok(())
}

fn cmd_profile(action: ProfileAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ProfileAction::Add {
            name,
            user_id,
            display_name,
            phone,
            workflow_id,
        } => {
            let display_name = match display_name {
                Some(d) => Some(d),
                None => {
                    let entered: String = Input::new()
                        .with_prompt("Display name")
                        .allow_empty(true)
                        .interact_text()
                        .context("Failed to read input")?;
                    Some(entered).filter(|d| !d.is_empty())
                }
            };

            config.add_profile(
                name.clone(),
                Profile {
                    user_id,
                    name: display_name,
                    phone,
                    workflow_id,
                },
            );
            if config.default_profile.is_none() {
                config.set_default_profile(name.clone());
            }
            config.save()?;
            println!("{} Profile '{}' added", "✓".green(), name);
        }

        ProfileAction::List => {
            if config.profiles.is_empty() {
                println!("No profiles configured.");
                println!("\n{}", "Add one with:".dimmed());
                println!("  prepwise profile add <name> --user-id <USER_ID>");
                return Ok(());
            }

            println!("{}", "Profiles:".bold());
            for (name, profile) in &config.profiles {
                let is_default = config.default_profile.as_ref() == Some(name);
                let default_marker = if is_default {
                    " (default)".green().to_string()
                } else {
                    String::new()
                };
                let phone = profile.phone.as_deref().unwrap_or("-");

                println!(
                    "  {} {} ({}) {}{}",
                    name.cyan(),
                    profile.display_name().dimmed(),
                    profile.user_id,
                    phone.dimmed(),
                    default_marker
                );
            }
        }

        ProfileAction::Set { name } => {
            if config.set_default_profile(name.clone()) {
                config.save()?;
                println!("{} Default profile set to '{}'", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }

        ProfileAction::Remove { name } => {
            if config.remove_profile(&name) {
                config.save()?;
                println!("{} Profile '{}' removed", "✓".green(), name);
            } else {
                bail!("Profile '{}' not found", name);
            }
        }
    }

    Ok(())
}

async fn cmd_interview(action: InterviewAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config);

    match action {
        InterviewAction::Start { interview, profile } => {
            let profile = require_profile(&config, profile.as_deref())?;
            let id = client
                .start_interview(interview.as_deref(), &profile.user_id)
                .await?;
            println!("{} Interview {} started", "✓".green(), id.cyan());
        }

        InterviewAction::Show { id } => {
            let interview = client.get_interview(&id).await?;

            println!("{} {}", interview.role.cyan().bold(), interview.id.dimmed());
            println!("  Type: {}", interview.interview_type);
            println!("  Level: {}", interview.level);
            if !interview.techstack.is_empty() {
                println!("  Tech stack: {}", interview.techstack.join(", "));
            }
            println!("  Created: {}", interview.created_at);
            if let Some(started_at) = interview.started_at {
                println!("  Started: {}", started_at);
            }
            println!("  Finalized: {}", interview.finalized);
            println!("\n{}", "Questions:".bold());
            for (i, question) in interview.questions.iter().enumerate() {
                println!("  {}. {}", i + 1, question);
            }
        }

        InterviewAction::List { profile } => {
            let user = require_profile(&config, profile.as_deref())?;
            let interviews = client.list_interviews(&user.user_id).await?;

            if interviews.is_empty() {
                println!("No interviews yet.");
                return Ok(());
            }

            println!(
                "{} ({}):",
                "Your interviews".bold(),
                config.profile_name(profile.as_deref()).cyan()
            );
            for interview in &interviews {
                print_interview_row(interview);
            }
        }

        InterviewAction::Latest { limit, profile } => {
            let user = require_profile(&config, profile.as_deref())?;
            let interviews = client.latest_interviews(&user.user_id, limit).await?;

            if interviews.is_empty() {
                println!("No interviews from other candidates yet.");
                return Ok(());
            }

            println!("{}", "Latest interviews:".bold());
            for interview in &interviews {
                print_interview_row(interview);
            }
        }
    }

    Ok(())
}

async fn cmd_feedback(action: FeedbackAction) -> Result<()> {
    let config = Config::load()?;
    let client = build_client(&config);

    match action {
        FeedbackAction::Show { interview } => match client.get_feedback(&interview).await? {
            Some(report) => print_feedback(&report),
            None => println!("No feedback for interview {} yet.", interview),
        },

        FeedbackAction::Generate {
            interview,
            transcript,
            feedback_id,
            profile,
        } => {
            let user = require_profile(&config, profile.as_deref())?;
            let content = std::fs::read_to_string(&transcript)
                .with_context(|| format!("Failed to read file: {}", transcript.display()))?;
            let transcript: Vec<TranscriptMessage> =
                serde_json::from_str(&content).context("Transcript must be a JSON array of {role, content}")?;

            if let Some(last) = transcript.last() {
                println!(
                    "Evaluating {} messages (last: {})",
                    transcript.len(),
                    truncate_string(&last.content, 60).dimmed()
                );
            }

            let feedback_id = client
                .generate_feedback(&FeedbackRequest {
                    interview_id: interview.clone(),
                    user_id: user.user_id.clone(),
                    transcript,
                    feedback_id,
                })
                .await?;
            println!("{} Feedback {} generated", "✓".green(), feedback_id.cyan());

            if let Some(report) = client.get_feedback(&interview).await? {
                println!();
                print_feedback(&report);
            }
        }
    }

    Ok(())
}

async fn cmd_session(action: SessionAction) -> Result<()> {
    let SessionAction::Run {
        script,
        interview,
        question,
        phone,
        regenerate,
        profile,
    } = action;

    let config = Config::load()?;
    let user = require_profile(&config, profile.as_deref())?.clone();
    let client = Arc::new(build_client(&config));

    let (questions, call_type, existing) = match &interview {
        Some(id) => {
            let found = client.get_interview(id).await?;
            let existing = client.get_feedback(id).await?.map(|f| f.id);
            (found.questions, found.interview_type, existing)
        }
        None => (question, Interview::DEFAULT_TYPE.to_string(), None),
    };
    let (feedback_id, regenerate_feedback_id) = feedback_ids(existing, regenerate);

    if feedback_id.is_some() {
        println!(
            "{}",
            "This interview already has feedback; pass --regenerate to replace it.".yellow()
        );
    }

    let agent_config = AgentConfig {
        user_name: user.display_name().to_string(),
        user_id: Some(user.user_id.clone()),
        interview_id: interview.clone(),
        feedback_id,
        regenerate_feedback_id,
        call_type,
        questions,
        workflow_id: user.workflow_id.clone().unwrap_or_default(),
    };

    let phone_number = if phone {
        Some(
            user.phone
                .clone()
                .context("Profile has no phone number. Add one with --phone.")?,
        )
    } else {
        None
    };
    let mode = agent_config.call_mode(phone_number.as_deref());

    let voice = Arc::new(ScriptedVoiceSession::from_file(&script)?);
    let navigator = Arc::new(ConsoleNavigator::default());
    let mut agent = InterviewAgent::new(agent_config, voice.clone(), client, navigator.clone());

    println!(
        "{} {} events, {} questions",
        "Replaying".bold(),
        voice.len(),
        agent.state().sequencer.questions().len()
    );

    let mut subscription = agent.subscribe();
    agent.start_call(mode).await?;
    if phone {
        // The telephony provider connects the call on its own schedule
        voice.play();
    }

    agent.run_until_finished(&mut subscription).await;
    if agent.status() != CallStatus::Finished {
        agent.disconnect().await;
    }
    drop(subscription);

    let state = agent.state();
    println!(
        "\n{} {} transcript messages, {} questions asked",
        "Session finished:".bold(),
        state.messages.len(),
        voice.spoken().len()
    );
    if let Some(latest) = state.latest_message() {
        println!("  Last said: {}", truncate_string(latest, 80).dimmed());
    }

    match navigator.last_route() {
        Some(Route::Feedback { interview_id }) => {
            if let Some(report) = build_client(&config).get_feedback(&interview_id).await? {
                println!();
                print_feedback(&report);
            }
        }
        Some(Route::Home) => println!("{}", "Feedback generation failed.".red()),
        None => println!("{}", "No feedback requested.".dimmed()),
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );
    println!(
        "  Telephony URL: {}",
        config.telephony_url.as_deref().unwrap_or("Not set")
    );
    println!(
        "  Default Profile: {}",
        config.default_profile.as_deref().unwrap_or("None").cyan()
    );
    println!("  Profiles: {}", config.profiles.len());

    Ok(())
}
