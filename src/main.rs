// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prehab-Tracker CLI
//!
//! Local accounts, injury-filtered workouts and progress statistics on top
//! of a directory of JSON documents.

mod cli;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Command, SettingsCommand};
use prehab_tracker::{
    config::Config,
    models::{PreferenceUpdate, SessionState, BODY_PARTS},
    services::WorkoutRun,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment, then apply flags
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    config.log_json |= cli.log_json;

    init_logging(config.log_json)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Starting prehab");

    let app = AppState::open(config)
        .await
        .context("Failed to open record store")?;
    let state = app.sessions.restore().await?;

    run(&app, state, cli.command).await
}

async fn run(app: &AppState, state: SessionState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Register {
            email,
            password,
            name,
        } => {
            let state = app
                .sessions
                .register(email.trim(), &password, name.trim())
                .await?;
            print_session(&state);
        }
        Command::Login { email, password } => {
            let state = app.sessions.authenticate(email.trim(), &password).await?;
            print_session(&state);
        }
        Command::Logout => {
            app.sessions.sign_out().await;
            println!("Signed out");
        }
        Command::Whoami => print_session(&state),
        Command::Profile { name, email } => {
            let state = app
                .sessions
                .update_profile(&state, name.trim(), email.trim())
                .await?;
            print_session(&state);
        }
        Command::Injuries { injuries } => {
            let injuries: Vec<String> = injuries
                .iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect();
            for injury in &injuries {
                if !prehab_tracker::models::injury::is_known_injury(injury) {
                    tracing::warn!(injury = %injury, "Injury is not in the body-part list");
                }
            }
            let state = app.sessions.set_injuries(&state, &injuries).await?;
            print_session(&state);
        }
        Command::BodyParts => {
            for part in BODY_PARTS {
                println!("{:<14} {}", part.key, part.injuries.join(", "));
            }
        }
        Command::Workouts { all } => {
            let mut catalog = app.catalog();
            catalog.load(&state).await?;
            let workouts: Vec<_> = if all {
                catalog.all_workouts().iter().collect()
            } else {
                catalog.workouts()
            };
            for w in workouts {
                println!(
                    "{:>3}  {:<28} {:>3} min  {:?}{}",
                    w.id,
                    w.title,
                    w.duration,
                    w.difficulty,
                    if w.completed { "  [done]" } else { "" }
                );
            }
        }
        Command::Show { id } => {
            let mut catalog = app.catalog();
            catalog.load(&state).await?;
            let workout = catalog
                .find(&id)
                .with_context(|| format!("No workout with id {}", id))?;

            println!("{} ({} min)\n{}\n", workout.title, workout.duration, workout.description);
            let mut run = WorkoutRun::new(workout);
            let mut exercise = run.current();
            while let Some(e) = exercise {
                println!(
                    "{}. {} ({} min): {}",
                    run.step() + 1,
                    e.name,
                    e.duration,
                    e.instructions
                );
                exercise = run.next();
            }
        }
        Command::Complete { id } => {
            let mut catalog = app.catalog();
            catalog.load(&state).await?;
            if catalog.complete_workout(&state, &id).await? {
                println!("Completed workout {}", id);
            } else {
                println!("Nothing to complete for {}", id);
            }
        }
        Command::ResetWorkouts => {
            let mut catalog = app.catalog();
            catalog.reset_workouts(&state).await?;
            println!("Workouts reset");
        }
        Command::Stats { goal } => {
            let mut catalog = app.catalog();
            catalog.load(&state).await?;
            let stats = catalog.progress(Utc::now().date_naive());
            let weekly = stats.weekly_progress(goal.unwrap_or(app.config.weekly_goal));

            println!("{}", serde_json::to_string_pretty(&stats)?);
            println!(
                "Weekly goal: {}/{} ({}%)",
                weekly.completed, weekly.goal, weekly.percent
            );
        }
        Command::Settings { action } => {
            let mut prefs = app.preferences();
            prefs.load(&state).await?;
            let settings = match action {
                SettingsCommand::Show => prefs.settings(),
                SettingsCommand::Set { key, value } => {
                    let update = PreferenceUpdate::from_pair(&key, &value)
                        .with_context(|| format!("Invalid setting {}={}", key, value))?;
                    prefs.update(&state, update).await?
                }
                SettingsCommand::Reset => prefs.reset(&state).await?,
            };
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        Command::DeleteAccount => {
            app.sessions.delete_account(&state).await?;
            println!("Account deleted");
        }
        Command::ResetApp => {
            let state = app.sessions.reset_app_data().await?;
            print_session(&state);
        }
    }
    Ok(())
}

fn print_session(state: &SessionState) {
    match state.session() {
        Some(s) => {
            println!("{} <{}> (id {})", s.name, s.email, s.id);
            if !s.injuries.is_empty() {
                println!("Injuries: {}", s.injuries.join(", "));
            }
        }
        None => println!("Not signed in"),
    }
}

/// Initialize logging on stderr, as JSON lines when requested.
fn init_logging(json: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("prehab_tracker=debug".parse()?)
        .add_directive("info".parse()?);

    if json {
        let format = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true);
        tracing_subscriber::registry().with(filter).with(format).init();
    } else {
        let format = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        tracing_subscriber::registry().with(filter).with(format).init();
    }
    Ok(())
}
