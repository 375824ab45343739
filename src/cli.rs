// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command-line interface of the `prehab` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "prehab", about = "Injury-aware rehabilitation workout tracker")]
pub struct Cli {
    /// Directory holding the stored documents
    #[arg(long, env = "PREHAB_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long, env = "PREHAB_LOG_JSON", global = true, default_value = "false")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an account and sign in
    Register {
        email: String,
        password: String,
        name: String,
    },
    /// Sign in
    Login { email: String, password: String },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Change name and email
    Profile { name: String, email: String },
    /// Replace the declared injuries
    Injuries { injuries: Vec<String> },
    /// List body parts and the injuries that can be declared for them
    BodyParts,
    /// List workouts
    Workouts {
        /// Include workouts hidden by the injury filter
        #[arg(long)]
        all: bool,
    },
    /// Walk through a workout's exercises
    Show { id: String },
    /// Mark a workout completed
    Complete { id: String },
    /// Discard workout history and restore the sample catalog
    ResetWorkouts,
    /// Progress statistics
    Stats {
        /// Weekly goal, overriding PREHAB_WEEKLY_GOAL
        #[arg(long)]
        goal: Option<u32>,
    },
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
    /// Delete the signed-in account and its data
    DeleteAccount,
    /// Erase all data and sign in a fresh demo account
    ResetApp,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Set one preference, e.g. `darkMode true` or `units imperial`
    Set { key: String, value: String },
    Reset,
}
