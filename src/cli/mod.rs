//! Command-line interface for habitmentor
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in their own submodules.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::habit::{Category, Difficulty, Frequency};

mod badges;
mod habits;
mod init;
mod reflect;
mod social;
mod stats;

/// habit - HabitMentor CLI
///
/// Track habits, build streaks, and earn achievements. All state lives in
/// a local data directory; nothing leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "habit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "HABIT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run onboarding: save your profile and seed starter habits
    Init {
        /// Your display name
        #[arg(long)]
        name: Option<String>,

        /// Primary goal, picks the starter habit set
        #[arg(long)]
        goal: Option<Category>,

        /// Preferred daily notification time (HH:MM)
        #[arg(long)]
        notification_time: Option<String>,
    },

    /// Add a new habit
    Add {
        /// Habit name
        name: String,

        /// Category: health, productivity, learning, mindfulness, other
        #[arg(long)]
        category: Option<Category>,

        /// Frequency: daily, weekdays, weekends, weekly
        #[arg(long)]
        frequency: Option<Frequency>,

        /// Reminder time (HH:MM)
        #[arg(long)]
        reminder: Option<String>,

        /// Difficulty: easy, medium, hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Why this habit matters to you
        #[arg(long)]
        motivation: Option<String>,
    },

    /// Toggle a habit's completion for today
    Done {
        /// Habit id
        id: i64,
    },

    /// List habits
    List {
        /// Only habits due today
        #[arg(long)]
        due: bool,

        /// Filter by category
        #[arg(long)]
        category: Option<Category>,
    },

    /// Edit a habit's descriptive fields
    Edit {
        /// Habit id
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<Category>,

        #[arg(long)]
        frequency: Option<Frequency>,

        /// Reminder time (HH:MM)
        #[arg(long)]
        reminder: Option<String>,

        #[arg(long)]
        difficulty: Option<Difficulty>,

        #[arg(long)]
        motivation: Option<String>,
    },

    /// Delete a habit
    Rm {
        /// Habit id
        id: i64,
    },

    /// Run the daily completion reset now
    Reset,

    /// Show completion and streak statistics
    Stats,

    /// Show achievements
    Badges {
        /// Show a single achievement by key (e.g. week-warrior)
        id: Option<String>,
    },

    /// Save a reflection, or list saved ones
    Reflect {
        /// Reflection text
        text: Option<String>,

        /// List saved reflections instead of writing one
        #[arg(long, conflicts_with = "text")]
        list: bool,
    },

    /// Partners, challenges, and nudges
    #[command(subcommand)]
    Social(SocialCommands),

    /// Community tip comments
    #[command(subcommand)]
    Tip(TipCommands),
}

/// Social subcommands
#[derive(Subcommand, Debug)]
pub enum SocialCommands {
    /// Invite an accountability partner
    Partner {
        /// Partner email address
        email: String,
    },

    /// Join a community challenge
    Join {
        /// Challenge id
        challenge: String,
    },

    /// Send a mock nudge to a partner
    Nudge {
        /// Partner email or name
        partner: String,

        /// Message to include
        #[arg(long)]
        message: Option<String>,

        /// Send without revealing your name
        #[arg(long)]
        anonymous: bool,
    },

    /// Print a shareable progress blurb
    Share,
}

/// Tip comment subcommands
#[derive(Subcommand, Debug)]
pub enum TipCommands {
    /// Post a comment on a tip
    Comment {
        /// Tip id
        tip_id: String,

        /// Comment text
        text: String,
    },

    /// List comments on a tip
    Comments {
        /// Tip id
        tip_id: String,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init {
                name,
                goal,
                notification_time,
            } => init::run(init::InitOptions {
                name,
                goal,
                notification_time,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Add {
                name,
                category,
                frequency,
                reminder,
                difficulty,
                motivation,
            } => habits::run_add(habits::AddOptions {
                name,
                category,
                frequency,
                reminder,
                difficulty,
                motivation,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Done { id } => habits::run_done(habits::DoneOptions {
                id,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List { due, category } => habits::run_list(habits::ListOptions {
                due,
                category,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Edit {
                id,
                name,
                category,
                frequency,
                reminder,
                difficulty,
                motivation,
            } => habits::run_edit(habits::EditOptions {
                id,
                name,
                category,
                frequency,
                reminder,
                difficulty,
                motivation,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Rm { id } => habits::run_rm(habits::RmOptions {
                id,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Reset => habits::run_reset(habits::ResetOptions {
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Stats => stats::run(stats::StatsOptions {
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Badges { id } => badges::run(badges::BadgesOptions {
                id,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Reflect { text, list } => reflect::run(reflect::ReflectOptions {
                text,
                list,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Social(cmd) => match cmd {
                SocialCommands::Partner { email } => {
                    social::run_partner(social::PartnerOptions {
                        email,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                SocialCommands::Join { challenge } => social::run_join(social::JoinOptions {
                    challenge,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SocialCommands::Nudge {
                    partner,
                    message,
                    anonymous,
                } => social::run_nudge(social::NudgeOptions {
                    partner,
                    message,
                    anonymous,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                SocialCommands::Share => social::run_share(social::ShareOptions {
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Tip(cmd) => match cmd {
                TipCommands::Comment { tip_id, text } => {
                    social::run_comment(social::CommentOptions {
                        tip_id,
                        text,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                TipCommands::Comments { tip_id } => {
                    social::run_comments(social::CommentsOptions {
                        tip_id,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
            },
        }
    }
}
