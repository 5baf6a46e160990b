//! habit social and tip command implementations

use std::path::PathBuf;

use chrono::Utc;

use crate::achievement::AchievementId;
use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::social::{self, Comment, Partner};
use crate::store::Store;

/// Options for `habit social partner`
pub struct PartnerOptions {
    pub email: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit social join`
pub struct JoinOptions {
    pub challenge: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit social nudge`
pub struct NudgeOptions {
    pub partner: String,
    pub message: Option<String>,
    pub anonymous: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit social share`
pub struct ShareOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit tip comment`
pub struct CommentOptions {
    pub tip_id: String,
    pub text: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Options for `habit tip comments`
pub struct CommentsOptions {
    pub tip_id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct PartnerReport {
    partners: Vec<Partner>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unlocked: Vec<AchievementId>,
}

#[derive(serde::Serialize)]
struct JoinReport {
    challenges: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unlocked: Vec<AchievementId>,
}

#[derive(serde::Serialize)]
struct NudgeReport {
    partner: String,
    anonymous: bool,
}

#[derive(serde::Serialize)]
struct ShareReport {
    message: String,
}

#[derive(serde::Serialize)]
struct CommentReport {
    comment: Comment,
}

#[derive(serde::Serialize)]
struct CommentsReport {
    tip_id: String,
    comments: Vec<Comment>,
}

pub fn run_partner(options: PartnerOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let outcome = social::add_partner(&store, &options.email, Utc::now())?;

    let mut human = HumanOutput::new(format!("Invitation sent to {}", options.email.trim()));
    push_unlocks(&mut human, &outcome.newly_unlocked);

    let report = PartnerReport {
        partners: social::list_partners(&store),
        unlocked: outcome.newly_unlocked,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "social partner",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_join(options: JoinOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let outcome = social::join_challenge(&store, &options.challenge)?;

    let mut human = HumanOutput::new(format!(
        "You have joined the challenge: {}",
        options.challenge.trim()
    ));
    push_unlocks(&mut human, &outcome.newly_unlocked);

    let report = JoinReport {
        challenges: social::list_challenges(&store),
        unlocked: outcome.newly_unlocked,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "social join",
        &report,
        Some(&human),
    )?;

    Ok(())
}

/// Nudges are simulated: nothing is delivered and nothing persists.
pub fn run_nudge(options: NudgeOptions) -> Result<()> {
    let mut human = HumanOutput::new(format!("Reminder sent to {}", options.partner));
    if let Some(message) = &options.message {
        human.push_detail(format!("message: {message}"));
    }
    if options.anonymous {
        human.push_summary("anonymous", "yes");
    }
    human.push_warning("nudges are local-only; no notification is delivered".to_string());

    let report = NudgeReport {
        partner: options.partner.clone(),
        anonymous: options.anonymous,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "social nudge",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_share(options: ShareOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let habits = store.load_habits();
    let message = social::share_message(&habits);

    let mut human = HumanOutput::new("habit social share");
    human.push_detail(message.clone());

    let report = ShareReport { message };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "social share",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_comment(options: CommentOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let config = Config::load(store.data_dir())?;

    let comment = social::post_comment(
        &store,
        &options.tip_id,
        &config.user.name,
        &options.text,
        Utc::now(),
    )?;

    let mut human = HumanOutput::new(format!("Comment added to tip {}", options.tip_id));
    human.push_summary("author", comment.author.clone());

    let report = CommentReport { comment };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "tip comment",
        &report,
        Some(&human),
    )?;

    Ok(())
}

pub fn run_comments(options: CommentsOptions) -> Result<()> {
    let store = Store::open(options.data_dir)?;
    let comments = social::list_comments(&store, &options.tip_id);

    let mut human = HumanOutput::new(format!(
        "Comments on tip {}: {}",
        options.tip_id,
        comments.len()
    ));
    for comment in &comments {
        human.push_detail(format!(
            "{} ({}): {}",
            comment.author,
            comment.timestamp.format("%Y-%m-%d %H:%M"),
            comment.text
        ));
    }

    let report = CommentsReport {
        tip_id: options.tip_id.clone(),
        comments,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "tip comments",
        &report,
        Some(&human),
    )?;

    Ok(())
}

fn push_unlocks(human: &mut HumanOutput, unlocked: &[AchievementId]) {
    for id in unlocked {
        human.push_detail(format!("Achievement unlocked: {}", id.title()));
    }
}
