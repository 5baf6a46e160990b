//! Mock social and community features.
//!
//! Accountability partners, challenges, nudges, and per-tip comments are
//! optional collaborators with their own storage keys. They call into the
//! achievement evaluator (`social-butterfly`) but have no coupling to the
//! completion engine. Everything here is simulated locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::achievement::{self, AchievementId};
use crate::analytics;
use crate::error::{Error, Result};
use crate::habit::Habit;
use crate::store::Store;

/// An invited accountability partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub email: String,
    pub name: String,
    /// Whether the invite was accepted (always false in the mock)
    pub joined: bool,
    pub date_invited: DateTime<Utc>,
}

/// A posted comment on a community tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub tip_id: String,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a social action that may unlock achievements
#[derive(Debug, Clone)]
pub struct SocialOutcome {
    pub newly_unlocked: Vec<AchievementId>,
}

/// Invite an accountability partner by email.
///
/// The first partner ever added unlocks `social-butterfly`. The partner
/// display name is derived from the email local part.
pub fn add_partner(store: &Store, email: &str, now: DateTime<Utc>) -> Result<SocialOutcome> {
    let email = email.trim();
    let local = valid_email_local_part(email)
        .ok_or_else(|| Error::InvalidInput(format!("not a valid email address: {email}")))?;

    let _lock = store.lock()?;
    let mut partners: Vec<Partner> = store.read_json_or_default(&store.partners_file());
    let first = partners.is_empty();

    partners.push(Partner {
        email: email.to_string(),
        name: local.to_string(),
        joined: false,
        date_invited: now,
    });
    store.write_json(&store.partners_file(), &partners)?;
    info!(email, "partner invited");

    let mut newly_unlocked = Vec::new();
    if first && achievement::unlock(store, AchievementId::SocialButterfly)? {
        newly_unlocked.push(AchievementId::SocialButterfly);
    }
    Ok(SocialOutcome { newly_unlocked })
}

/// All invited partners
pub fn list_partners(store: &Store) -> Vec<Partner> {
    store.read_json_or_default(&store.partners_file())
}

/// Join a community challenge by id.
///
/// The first challenge ever joined unlocks `social-butterfly`. Joining the
/// same challenge twice is a no-op.
pub fn join_challenge(store: &Store, challenge_id: &str) -> Result<SocialOutcome> {
    let challenge_id = challenge_id.trim();
    if challenge_id.is_empty() {
        return Err(Error::InvalidInput("challenge id cannot be empty".to_string()));
    }

    let _lock = store.lock()?;
    let mut challenges: Vec<String> = store.read_json_or_default(&store.challenges_file());
    let first = challenges.is_empty();

    if !challenges.iter().any(|c| c == challenge_id) {
        challenges.push(challenge_id.to_string());
        store.write_json(&store.challenges_file(), &challenges)?;
        info!(challenge_id, "challenge joined");
    }

    let mut newly_unlocked = Vec::new();
    if first && achievement::unlock(store, AchievementId::SocialButterfly)? {
        newly_unlocked.push(AchievementId::SocialButterfly);
    }
    Ok(SocialOutcome { newly_unlocked })
}

/// Joined challenge ids
pub fn list_challenges(store: &Store) -> Vec<String> {
    store.read_json_or_default(&store.challenges_file())
}

/// Post a comment on a community tip. Comments are stored newest first.
pub fn post_comment(
    store: &Store,
    tip_id: &str,
    author: &str,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Comment> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput("comment text cannot be empty".to_string()));
    }

    let _lock = store.lock()?;
    let path = store.comments_file(tip_id);
    let mut comments: Vec<Comment> = store.read_json_or_default(&path);

    let comment = Comment {
        id: now.timestamp_millis(),
        tip_id: tip_id.to_string(),
        author: author.to_string(),
        text: text.to_string(),
        timestamp: now,
    };
    comments.insert(0, comment.clone());
    store.write_json(&path, &comments)?;
    Ok(comment)
}

/// Comments for one tip, newest first
pub fn list_comments(store: &Store, tip_id: &str) -> Vec<Comment> {
    store.read_json_or_default(&store.comments_file(tip_id))
}

/// Shareable progress blurb built from the analytics aggregator
pub fn share_message(habits: &[Habit]) -> String {
    format!(
        "I'm on a {}-day streak with my habits and have completed {}% of today's goals! #HabitMentor",
        analytics::longest_streak(habits),
        analytics::completion_rate(habits),
    )
}

/// Minimal address check: non-empty local part, one `@`, dotted domain,
/// no whitespace. Returns the local part for display-name derivation.
fn valid_email_local_part(email: &str) -> Option<&str> {
    if email.contains(char::is_whitespace) {
        return None;
    }
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    let (host, tld) = domain.rsplit_once('.')?;
    if host.is_empty() || tld.is_empty() {
        return None;
    }
    Some(local)
}
