//! Human/bot classification from a user-agent string.

use serde::{Deserialize, Serialize};

/// Substrings that mark a user-agent as automated. Matched case-insensitively.
const BOT_PATTERNS: &[&str] = &[
    "bot",
    "spider",
    "crawl",
    "slurp",
    "googlebot",
    "bingbot",
    "headless",
    "selenium",
    "puppeteer",
    "postman",
    "curl",
    "wget",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActorType {
    #[default]
    Human,
    Bot,
}

impl ActorType {
    #[must_use]
    pub const fn is_bot(self) -> bool {
        matches!(self, Self::Bot)
    }
}

/// Classify a user-agent. Metadata only; never used to deny access.
#[must_use]
pub fn detect_actor(user_agent: &str) -> ActorType {
    let ua = user_agent.to_lowercase();
    if BOT_PATTERNS.iter().any(|p| ua.contains(p)) { ActorType::Bot } else { ActorType::Human }
}
