//! User activity records and the newest-first activity log.

#[cfg(test)]
#[path = "activity_test.rs"]
mod activity_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::actor::{ActorType, detect_actor};

/// Well-known `action_type` values. Tracking accepts any string.
pub mod action {
    pub const LOGIN: &str = "LOGIN";
    pub const LOGOUT: &str = "LOGOUT";
    pub const REGISTER: &str = "REGISTER";
    pub const CREATE_PROJECT: &str = "CREATE_PROJECT";
    pub const VIEW_PROJECT: &str = "VIEW_PROJECT";
    pub const DELETE_PROJECT: &str = "DELETE_PROJECT";
    pub const GENERAL: &str = "GENERAL";
}

pub const DEFAULT_PAGE_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub id: String,
    pub user_id: Option<String>,
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_detail: Option<Value>,
    pub ip_address: String,
    pub user_agent: String,
    pub actor_type: ActorType,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Where an activity came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub ip_address: String,
    pub user_agent: String,
}

impl Origin {
    #[must_use]
    pub fn new(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self { ip_address: ip_address.into(), user_agent: user_agent.into() }
    }

    /// Activity raised from inside the process, such as the CLI.
    #[must_use]
    pub fn local() -> Self {
        Self::new("127.0.0.1", concat!("pillarx/", env!("CARGO_PKG_VERSION")))
    }
}

impl UserActivity {
    /// New activity stamped now, classified from the origin's user-agent.
    #[must_use]
    pub fn new(user_id: Option<String>, action_type: &str, action_detail: Option<Value>, origin: &Origin) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            action_type: action_type.to_owned(),
            action_detail,
            ip_address: origin.ip_address.clone(),
            user_agent: origin.user_agent.clone(),
            actor_type: detect_actor(&origin.user_agent),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

// =============================================================================
// LOG
// =============================================================================

/// Slice request for [`ActivityLog::for_user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: DEFAULT_PAGE_LIMIT, offset: 0 }
    }
}

impl Page {
    /// Missing or zero limits fall back to the default page size.
    #[must_use]
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPage {
    pub data: Vec<UserActivity>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<UserActivity>,
}

impl ActivityLog {
    /// Prepend, keeping the log newest first.
    pub fn record(&mut self, activity: UserActivity) -> &UserActivity {
        self.entries.insert(0, activity);
        &self.entries[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserActivity> {
        self.entries.iter()
    }

    /// One user's activities, newest first, sliced by `page`.
    #[must_use]
    pub fn for_user(&self, user_id: &str, page: Page) -> ActivityPage {
        let mut mine: Vec<&UserActivity> =
            self.entries.iter().filter(|a| a.user_id.as_deref() == Some(user_id)).collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = mine.len();
        let data = mine.into_iter().skip(page.offset).take(page.limit).cloned().collect();
        ActivityPage { data, pagination: Pagination { limit: page.limit, offset: page.offset, total } }
    }
}
