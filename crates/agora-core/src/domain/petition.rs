use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Petition entity - a public campaign with a validity window and engagement counters.
///
/// `id` is `None` until the store assigns one on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Petition {
    pub id: Option<i64>,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: Category,
    pub original_url: String,
    pub related_news: Option<String>,
    pub likes_count: i32,
    pub interest_count: i32,
    /// Absent until the external agreement sync has run at least once.
    pub agree_count: Option<i32>,
    pub previous_agree_count: i32,
    pub liked_member_ids: BTreeSet<i64>,
    pub created_at: DateTime<Utc>,
}

impl Petition {
    /// Add or remove a member's like. Returns true when the member now likes
    /// the petition, false when the like was removed.
    pub fn toggle_like(&mut self, member_id: i64) -> bool {
        if self.liked_member_ids.remove(&member_id) {
            self.likes_count -= 1;
            false
        } else {
            self.liked_member_ids.insert(member_id);
            self.likes_count += 1;
            true
        }
    }

    /// A petition is ongoing while its end date has not passed.
    pub fn is_ongoing(&self, today: NaiveDate) -> bool {
        self.end_date >= today
    }

    /// Agreement growth since the previous sync. Only meaningful once the
    /// sync has recorded a baseline, so `None` otherwise.
    pub fn agree_delta(&self) -> Option<i32> {
        if self.previous_agree_count > 0 {
            self.agree_count.map(|c| c - self.previous_agree_count)
        } else {
            None
        }
    }
}
