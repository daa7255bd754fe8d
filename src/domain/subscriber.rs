use chrono::NaiveDateTime;
use serde::Serialize;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_UNSUBSCRIBED: &str = "unsubscribed";

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Subscriber {
    pub id: i32,
    pub email: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Subscriber counts per status.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SubscriberStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub unsubscribed: usize,
}
