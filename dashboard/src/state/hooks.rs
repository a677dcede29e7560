//! # Data Hooks
//!
//! One constructor per endpoint the dashboard reads. Each returns an idle
//! `Resource`; the caller decides when to `fetch()`.
//!
//! ```ignore
//! let mut bookings = use_bookings(state.api(), "priya");
//! bookings.fetch();
//! // later, while rendering
//! let view = bookings.snapshot();
//! ```

use shared::{
    Booking, ChildSummary, HomeworkAssignment, HomeworkStatus, LeaderboardEntry, LeaderboardPeriod,
    ParentProfile, StudentProgress, SupportTicket,
};

use crate::io::api::ApiClient;
use crate::state::resource::Resource;

pub fn use_profile(api: &ApiClient) -> Resource<ParentProfile> {
    let api = api.clone();
    Resource::new("profile", move || {
        let api = api.clone();
        async move { api.auth().profile().await }
    })
}

pub fn use_children(api: &ApiClient) -> Resource<Vec<ChildSummary>> {
    let api = api.clone();
    Resource::new("children", move || {
        let api = api.clone();
        async move { api.children().list().await }
    })
}

pub fn use_progress(api: &ApiClient, child_id: &str) -> Resource<StudentProgress> {
    let api = api.clone();
    let child_id = child_id.to_string();
    Resource::new("progress", move || {
        let api = api.clone();
        let child_id = child_id.clone();
        async move { api.progress().for_child(&child_id).await }
    })
}

pub fn use_bookings(api: &ApiClient, child_id: &str) -> Resource<Vec<Booking>> {
    let api = api.clone();
    let child_id = child_id.to_string();
    Resource::new("bookings", move || {
        let api = api.clone();
        let child_id = child_id.clone();
        async move { api.bookings().list(&child_id).await }
    })
}

/// `status: None` lists every assignment
pub fn use_homework(
    api: &ApiClient,
    child_id: &str,
    status: Option<HomeworkStatus>,
) -> Resource<Vec<HomeworkAssignment>> {
    let api = api.clone();
    let child_id = child_id.to_string();
    Resource::new("homework", move || {
        let api = api.clone();
        let child_id = child_id.clone();
        async move { api.homework().list(&child_id, status).await }
    })
}

pub fn use_leaderboard(
    api: &ApiClient,
    period: LeaderboardPeriod,
    limit: Option<u32>,
) -> Resource<Vec<LeaderboardEntry>> {
    let api = api.clone();
    Resource::new("leaderboard", move || {
        let api = api.clone();
        async move { api.leaderboard().get(period, limit).await }
    })
}

pub fn use_support_tickets(api: &ApiClient) -> Resource<Vec<SupportTicket>> {
    let api = api.clone();
    Resource::new("support tickets", move || {
        let api = api.clone();
        async move { api.support().list_tickets().await }
    })
}

pub fn use_support_ticket(api: &ApiClient, ticket_id: &str) -> Resource<SupportTicket> {
    let api = api.clone();
    let ticket_id = ticket_id.to_string();
    Resource::new("support ticket", move || {
        let api = api.clone();
        let ticket_id = ticket_id.clone();
        async move { api.support().get_ticket(&ticket_id).await }
    })
}
