use crate::errors::AppError;
use crate::ledger::apply_vote;
use crate::models::{OverviewResponse, PollResults, VoteRequest, VoteResponse};
use crate::session::{CurrentUser, MaybeUser};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::tally::{overview, poll_results};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

pub async fn list_polls(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> Json<Vec<PollResults>> {
    let snapshot = state.data.lock().await.polls.clone();
    let viewer = viewer.as_ref().map(|user| user.id.as_str());
    Json(
        snapshot
            .polls()
            .iter()
            .map(|poll| poll_results(poll, viewer))
            .collect(),
    )
}

pub async fn get_poll(
    State(state): State<AppState>,
    Path(poll_id): Path<String>,
    MaybeUser(viewer): MaybeUser,
) -> Result<Json<PollResults>, AppError> {
    let snapshot = state.data.lock().await.polls.clone();
    let poll = snapshot
        .get(&poll_id)
        .ok_or_else(|| AppError::not_found(format!("unknown poll '{poll_id}'")))?;
    let viewer = viewer.as_ref().map(|user| user.id.as_str());
    Ok(Json(poll_results(poll, viewer)))
}

pub async fn get_overview(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> Json<OverviewResponse> {
    let snapshot = state.data.lock().await.polls.clone();
    Json(overview(&snapshot, viewer.as_ref()))
}

pub async fn vote(
    State(state): State<AppState>,
    Path(poll_id): Path<String>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    let option_id = payload.option_id.trim();
    if option_id.is_empty() {
        return Err(AppError::bad_request("option_id must not be empty"));
    }

    let mut data = state.data.lock().await;
    let current = data.polls.clone();
    let next = apply_vote(&current, &poll_id, option_id, &user.id);

    if next.same_as(&current) {
        let poll = current
            .get(&poll_id)
            .ok_or_else(|| AppError::not_found(format!("unknown poll '{poll_id}'")))?;
        if !poll.options.iter().any(|option| option.id == option_id) {
            return Err(AppError::bad_request(format!(
                "poll '{poll_id}' has no option '{option_id}'"
            )));
        }
        return Ok(Json(VoteResponse {
            applied: false,
            poll: poll_results(poll, Some(&user.id)),
        }));
    }

    data.polls = next;
    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.polls = current;
        return Err(err);
    }
    info!(poll = %poll_id, option = %option_id, user = %user.id, "vote recorded");

    let poll = data
        .polls
        .get(&poll_id)
        .ok_or_else(|| AppError::not_found(format!("unknown poll '{poll_id}'")))?;
    Ok(Json(VoteResponse {
        applied: true,
        poll: poll_results(poll, Some(&user.id)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppData, Poll, PollOption, Snapshot};
    use crate::session::{SessionUser, TokenSessions};
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn state_with_data_path(data_path: std::path::PathBuf) -> AppState {
        let polls = Snapshot::new(vec![Poll::new(
            "p1",
            "Lunch?",
            vec![PollOption {
                id: "a".into(),
                text: "Tacos".into(),
                votes: 0,
                voters: Vec::new(),
            }],
        )]);
        AppState::new(data_path, AppData { polls }, Arc::new(TokenSessions::new()))
    }

    fn voter() -> CurrentUser {
        CurrentUser(SessionUser {
            id: "u1".into(),
            display_name: None,
        })
    }

    #[tokio::test]
    async fn failed_persist_keeps_previous_snapshot() {
        // A directory cannot be written as a file, so persisting fails.
        let state = state_with_data_path(std::env::temp_dir());
        let before = state.data.lock().await.polls.clone();

        let result = vote(
            State(state.clone()),
            Path("p1".to_string()),
            voter(),
            Json(VoteRequest { option_id: "a".into() }),
        )
        .await;

        let err = result.err().expect("vote should fail");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        let after = state.data.lock().await.polls.clone();
        assert!(after.same_as(&before));
        assert_eq!(after.get("p1").unwrap().options[0].votes, 0);
    }

    #[tokio::test]
    async fn repeat_vote_skips_persist() {
        let state = state_with_data_path(std::env::temp_dir());
        {
            let mut data = state.data.lock().await;
            data.polls = apply_vote(&data.polls, "p1", "a", "u1");
        }

        // The data path is unwritable, so success proves nothing was written.
        let Json(response) = vote(
            State(state.clone()),
            Path("p1".to_string()),
            voter(),
            Json(VoteRequest { option_id: "a".into() }),
        )
        .await
        .expect("repeat vote should succeed");

        assert!(!response.applied);
        assert_eq!(response.poll.your_vote.as_deref(), Some("a"));
    }
}
