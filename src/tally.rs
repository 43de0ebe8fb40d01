use crate::ledger::vote_of;
use crate::models::{OptionResult, OverviewResponse, Poll, PollResults, PollSummary, Snapshot};
use crate::session::SessionUser;

pub fn poll_results(poll: &Poll, viewer: Option<&str>) -> PollResults {
    let total_votes = total_votes(poll);
    let top = leading_count(poll);

    let options = poll
        .options
        .iter()
        .map(|option| OptionResult {
            id: option.id.clone(),
            text: option.text.clone(),
            votes: option.votes,
            share: share(option.votes, total_votes),
            leading: top > 0 && option.votes == top,
        })
        .collect();

    PollResults {
        id: poll.id.clone(),
        question: poll.question.clone(),
        total_votes,
        your_vote: viewer.and_then(|user| vote_of(poll, user)).map(str::to_string),
        options,
    }
}

pub fn overview(snapshot: &Snapshot, viewer: Option<&SessionUser>) -> OverviewResponse {
    let viewer_id = viewer.map(|user| user.id.as_str());
    let mut total = 0u64;
    let mut polls_voted = 0usize;
    let mut polls = Vec::with_capacity(snapshot.len());

    for poll in snapshot.polls() {
        let poll_total = total_votes(poll);
        total = total.saturating_add(poll_total);

        if viewer_id.is_some_and(|user| vote_of(poll, user).is_some()) {
            polls_voted += 1;
        }

        let top = leading_count(poll);
        let leader = if top == 0 {
            None
        } else {
            poll.options
                .iter()
                .find(|option| option.votes == top)
                .map(|option| option.text.clone())
        };

        polls.push(PollSummary {
            id: poll.id.clone(),
            question: poll.question.clone(),
            total_votes: poll_total,
            leader,
        });
    }

    OverviewResponse {
        viewer: viewer.map(greeting_name),
        total_polls: snapshot.len(),
        total_votes: total,
        polls_voted,
        polls,
    }
}

fn greeting_name(user: &SessionUser) -> String {
    user.display_name.clone().unwrap_or_else(|| user.id.clone())
}

fn total_votes(poll: &Poll) -> u64 {
    poll.options
        .iter()
        .fold(0u64, |sum, option| sum.saturating_add(option.votes))
}

fn leading_count(poll: &Poll) -> u64 {
    poll.options.iter().map(|option| option.votes).max().unwrap_or(0)
}

fn share(votes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (votes as f64 * 1000.0 / total as f64).round() / 10.0
}
