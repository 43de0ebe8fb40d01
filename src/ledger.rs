use crate::models::{Poll, PollOption, Snapshot};
use std::sync::Arc;

/// Moves `user_id`'s single vote in `poll_id` to `option_id`; no-ops return `polls` itself.
pub fn apply_vote(polls: &Snapshot, poll_id: &str, option_id: &str, user_id: &str) -> Snapshot {
    let Some(poll_idx) = polls.polls().iter().position(|poll| poll.id == poll_id) else {
        return polls.clone();
    };
    let poll = &polls.polls()[poll_idx];

    let mut target = None;
    let mut source = None;
    for (idx, option) in poll.options.iter().enumerate() {
        if target.is_none() && option.id == option_id {
            target = Some(idx);
        }
        if source.is_none() && option.has_voter(user_id) {
            source = Some(idx);
        }
        if target.is_some() && source.is_some() {
            break;
        }
    }

    let Some(target) = target else {
        return polls.clone();
    };
    if source == Some(target) {
        return polls.clone();
    }

    let mut options: Vec<Arc<PollOption>> = poll.options.to_vec();
    if let Some(source) = source {
        options[source] = Arc::new(without_voter(&options[source], user_id));
    }
    options[target] = Arc::new(with_voter(&options[target], user_id));

    let next_poll = Arc::new(Poll {
        id: poll.id.clone(),
        question: poll.question.clone(),
        options: options.into(),
    });

    let mut next: Vec<Arc<Poll>> = polls.polls().to_vec();
    next[poll_idx] = next_poll;
    Snapshot::from_shared(next.into())
}

/// Option id `user_id` currently holds in `poll`, if any.
pub fn vote_of<'a>(poll: &'a Poll, user_id: &str) -> Option<&'a str> {
    poll.options
        .iter()
        .find(|option| option.has_voter(user_id))
        .map(|option| option.id.as_str())
}

fn without_voter(option: &PollOption, user_id: &str) -> PollOption {
    PollOption {
        id: option.id.clone(),
        text: option.text.clone(),
        votes: option.votes.saturating_sub(1),
        voters: option
            .voters
            .iter()
            .filter(|voter| *voter != user_id)
            .cloned()
            .collect(),
    }
}

fn with_voter(option: &PollOption, user_id: &str) -> PollOption {
    let mut next = option.clone();
    if !next.has_voter(user_id) {
        next.voters.push(user_id.to_string());
        next.votes = next.votes.saturating_add(1);
    }
    next
}
