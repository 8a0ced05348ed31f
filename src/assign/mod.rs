pub mod groups;
pub mod keywords;
pub mod selector;

use thiserror::Error;
use tracing::debug;

use crate::config::{AddAssignees, Config};
use crate::pr::PullRequest;
use groups::select_users_from_groups;
use selector::select_users;

#[derive(Debug, Error)]
pub enum AssignError {
    /// `choose_assignees` must never run while `addAssignees` is
    /// "reviewers"; in that mode the caller reuses the reviewer list.
    #[error("choose_assignees called while addAssignees is \"reviewers\"; the caller must reuse the chosen reviewers")]
    AssigneesFollowReviewers,
}

/// Pick reviewers for the pull request. Uses the review groups when they
/// are enabled and non-empty, the flat reviewer list otherwise. The PR
/// author is always excluded.
pub fn choose_reviewers(config: &Config, pr: &PullRequest) -> Vec<String> {
    let use_groups = config.use_review_groups && !config.review_groups.is_empty();
    debug!(
        key = pr.assign_key(),
        author = %pr.author,
        use_groups,
        count = config.number_of_reviewers,
        "choosing reviewers"
    );

    if use_groups {
        select_users_from_groups(
            pr.assign_key(),
            &pr.author,
            &config.review_groups,
            config.number_of_reviewers,
        )
    } else {
        select_users(
            pr.assign_key(),
            &config.reviewers,
            config.number_of_reviewers,
            &pr.author,
        )
    }
}

/// Pick assignees for the pull request.
///
/// A truthy `addAssignees` flag assigns the PR back to its author. With the
/// flag off, selection runs over the assignee groups when enabled, else over
/// the flat assignee list (falling back to the reviewer list when no
/// assignees are configured), with the assignee count falling back to the
/// reviewer count when absent.
pub fn choose_assignees(config: &Config, pr: &PullRequest) -> Result<Vec<String>, AssignError> {
    match &config.add_assignees {
        AddAssignees::Mode(mode) if mode == "reviewers" => {
            Err(AssignError::AssigneesFollowReviewers)
        }
        AddAssignees::Mode(_) | AddAssignees::Flag(true) => Ok(vec![pr.author.clone()]),
        AddAssignees::Flag(false) => {
            let count = config.assignee_count();
            let use_groups = config.use_assignee_groups && !config.assignee_groups.is_empty();
            debug!(
                key = pr.assign_key(),
                author = %pr.author,
                use_groups,
                count,
                "choosing assignees"
            );

            if use_groups {
                Ok(select_users_from_groups(
                    pr.assign_key(),
                    &pr.author,
                    &config.assignee_groups,
                    count,
                ))
            } else {
                let candidates = if config.assignees.is_empty() {
                    &config.reviewers
                } else {
                    &config.assignees
                };
                Ok(select_users(pr.assign_key(), candidates, count, &pr.author))
            }
        }
    }
}
