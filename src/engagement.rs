//! Engagement (like/dislike) reconciliation
//!
//! A small explicit state machine per (entity, user) pair with an optimistic
//! tracker that distinguishes pending local changes from server-confirmed
//! state, so a partially failed two-call switch rolls back deterministically.
//!
//! ## Table of Contents
//! - **Reaction / EngagementState**: the machine's alphabet and states
//! - **Engagement**: the membership record itself
//! - **TogglePlan**: remote operations required by a requested toggle
//! - **EngagementTracker**: optimistic per-entity reconciliation

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user reaction on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    /// Like / upvote
    Like,
    /// Dislike / downvote
    Dislike,
}

impl Reaction {
    /// The mirrored reaction
    pub fn opposite(&self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

/// Per-user engagement state derived from membership lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementState {
    /// In neither list
    Neutral,
    /// In the likes list
    Liked,
    /// In the dislikes list
    Disliked,
}

/// Membership record of user ids per reaction type.
///
/// Invariant: a user id appears in at most one of the two lists; every
/// mutation path below maintains this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    /// Users who liked / upvoted
    #[serde(default, alias = "upvotes")]
    pub likes: Vec<String>,
    /// Users who disliked / downvoted
    #[serde(default, alias = "downvotes")]
    pub dislikes: Vec<String>,
}

impl Engagement {
    /// State of a user against this record
    pub fn state_of(&self, user_id: &str) -> EngagementState {
        if self.likes.iter().any(|id| id == user_id) {
            EngagementState::Liked
        } else if self.dislikes.iter().any(|id| id == user_id) {
            EngagementState::Disliked
        } else {
            EngagementState::Neutral
        }
    }

    /// Add a reaction for a user, removing any opposite membership
    pub fn add(&mut self, user_id: &str, reaction: Reaction) {
        self.remove(user_id, reaction.opposite());
        let list = self.list_mut(reaction);
        if !list.iter().any(|id| id == user_id) {
            list.push(user_id.to_string());
        }
    }

    /// Remove a reaction for a user
    pub fn remove(&mut self, user_id: &str, reaction: Reaction) {
        self.list_mut(reaction).retain(|id| id != user_id);
    }

    /// Remove the user from both lists
    pub fn clear(&mut self, user_id: &str) {
        self.likes.retain(|id| id != user_id);
        self.dislikes.retain(|id| id != user_id);
    }

    fn list_mut(&mut self, reaction: Reaction) -> &mut Vec<String> {
        match reaction {
            Reaction::Like => &mut self.likes,
            Reaction::Dislike => &mut self.dislikes,
        }
    }
}

/// Remote operations a requested toggle requires.
///
/// A switch (liked → disliked or the reverse) needs the old reaction removed
/// and the new one added; a plain toggle needs one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TogglePlan {
    /// Reaction to remove remotely, if any
    pub remove: Option<Reaction>,
    /// Reaction to add remotely, if any
    pub add: Option<Reaction>,
}

impl TogglePlan {
    /// State the entity reaches for the user once the whole plan confirms
    pub fn resulting_state(&self) -> EngagementState {
        match self.add {
            Some(Reaction::Like) => EngagementState::Liked,
            Some(Reaction::Dislike) => EngagementState::Disliked,
            None => EngagementState::Neutral,
        }
    }
}

/// Plan the remote operations for a requested reaction from a current state.
pub fn plan_toggle(current: EngagementState, requested: Reaction) -> TogglePlan {
    match (current, requested) {
        (EngagementState::Neutral, r) => TogglePlan {
            remove: None,
            add: Some(r),
        },
        (EngagementState::Liked, Reaction::Like) => TogglePlan {
            remove: Some(Reaction::Like),
            add: None,
        },
        (EngagementState::Disliked, Reaction::Dislike) => TogglePlan {
            remove: Some(Reaction::Dislike),
            add: None,
        },
        (EngagementState::Liked, Reaction::Dislike) => TogglePlan {
            remove: Some(Reaction::Like),
            add: Some(Reaction::Dislike),
        },
        (EngagementState::Disliked, Reaction::Like) => TogglePlan {
            remove: Some(Reaction::Dislike),
            add: Some(Reaction::Like),
        },
    }
}

#[derive(Debug, Clone)]
struct PendingToggle {
    user_id: String,
    plan: TogglePlan,
}

#[derive(Debug, Clone, Default)]
struct Tracked {
    confirmed: Engagement,
    pending: Option<PendingToggle>,
}

/// Optimistic engagement tracker keyed by entity id.
///
/// `confirmed` always mirrors the last server-acknowledged record; a pending
/// toggle is layered on top for display and is folded in, partially applied,
/// or dropped depending on how its remote calls resolve.
#[derive(Default)]
pub struct EngagementTracker {
    entries: DashMap<String, Tracked>,
}

impl EngagementTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace confirmed state with a server-authoritative record.
    ///
    /// Any pending toggle is dropped: a refetch supersedes optimism.
    pub fn sync(&self, entity_id: &str, server: Engagement) {
        let mut entry = self.entries.entry(entity_id.to_string()).or_default();
        entry.confirmed = server;
        entry.pending = None;
    }

    /// Optimistic view: confirmed state with any pending toggle applied
    pub fn view(&self, entity_id: &str) -> Engagement {
        let Some(entry) = self.entries.get(entity_id) else {
            return Engagement::default();
        };
        let mut view = entry.confirmed.clone();
        if let Some(pending) = &entry.pending {
            apply_plan(&mut view, &pending.user_id, pending.plan);
        }
        view
    }

    /// User state in the optimistic view
    pub fn state_of(&self, entity_id: &str, user_id: &str) -> EngagementState {
        self.view(entity_id).state_of(user_id)
    }

    /// Begin a toggle for a user action.
    ///
    /// Returns the remote operations to invoke, or `None` while a previous
    /// toggle on the entity is still unresolved (duplicate-submission guard).
    pub fn begin(&self, entity_id: &str, user_id: &str, requested: Reaction) -> Option<TogglePlan> {
        let mut entry = self.entries.entry(entity_id.to_string()).or_default();
        if entry.pending.is_some() {
            debug!(entity_id, "toggle already in flight, ignoring");
            return None;
        }
        let plan = plan_toggle(entry.confirmed.state_of(user_id), requested);
        entry.pending = Some(PendingToggle {
            user_id: user_id.to_string(),
            plan,
        });
        Some(plan)
    }

    /// Every planned remote call succeeded: fold the toggle into confirmed
    pub fn confirm(&self, entity_id: &str) {
        let Some(mut entry) = self.entries.get_mut(entity_id) else {
            return;
        };
        if let Some(pending) = entry.pending.take() {
            let user_id = pending.user_id.clone();
            apply_plan(&mut entry.confirmed, &user_id, pending.plan);
        }
    }

    /// The removal half of a switch succeeded but the addition failed.
    ///
    /// Confirmed state reflects only what the server acknowledged; the
    /// optimistic addition is discarded rather than guessed at.
    pub fn confirm_removal_only(&self, entity_id: &str) {
        let Some(mut entry) = self.entries.get_mut(entity_id) else {
            return;
        };
        if let Some(pending) = entry.pending.take() {
            if let Some(removed) = pending.plan.remove {
                entry.confirmed.remove(&pending.user_id, removed);
            }
        }
    }

    /// No remote call succeeded: drop the pending toggle entirely
    pub fn rollback(&self, entity_id: &str) {
        if let Some(mut entry) = self.entries.get_mut(entity_id) {
            entry.pending = None;
        }
    }

    /// Last server-confirmed record for an entity
    pub fn confirmed(&self, entity_id: &str) -> Engagement {
        self.entries
            .get(entity_id)
            .map(|e| e.confirmed.clone())
            .unwrap_or_default()
    }
}

/// Drive a toggle end to end: plan, invoke the remote call(s), reconcile.
///
/// `send` performs one remote toggle call for a reaction. A switch invokes
/// it twice (old reaction off, new reaction on); when the second call fails
/// the tracker keeps only the server-confirmed removal, and when the first
/// fails nothing is kept. Returns the reconciled optimistic record.
pub async fn execute_toggle<F, Fut>(
    tracker: &EngagementTracker,
    entity_id: &str,
    user_id: &str,
    requested: Reaction,
    mut send: F,
) -> crate::error::Result<Engagement>
where
    F: FnMut(Reaction) -> Fut,
    Fut: std::future::Future<Output = crate::error::Result<()>>,
{
    let Some(plan) = tracker.begin(entity_id, user_id, requested) else {
        // A toggle is already in flight; report the current view unchanged
        return Ok(tracker.view(entity_id));
    };

    if let Some(old) = plan.remove {
        if let Err(e) = send(old).await {
            tracker.rollback(entity_id);
            return Err(e);
        }
    }

    if let Some(new) = plan.add {
        if let Err(e) = send(new).await {
            if plan.remove.is_some() {
                tracker.confirm_removal_only(entity_id);
            } else {
                tracker.rollback(entity_id);
            }
            return Err(e);
        }
    }

    tracker.confirm(entity_id);
    Ok(tracker.view(entity_id))
}

fn apply_plan(record: &mut Engagement, user_id: &str, plan: TogglePlan) {
    if let Some(removed) = plan.remove {
        record.remove(user_id, removed);
    }
    if let Some(added) = plan.add {
        record.add(user_id, added);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(likes: &[&str], dislikes: &[&str]) -> Engagement {
        Engagement {
            likes: likes.iter().map(|s| s.to_string()).collect(),
            dislikes: dislikes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_state_derivation() {
        let rec = record(&["a"], &["b"]);
        assert_eq!(rec.state_of("a"), EngagementState::Liked);
        assert_eq!(rec.state_of("b"), EngagementState::Disliked);
        assert_eq!(rec.state_of("c"), EngagementState::Neutral);
    }

    #[test]
    fn test_toggle_plans() {
        // Neutral picks up the requested reaction with nothing to remove
        let plan = plan_toggle(EngagementState::Neutral, Reaction::Like);
        assert_eq!(plan, TogglePlan { remove: None, add: Some(Reaction::Like) });

        // Repeating the active reaction toggles it off
        let plan = plan_toggle(EngagementState::Liked, Reaction::Like);
        assert_eq!(plan, TogglePlan { remove: Some(Reaction::Like), add: None });
        assert_eq!(plan.resulting_state(), EngagementState::Neutral);

        // Switching removes the old reaction and adds the new one
        let plan = plan_toggle(EngagementState::Liked, Reaction::Dislike);
        assert_eq!(
            plan,
            TogglePlan { remove: Some(Reaction::Like), add: Some(Reaction::Dislike) }
        );
        assert_eq!(plan.resulting_state(), EngagementState::Disliked);
    }

    #[test]
    fn test_mutual_exclusivity_over_any_sequence() {
        let mut rec = Engagement::default();
        let sequence = [
            Reaction::Like,
            Reaction::Like,
            Reaction::Dislike,
            Reaction::Like,
            Reaction::Dislike,
            Reaction::Dislike,
        ];
        for reaction in sequence {
            let plan = plan_toggle(rec.state_of("u"), reaction);
            apply_plan(&mut rec, "u", plan);

            let in_likes = rec.likes.iter().filter(|id| *id == "u").count();
            let in_dislikes = rec.dislikes.iter().filter(|id| *id == "u").count();
            assert!(in_likes + in_dislikes <= 1, "exclusivity violated");
        }
    }

    #[test]
    fn test_double_like_returns_to_neutral() {
        let mut rec = Engagement::default();
        for _ in 0..2 {
            let plan = plan_toggle(rec.state_of("u"), Reaction::Like);
            apply_plan(&mut rec, "u", plan);
        }
        assert_eq!(rec.state_of("u"), EngagementState::Neutral);
    }

    #[test]
    fn test_tracker_confirm_flow() {
        let tracker = EngagementTracker::new();
        tracker.sync("t-1", record(&[], &[]));

        let plan = tracker.begin("t-1", "u", Reaction::Like).unwrap();
        assert_eq!(plan.add, Some(Reaction::Like));

        // Optimistic view already shows the like; confirmed does not
        assert_eq!(tracker.state_of("t-1", "u"), EngagementState::Liked);
        assert_eq!(tracker.confirmed("t-1").state_of("u"), EngagementState::Neutral);

        tracker.confirm("t-1");
        assert_eq!(tracker.confirmed("t-1").state_of("u"), EngagementState::Liked);
    }

    #[test]
    fn test_tracker_guards_duplicate_submission() {
        let tracker = EngagementTracker::new();
        assert!(tracker.begin("t-1", "u", Reaction::Like).is_some());
        assert!(tracker.begin("t-1", "u", Reaction::Dislike).is_none());

        tracker.rollback("t-1");
        assert!(tracker.begin("t-1", "u", Reaction::Dislike).is_some());
    }

    #[test]
    fn test_partial_switch_keeps_confirmed_server_state() {
        let tracker = EngagementTracker::new();
        tracker.sync("t-1", record(&["u"], &[]));

        // Switch like -> dislike; the remove call lands, the add call fails
        let plan = tracker.begin("t-1", "u", Reaction::Dislike).unwrap();
        assert_eq!(plan.remove, Some(Reaction::Like));
        assert_eq!(plan.add, Some(Reaction::Dislike));

        tracker.confirm_removal_only("t-1");
        let confirmed = tracker.confirmed("t-1");
        assert_eq!(confirmed.state_of("u"), EngagementState::Neutral);
        assert!(confirmed.dislikes.is_empty());
    }

    #[test]
    fn test_rollback_restores_confirmed_view() {
        let tracker = EngagementTracker::new();
        tracker.sync("t-1", record(&["u"], &[]));

        tracker.begin("t-1", "u", Reaction::Dislike).unwrap();
        assert_eq!(tracker.state_of("t-1", "u"), EngagementState::Disliked);

        tracker.rollback("t-1");
        assert_eq!(tracker.state_of("t-1", "u"), EngagementState::Liked);
    }

    #[test]
    fn test_sync_supersedes_pending() {
        let tracker = EngagementTracker::new();
        tracker.begin("t-1", "u", Reaction::Like).unwrap();

        tracker.sync("t-1", record(&[], &["u"]));
        assert_eq!(tracker.state_of("t-1", "u"), EngagementState::Disliked);

        // The entity accepts new toggles after a sync
        assert!(tracker.begin("t-1", "u", Reaction::Like).is_some());
    }

    #[tokio::test]
    async fn test_execute_toggle_switch_happy_path() {
        let tracker = EngagementTracker::new();
        tracker.sync("t-1", record(&["u"], &[]));

        let calls = std::sync::Mutex::new(Vec::new());
        let result = execute_toggle(&tracker, "t-1", "u", Reaction::Dislike, |r| {
            calls.lock().unwrap().push(r);
            async { Ok(()) }
        })
        .await
        .unwrap();

        assert_eq!(*calls.lock().unwrap(), vec![Reaction::Like, Reaction::Dislike]);
        assert_eq!(result.state_of("u"), EngagementState::Disliked);
        assert_eq!(tracker.confirmed("t-1").state_of("u"), EngagementState::Disliked);
    }

    #[tokio::test]
    async fn test_execute_toggle_second_call_failure_keeps_removal() {
        let tracker = EngagementTracker::new();
        tracker.sync("t-1", record(&["u"], &[]));

        let err = execute_toggle(&tracker, "t-1", "u", Reaction::Dislike, |r| async move {
            match r {
                Reaction::Like => Ok(()),
                Reaction::Dislike => Err(crate::error::ApiError::network()),
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::NetworkError);
        let confirmed = tracker.confirmed("t-1");
        assert_eq!(confirmed.state_of("u"), EngagementState::Neutral);
        assert!(confirmed.dislikes.is_empty());
    }

    #[tokio::test]
    async fn test_execute_toggle_first_call_failure_rolls_back() {
        let tracker = EngagementTracker::new();
        tracker.sync("t-1", record(&["u"], &[]));

        execute_toggle(&tracker, "t-1", "u", Reaction::Dislike, |_| async {
            Err(crate::error::ApiError::network())
        })
        .await
        .unwrap_err();

        assert_eq!(tracker.confirmed("t-1").state_of("u"), EngagementState::Liked);
        assert_eq!(tracker.state_of("t-1", "u"), EngagementState::Liked);
    }

    #[test]
    fn test_wire_aliases_for_vote_lists() {
        let rec: Engagement =
            serde_json::from_str(r#"{"upvotes": ["a"], "downvotes": ["b"]}"#).unwrap();
        assert_eq!(rec, record(&["a"], &["b"]));
    }
}
