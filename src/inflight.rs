//! In-flight guard for mutating actions

use std::collections::HashSet;

use crate::model::CommunityId;

/// Mutating actions that may not overlap with an identical pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Join,
    Leave,
    CreatePost,
}

/// Set of `(action, community)` pairs with a request still pending
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    pending: HashSet<(Action, CommunityId)>,
}

impl InFlight {
    /// Mark the pair as pending. Returns `false` if it already was.
    pub fn begin(&mut self, action: Action, id: CommunityId) -> bool {
        let started = self.pending.insert((action, id));
        if !started {
            tracing::debug!(?action, community_id = id, "Ignoring duplicate in-flight request");
        }
        started
    }

    pub fn finish(&mut self, action: Action, id: CommunityId) {
        self.pending.remove(&(action, id));
    }
}
