use serde::{Deserialize, Serialize};

use crate::flow::{UserResponse, VariableMap};

/// A serializable snapshot of a navigator's progress.
///
/// Owned exclusively by the navigator and mutated only through its
/// operations; stores persist it whole. `step` increases on every committed
/// mutation and orders snapshots, so an out-of-date write can be told apart
/// from the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorState {
    pub current_group_index: usize,
    pub current_block_index: usize,
    #[serde(default)]
    pub step: u64,
    #[serde(default)]
    pub responses: Vec<UserResponse>,
    #[serde(default)]
    pub variables: VariableMap,
}

impl NavigatorState {
    pub(crate) fn initial() -> Self {
        Self {
            current_group_index: 0,
            current_block_index: 0,
            step: 0,
            responses: Vec::new(),
            variables: VariableMap::default(),
        }
    }
}

impl Default for NavigatorState {
    fn default() -> Self {
        Self::initial()
    }
}

/// A guard against out-of-order transitions.
///
/// The token captures the step counter at issue time; an advance presented
/// with a stale token is discarded, so a delayed timer callback cannot race
/// a user-driven transition that already committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionToken(pub(crate) u64);
