// portfolio-client/src/like.rs
//! Optimistic like/unlike bookkeeping.
//!
//! The displayed state flips as soon as the user acts; the server answer then
//! either confirms it (and supplies the authoritative count) or the flip is
//! undone.

use serde::{Deserialize, Serialize};

/// What the user currently sees on a like button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LikeState {
    pub liked: bool,
    pub count: u64,
}

impl LikeState {
    pub fn new(liked: bool, count: u64) -> Self {
        Self { liked, count }
    }

    /// Flip the state locally and return what it was before
    pub fn toggle(&mut self) -> LikeState {
        let previous = *self;
        if self.liked {
            self.liked = false;
            self.count = self.count.saturating_sub(1);
        } else {
            self.liked = true;
            self.count += 1;
        }
        previous
    }

    /// Undo an optimistic toggle
    pub fn rollback(&mut self, previous: LikeState) {
        *self = previous;
    }

    /// Adopt the server's view after a confirmed toggle
    pub fn reconcile(&mut self, status: &LikeStatus) {
        self.liked = status.liked;
        if let Some(count) = status.likes_count {
            self.count = count;
        }
    }
}

/// Server answer to a like toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeStatus {
    /// Comment likes report it; project likes omit it
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub likes_count: Option<u64>,
}

fn default_success() -> bool {
    true
}
