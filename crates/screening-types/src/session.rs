use serde::{Deserialize, Serialize};

use crate::turn::ChatTurn;

/// The persisted form of a widget session: the full turn sequence plus the
/// finished flag. Written wholesale to storage after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub turns: Vec<ChatTurn>,
    pub finished: bool,
}

impl SessionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
