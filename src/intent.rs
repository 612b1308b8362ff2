use serde::{Deserialize, Serialize};

use crate::bidding::BidDecision;

/// A player action as sent by a client, already authenticated to a seat by the transport.
///
/// ```
/// use doudizhu_rs::intent::Intent;
///
/// let intent: Intent = serde_json::from_str(r#"{"type":"play","cardIndices":[0,4]}"#).unwrap();
/// assert_eq!(intent, Intent::Play { card_indices: vec![0, 4] });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Intent {
    Bid {
        decision: BidDecision,
    },
    Play {
        #[serde(rename = "cardIndices")]
        card_indices: Vec<usize>,
    },
    Pass,
    Restart,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Bid { .. } => "bid",
            Intent::Play { .. } => "play",
            Intent::Pass => "pass",
            Intent::Restart => "restart",
        }
    }
}
