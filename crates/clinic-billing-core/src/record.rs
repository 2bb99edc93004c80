//! Billing record payload.

use serde::{Deserialize, Serialize};

use crate::priority::Priority;

/// One billing entry from the billing service.
///
/// The identifier and priority classification are the only fields this client
/// interprets. Everything else in the payload belongs to the billing service's
/// contract and is preserved untouched in [`extra`](Self::extra) so callers
/// can forward records without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Record identifier assigned by the billing service.
    pub id: i64,
    /// Priority classification of this record.
    pub priority: Priority,
    /// Remaining upstream fields, carried through unmodified.
    #[serde(flatten, skip_serializing_if = "serde_json::Map::is_empty", default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
