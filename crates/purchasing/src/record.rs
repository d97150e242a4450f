//! Boundary record for purchase requests, in the dashboard's JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_core::{AggregateId, DomainError, DomainResult};

use crate::request::{PurchaseRequest, PurchaseRequestId, PurchaseRequestStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequestRecord {
    #[serde(default)]
    pub id: Option<AggregateId>,
    pub item_name: String,
    pub requested_qty: i64,
    pub status: PurchaseRequestStatus,
    #[serde(default)]
    pub requested_at: Option<DateTime<Utc>>,
}

impl PurchaseRequestRecord {
    pub fn into_request(self) -> DomainResult<PurchaseRequest> {
        if self.item_name.trim().is_empty() {
            return Err(DomainError::validation("itemName cannot be empty"));
        }
        let requested_qty = u64::try_from(self.requested_qty)
            .ok()
            .filter(|qty| *qty > 0)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "requestedQty must be positive (got {})",
                    self.requested_qty
                ))
            })?;

        Ok(PurchaseRequest::restore(
            PurchaseRequestId::new(self.id.unwrap_or_default()),
            self.item_name,
            requested_qty,
            self.status,
            self.requested_at,
        ))
    }
}
