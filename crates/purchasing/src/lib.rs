//! Purchasing domain module.
//!
//! Purchase requests are raised as PENDING and resolved exactly once by an
//! approver. The analytics layer only reads their status.

pub mod record;
pub mod request;

pub use record::PurchaseRequestRecord;
pub use request::{
    PurchaseRequest, PurchaseRequestCommand, PurchaseRequestEvent, PurchaseRequestId,
    PurchaseRequestStatus, RaiseRequest, RequestRaised, RequestResolved, ResolveRequest,
    ResolutionOutcome,
};
