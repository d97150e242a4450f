use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopdesk_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use shopdesk_events::Event;

/// Purchase request identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseRequestId(pub AggregateId);

impl PurchaseRequestId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PurchaseRequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Purchase request status lifecycle.
///
/// Statuses this crate does not know about deserialize to `Unrecognized`;
/// they are never counted as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseRequestStatus {
    Pending,
    Ordered,
    Received,
    Rejected,
    #[serde(other)]
    Unrecognized,
}

impl PurchaseRequestStatus {
    pub fn is_pending(self) -> bool {
        self == PurchaseRequestStatus::Pending
    }
}

/// Terminal decision taken on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionOutcome {
    Ordered,
    Received,
    Rejected,
}

impl From<ResolutionOutcome> for PurchaseRequestStatus {
    fn from(outcome: ResolutionOutcome) -> Self {
        match outcome {
            ResolutionOutcome::Ordered => PurchaseRequestStatus::Ordered,
            ResolutionOutcome::Received => PurchaseRequestStatus::Received,
            ResolutionOutcome::Rejected => PurchaseRequestStatus::Rejected,
        }
    }
}

/// Aggregate root: PurchaseRequest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    id: PurchaseRequestId,
    item_name: String,
    requested_qty: u64,
    status: PurchaseRequestStatus,
    raised_at: Option<DateTime<Utc>>,
    resolved_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    version: u64,
    #[serde(skip)]
    created: bool,
}

impl PurchaseRequest {
    /// Create an empty, not-yet-raised aggregate instance for rehydration.
    pub fn empty(id: PurchaseRequestId) -> Self {
        Self {
            id,
            item_name: String::new(),
            requested_qty: 0,
            status: PurchaseRequestStatus::Pending,
            raised_at: None,
            resolved_at: None,
            version: 0,
            created: false,
        }
    }

    /// Rebuild a request from a stored snapshot rather than from its events.
    ///
    /// Restored requests start at version 0.
    pub fn restore(
        id: PurchaseRequestId,
        item_name: String,
        requested_qty: u64,
        status: PurchaseRequestStatus,
        raised_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            item_name,
            requested_qty,
            status,
            raised_at,
            resolved_at: None,
            version: 0,
            created: true,
        }
    }

    pub fn id_typed(&self) -> PurchaseRequestId {
        self.id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn requested_qty(&self) -> u64 {
        self.requested_qty
    }

    pub fn status(&self) -> PurchaseRequestStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.created && self.status.is_pending()
    }

    pub fn raised_at(&self) -> Option<DateTime<Utc>> {
        self.raised_at
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }
}

impl AggregateRoot for PurchaseRequest {
    type Id = PurchaseRequestId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RaiseRequest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseRequest {
    pub request_id: PurchaseRequestId,
    pub item_name: String,
    pub requested_qty: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ResolveRequest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub request_id: PurchaseRequestId,
    pub outcome: ResolutionOutcome,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseRequestCommand {
    RaiseRequest(RaiseRequest),
    ResolveRequest(ResolveRequest),
}

/// Event: RequestRaised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRaised {
    pub request_id: PurchaseRequestId,
    pub item_name: String,
    pub requested_qty: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RequestResolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestResolved {
    pub request_id: PurchaseRequestId,
    pub outcome: ResolutionOutcome,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseRequestEvent {
    RequestRaised(RequestRaised),
    RequestResolved(RequestResolved),
}

impl Event for PurchaseRequestEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PurchaseRequestEvent::RequestRaised(_) => "purchasing.request.raised",
            PurchaseRequestEvent::RequestResolved(_) => "purchasing.request.resolved",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PurchaseRequestEvent::RequestRaised(e) => e.occurred_at,
            PurchaseRequestEvent::RequestResolved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for PurchaseRequest {
    type Command = PurchaseRequestCommand;
    type Event = PurchaseRequestEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            PurchaseRequestEvent::RequestRaised(e) => {
                self.id = e.request_id;
                self.item_name = e.item_name.clone();
                self.requested_qty = e.requested_qty;
                self.status = PurchaseRequestStatus::Pending;
                self.raised_at = Some(e.occurred_at);
                self.resolved_at = None;
                self.created = true;
            }
            PurchaseRequestEvent::RequestResolved(e) => {
                self.status = e.outcome.into();
                self.resolved_at = Some(e.occurred_at);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            PurchaseRequestCommand::RaiseRequest(cmd) => self.handle_raise(cmd),
            PurchaseRequestCommand::ResolveRequest(cmd) => self.handle_resolve(cmd),
        }
    }
}

impl PurchaseRequest {
    fn ensure_request_id(&self, request_id: PurchaseRequestId) -> Result<(), DomainError> {
        if self.id != request_id {
            return Err(DomainError::invariant("request_id mismatch"));
        }
        Ok(())
    }

    fn handle_raise(&self, cmd: &RaiseRequest) -> Result<Vec<PurchaseRequestEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("purchase request already exists"));
        }
        if cmd.item_name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if cmd.requested_qty == 0 {
            return Err(DomainError::validation("requested quantity must be positive"));
        }

        Ok(vec![PurchaseRequestEvent::RequestRaised(RequestRaised {
            request_id: cmd.request_id,
            item_name: cmd.item_name.clone(),
            requested_qty: cmd.requested_qty,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_resolve(
        &self,
        cmd: &ResolveRequest,
    ) -> Result<Vec<PurchaseRequestEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_request_id(cmd.request_id)?;

        if !self.status.is_pending() {
            return Err(DomainError::conflict(format!(
                "only pending requests can be resolved (status: {:?})",
                self.status
            )));
        }

        Ok(vec![PurchaseRequestEvent::RequestResolved(RequestResolved {
            request_id: cmd.request_id,
            outcome: cmd.outcome,
            occurred_at: cmd.occurred_at,
        })])
    }
}
