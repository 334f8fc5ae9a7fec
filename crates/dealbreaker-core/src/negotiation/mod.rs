//! Negotiation draft domain module.
//!
//! Manages the lifecycle of "draft an email" requests, single-clause or
//! bulk, with strict mutual exclusion between the two modes and a
//! last-request-wins policy against stale network responses.

mod coordinator;

pub use coordinator::{
    DraftMode, DraftRequest, DraftTicket, NegotiationCoordinator, BULK_DRAFT_ERROR_TEXT,
    SINGLE_DRAFT_ERROR_TEXT,
};
