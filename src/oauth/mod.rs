//! The Gmail OAuth connect flow: the initiator target, the outcome of the
//! backend's redirect, and the success view's deferred return-home timer.

pub mod flow;
pub mod redirect;

pub use flow::{ConnectError, FlowOutcome, authorize_url};
pub use redirect::{DeferredRedirect, Navigate, REDIRECT_DELAY};
