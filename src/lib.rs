//! # VictorOps API
//!
//! A Rust client library for the [VictorOps (Splunk On-Call)](https://victorops.com)
//! public REST API: users, teams, contact methods, escalation policies,
//! routing keys, on-call schedules and incidents.
//!
//! ## Features
//!
//! - One async method per API operation, each mapping to a single HTTP call
//! - Every call returns the decoded shape together with a [`RequestDetails`]
//!   envelope (status code, raw body, request URL/body) for diagnostics
//! - No retries, no caching, no hidden state; the client is cheap to clone
//!   and safe to share across tasks
//!
//! ## Example
//!
//! ```rust,no_run
//! use victorops_api::VictorOpsClient;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VictorOpsClient::new(
//!         "my-api-id",
//!         "my-api-key",
//!         Url::parse("https://api.victorops.com")?,
//!     )?;
//!
//!     let (incidents, _) = client.get_incidents().await?;
//!     for incident in incidents.incidents {
//!         println!(
//!             "#{} {}",
//!             incident.incident_number.unwrap_or_default(),
//!             incident.entity_display_name.unwrap_or_default(),
//!         );
//!     }
//!
//!     let (response, _) = client.ack_incidents("jdoe", &[42], "looking into it").await?;
//!     println!("acked {} incidents", response.results.len());
//!     Ok(())
//! }
//! ```
//!
//! The remote API reports application-level failures (e.g. "name
//! unavailable") as HTTP 200 bodies with an `"error"` field; those decode
//! into empty shapes and are not turned into errors here. Check the
//! envelope's status code and the decoded shape yourself when it matters.

mod client;
mod contact;
mod errors;
mod incident;
mod oncall;
mod policy;
mod routing_key;
mod team;
mod user;

pub use client::{RequestDetails, VictorOpsClient, API_ID_HEADER, API_KEY_HEADER};
pub use contact::{AllContactResponse, Contact, ContactGroup, ContactType};
pub use errors::{Result, VictorOpsError};
pub use incident::{
    Incident, IncidentAction, IncidentActionResponse, IncidentResponse, PagedEntity, PagedPolicy,
    Transition,
};
pub use oncall::{
    OnCallEntry, OnCallNow, OnCallOverride, OnCallRoll, OnCallUser, PolicyRef, PolicySchedule,
    TakeRequest, TakeResponse, TeamOnCall, TeamRef, TeamSchedule, TeamsOnCall, UserRef,
    UserSchedule,
};
pub use policy::{
    EscalationPolicy, EscalationPolicyList, EscalationPolicyListDetail,
    EscalationPolicyListElement, EscalationPolicyStepEntry, EscalationPolicySteps,
};
pub use routing_key::{
    RoutingKey, RoutingKeyResponse, RoutingKeyResponseList, RoutingKeyResponseTarget,
};
pub use team::{Admin, Team, TeamAdmins, TeamMembers};
pub use user::{User, UserList, UserListV2};
