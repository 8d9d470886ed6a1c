use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{EmptyBody, RequestDetails, VictorOpsClient};
use crate::errors::Result;

const INCIDENTS_ENDPOINT: &str = "v1/incidents";

/// Reference to a paged policy or team inside an incident
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PagedEntity {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// Policy/team pair an incident paged out to
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PagedPolicy {
    pub policy: PagedEntity,
    pub team: PagedEntity,
}

/// One state change of an incident
///
/// Most keys on this entity are capitalized on the wire; `alertId` and
/// `alertUrl` are the exceptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Transition {
    pub name: Option<String>,
    pub at: Option<DateTime<Utc>>,
    pub message: Option<String>,
    pub by: Option<String>,
    pub manually: bool,
    #[serde(rename = "alertId")]
    pub alert_id: Option<String>,
    #[serde(rename = "alertUrl")]
    pub alert_url: Option<String>,
}

/// An incident in the VictorOps timeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Incident {
    pub alert_count: Option<u32>,
    pub current_phase: Option<String>,
    pub entity_display_name: Option<String>,
    pub entity_id: Option<String>,
    pub entity_state: Option<String>,
    pub entity_type: Option<String>,
    pub host: Option<String>,
    pub incident_number: Option<String>,
    pub last_alert_id: Option<String>,
    pub last_alert_time: Option<DateTime<Utc>>,
    pub service: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub paged_teams: Vec<String>,
    pub paged_users: Vec<String>,
    pub paged_policies: Vec<PagedPolicy>,
    #[serde(rename = "Transitions")]
    pub transitions: Vec<Transition>,
}

/// Listing of currently open, acknowledged and recently resolved incidents
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IncidentResponse {
    pub incidents: Vec<Incident>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IncidentActionRequest<'a> {
    user_name: &'a str,
    incident_names: Vec<String>,
    message: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IncidentActionByUserRequest<'a> {
    user_name: &'a str,
    message: &'a str,
}

/// Outcome of an ack/resolve command for a single incident
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IncidentAction {
    pub incident_number: Option<String>,
    pub entity_id: Option<String>,
    pub cmd_accepted: Option<bool>,
    pub message: Option<String>,
}

/// Per-incident outcomes of an ack/resolve request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IncidentActionResponse {
    pub results: Vec<IncidentAction>,
}

impl VictorOpsClient {
    /// Get a single incident by its number
    pub async fn get_incident(&self, incident_id: u64) -> Result<(Incident, RequestDetails)> {
        let endpoint = format!("{INCIDENTS_ENDPOINT}/{incident_id}");
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let incident = details.parse()?;
        Ok((incident, details))
    }

    /// List currently open, acknowledged and recently resolved incidents
    pub async fn get_incidents(&self) -> Result<(IncidentResponse, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::GET, INCIDENTS_ENDPOINT, &EmptyBody {}, &[])
            .await?;

        let incidents = details.parse()?;
        Ok((incidents, details))
    }

    async fn act_on_incidents(
        &self,
        what: &str,
        user_name: &str,
        incidents: &[u64],
        message: &str,
    ) -> Result<(IncidentActionResponse, RequestDetails)> {
        let request = IncidentActionRequest {
            user_name,
            incident_names: incidents.iter().map(u64::to_string).collect(),
            message,
        };
        let endpoint = format!("{INCIDENTS_ENDPOINT}/{what}");
        let details = self
            .make_public_api_call(Method::PATCH, &endpoint, &request, &[])
            .await?;

        let response = details.parse()?;
        Ok((response, details))
    }

    async fn act_on_incidents_by_user(
        &self,
        what: &str,
        user_name: &str,
        message: &str,
    ) -> Result<(IncidentActionResponse, RequestDetails)> {
        let request = IncidentActionByUserRequest { user_name, message };
        let endpoint = format!("{INCIDENTS_ENDPOINT}/byUser/{what}");
        let details = self
            .make_public_api_call(Method::PATCH, &endpoint, &request, &[])
            .await?;

        let response = details.parse()?;
        Ok((response, details))
    }

    /// Acknowledge a list of incidents on behalf of a user
    pub async fn ack_incidents(
        &self,
        user_name: &str,
        incidents: &[u64],
        message: &str,
    ) -> Result<(IncidentActionResponse, RequestDetails)> {
        self.act_on_incidents("ack", user_name, incidents, message)
            .await
    }

    /// Resolve a list of incidents on behalf of a user
    pub async fn resolve_incidents(
        &self,
        user_name: &str,
        incidents: &[u64],
        message: &str,
    ) -> Result<(IncidentActionResponse, RequestDetails)> {
        self.act_on_incidents("resolve", user_name, incidents, message)
            .await
    }

    /// Acknowledge every incident the user was paged for
    pub async fn ack_incidents_by_user(
        &self,
        user_name: &str,
        message: &str,
    ) -> Result<(IncidentActionResponse, RequestDetails)> {
        self.act_on_incidents_by_user("ack", user_name, message).await
    }

    /// Resolve every incident the user was paged for
    pub async fn resolve_incidents_by_user(
        &self,
        user_name: &str,
        message: &str,
    ) -> Result<(IncidentActionResponse, RequestDetails)> {
        self.act_on_incidents_by_user("resolve", user_name, message)
            .await
    }
}
