use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{encode_segment, EmptyBody, RequestDetails, VictorOpsClient};
use crate::errors::Result;

/// Name/slug reference to a team in schedule responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamRef {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// Name/slug reference to an escalation policy in schedule responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyRef {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// Username reference in schedule responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserRef {
    pub username: Option<String>,
}

/// A manual on-call override within a schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnCallOverride {
    pub orig_on_call_user: UserRef,
    pub override_on_call_user: UserRef,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub policy: PolicyRef,
}

/// One shift change within an on-call entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnCallRoll {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub on_call_user: UserRef,
    pub is_roll: bool,
}

/// One rotation entry of an escalation-policy schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnCallEntry {
    pub on_call_user: UserRef,
    pub override_on_call_user: UserRef,
    pub on_call_type: Option<String>,
    pub rotation_name: Option<String>,
    pub shift_name: Option<String>,
    pub shift_roll: Option<DateTime<Utc>>,
    pub rolls: Vec<OnCallRoll>,
}

/// Schedule and overrides for a single escalation policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicySchedule {
    pub policy: PolicyRef,
    pub schedule: Vec<OnCallEntry>,
    pub overrides: Vec<OnCallOverride>,
}

/// Full on-call schedule for a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamSchedule {
    pub team: TeamRef,
    pub schedules: Vec<PolicySchedule>,
}

/// Every team schedule a single user appears in
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserSchedule {
    pub team_schedules: Vec<TeamSchedule>,
}

/// One user currently on call for a policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnCallUser {
    pub on_call_user: UserRef,
}

/// Who is on call right now for one escalation policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnCallNow {
    pub escalation_policy: PolicyRef,
    pub users: Vec<OnCallUser>,
}

/// Current on-call state of one team
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamOnCall {
    pub team: TeamRef,
    pub on_call_now: Vec<OnCallNow>,
}

/// Current on-call personnel across the whole organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamsOnCall {
    pub teams_on_call: Vec<TeamOnCall>,
}

/// Request to hand the current on-call shift from one user to another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_user: Option<String>,
}

/// Response to a take-on-call request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TakeResponse {
    pub result: Option<String>,
}

fn schedule_query(days_forward: u32, days_skip: u32, step: u32) -> [(&'static str, String); 3] {
    [
        ("daysForward", days_forward.to_string()),
        ("daysSkip", days_skip.to_string()),
        ("step", step.to_string()),
    ]
}

impl VictorOpsClient {
    /// Get all personnel currently on call, across every team
    pub async fn get_on_call_current(&self) -> Result<(TeamsOnCall, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::GET, "v1/oncall/current", &EmptyBody {}, &[])
            .await?;

        let oncall = details.parse()?;
        Ok((oncall, details))
    }

    /// Get a team's on-call schedule over a forward-looking window
    ///
    /// `step` selects the escalation step the window applies to.
    pub async fn get_team_schedule(
        &self,
        team_slug: &str,
        days_forward: u32,
        days_skip: u32,
        step: u32,
    ) -> Result<(TeamSchedule, RequestDetails)> {
        let endpoint = format!("v2/team/{}/oncall/schedule", encode_segment(team_slug));
        let details = self
            .make_public_api_call(
                Method::GET,
                &endpoint,
                &EmptyBody {},
                &schedule_query(days_forward, days_skip, step),
            )
            .await?;

        let schedule = details.parse()?;
        Ok((schedule, details))
    }

    /// Get one user's on-call schedule across their teams
    pub async fn get_user_schedule(
        &self,
        username: &str,
        days_forward: u32,
        days_skip: u32,
        step: u32,
    ) -> Result<(UserSchedule, RequestDetails)> {
        let endpoint = format!("v2/user/{}/oncall/schedule", encode_segment(username));
        let details = self
            .make_public_api_call(
                Method::GET,
                &endpoint,
                &EmptyBody {},
                &schedule_query(days_forward, days_skip, step),
            )
            .await?;

        let schedule = details.parse()?;
        Ok((schedule, details))
    }

    /// Hand the current team on-call shift to another user
    pub async fn take_on_call_for_team(
        &self,
        team_slug: &str,
        request: &TakeRequest,
    ) -> Result<(TakeResponse, RequestDetails)> {
        let endpoint = format!("v1/team/{}/oncall/user", encode_segment(team_slug));
        let details = self
            .make_public_api_call(Method::PATCH, &endpoint, request, &[])
            .await?;

        let take = details.parse()?;
        Ok((take, details))
    }

    /// Hand the current policy on-call shift to another user
    pub async fn take_on_call_for_policy(
        &self,
        policy_slug: &str,
        request: &TakeRequest,
    ) -> Result<(TakeResponse, RequestDetails)> {
        let endpoint = format!("v1/policies/{}/oncall/user", encode_segment(policy_slug));
        let details = self
            .make_public_api_call(Method::PATCH, &endpoint, request, &[])
            .await?;

        let take = details.parse()?;
        Ok((take, details))
    }
}
