use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::{encode_segment, EmptyBody, RequestDetails, VictorOpsClient};
use crate::errors::Result;

const POLICIES_ENDPOINT: &str = "v1/policies";

/// One paging target inside an escalation-policy step
///
/// Exactly one of the target maps is populated per entry; the execution
/// type names which one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EscalationPolicyStepEntry {
    pub execution_type: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub user: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub rotation_group: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub webhook: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub email: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub target_policy: HashMap<String, String>,
}

/// One timed step of an escalation policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicySteps {
    pub timeout: u32,
    pub entries: Vec<EscalationPolicyStepEntry>,
}

/// An escalation policy owned by a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicy {
    pub name: String,
    #[serde(rename = "teamSlug")]
    pub team_id: String,
    #[serde(rename = "ignoreCustomPagingPolicies")]
    pub ignore_custom_paging_policies: bool,
    pub steps: Vec<EscalationPolicySteps>,
    #[serde(rename = "slug")]
    pub id: String,
}

/// Name/slug pair of a team or policy in the listing response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EscalationPolicyListDetail {
    pub name: String,
    pub slug: String,
}

/// One policy/team combination in the listing response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EscalationPolicyListElement {
    pub policy: EscalationPolicyListDetail,
    pub team: EscalationPolicyListDetail,
}

/// Response of the list-all-escalation-policies call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EscalationPolicyList {
    pub policies: Vec<EscalationPolicyListElement>,
}

impl VictorOpsClient {
    /// Create an escalation policy
    pub async fn create_escalation_policy(
        &self,
        escalation_policy: &EscalationPolicy,
    ) -> Result<(EscalationPolicy, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::POST, POLICIES_ENDPOINT, escalation_policy, &[])
            .await?;

        let created = details.parse()?;
        Ok((created, details))
    }

    /// List every escalation policy in the organization
    pub async fn get_all_escalation_policies(
        &self,
    ) -> Result<(EscalationPolicyList, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::GET, POLICIES_ENDPOINT, &EmptyBody {}, &[])
            .await?;

        let policies = details.parse()?;
        Ok((policies, details))
    }

    /// Get an escalation policy by its slug
    pub async fn get_escalation_policy(
        &self,
        escalation_policy_id: &str,
    ) -> Result<(EscalationPolicy, RequestDetails)> {
        let endpoint = format!(
            "{POLICIES_ENDPOINT}/{}",
            encode_segment(escalation_policy_id)
        );
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let policy = details.parse()?;
        Ok((policy, details))
    }

    /// Delete an escalation policy by its slug
    pub async fn delete_escalation_policy(
        &self,
        escalation_policy_id: &str,
    ) -> Result<RequestDetails> {
        let endpoint = format!(
            "{POLICIES_ENDPOINT}/{}",
            encode_segment(escalation_policy_id)
        );
        self.make_public_api_call(Method::DELETE, &endpoint, &EmptyBody {}, &[])
            .await
    }
}
