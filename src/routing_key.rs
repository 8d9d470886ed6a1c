use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{EmptyBody, RequestDetails, VictorOpsClient};
use crate::errors::Result;

const ROUTING_KEYS_ENDPOINT: &str = "v1/org/routing-keys";

/// Routing key creation payload
///
/// `targets` holds escalation-policy slugs. Reads come back in a richer
/// shape, see [`RoutingKeyResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
}

/// A routing key as reported by the listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingKeyResponse {
    pub routing_key: Option<String>,
    pub targets: Vec<RoutingKeyResponseTarget>,
}

/// One escalation-policy target of a routing key
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingKeyResponseTarget {
    pub policy_slug: Option<String>,
}

/// Response of the list-all-routing-keys call
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingKeyResponseList {
    pub routing_keys: Vec<RoutingKeyResponse>,
}

impl VictorOpsClient {
    /// Create a routing key in the organization
    pub async fn create_routing_key(
        &self,
        routing_key: &RoutingKey,
    ) -> Result<(RoutingKey, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::POST, ROUTING_KEYS_ENDPOINT, routing_key, &[])
            .await?;

        let created = details.parse()?;
        Ok((created, details))
    }

    /// List every routing key in the organization
    pub async fn get_all_routing_keys(
        &self,
    ) -> Result<(RoutingKeyResponseList, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::GET, ROUTING_KEYS_ENDPOINT, &EmptyBody {}, &[])
            .await?;

        let keys = details.parse()?;
        Ok((keys, details))
    }

    /// Look up a routing key by name
    ///
    /// The API has no by-name endpoint, so this scans the full listing.
    /// `Ok(None)` means no key with that name exists.
    pub async fn get_routing_key(
        &self,
        keyname: &str,
    ) -> Result<(Option<RoutingKeyResponse>, RequestDetails)> {
        let (list, details) = self.get_all_routing_keys().await?;

        let found = list
            .routing_keys
            .into_iter()
            .find(|key| key.routing_key.as_deref() == Some(keyname));

        Ok((found, details))
    }
}
