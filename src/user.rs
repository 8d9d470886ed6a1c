use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{encode_segment, EmptyBody, RequestDetails, VictorOpsClient};
use crate::contact::Contact;
use crate::errors::Result;

const USER_V1_ENDPOINT: &str = "v1/user";
const USER_V2_ENDPOINT: &str = "v2/user";

/// A user in the VictorOps organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    /// Hours until the invite expires, only meaningful on create
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// Response shape of the v1 user listing
///
/// The v1 endpoint nests users inside an extra list level; this is the
/// wire shape, not a client invention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserList {
    pub users: Vec<Vec<User>>,
}

/// Response shape of the v2 user listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserListV2 {
    pub users: Vec<User>,
}

#[derive(Serialize)]
struct ReplacementBody<'a> {
    replacement: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContactMethodList {
    contact_methods: Vec<Contact>,
}

impl VictorOpsClient {
    /// Create a user in the organization
    pub async fn create_user(&self, user: &User) -> Result<(User, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::POST, USER_V1_ENDPOINT, user, &[])
            .await?;

        let created = details.parse()?;
        Ok((created, details))
    }

    /// Get a user by username
    pub async fn get_user(&self, username: &str) -> Result<(User, RequestDetails)> {
        let endpoint = format!("{USER_V1_ENDPOINT}/{}", encode_segment(username));
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let user = details.parse()?;
        Ok((user, details))
    }

    /// Update a user; the username selects which user to modify
    pub async fn update_user(&self, user: &User) -> Result<(User, RequestDetails)> {
        let username = user.username.as_deref().unwrap_or_default();
        let endpoint = format!("{USER_V1_ENDPOINT}/{}", encode_segment(username));
        let details = self
            .make_public_api_call(Method::PUT, &endpoint, user, &[])
            .await?;

        let updated = details.parse()?;
        Ok((updated, details))
    }

    /// Delete a user, reassigning their paging duties to `replacement`
    pub async fn delete_user(
        &self,
        username: &str,
        replacement: &str,
    ) -> Result<RequestDetails> {
        let endpoint = format!("{USER_V1_ENDPOINT}/{}", encode_segment(username));
        self.make_public_api_call(
            Method::DELETE,
            &endpoint,
            &ReplacementBody { replacement },
            &[],
        )
        .await
    }

    /// List every user in the organization (v1 shape)
    pub async fn get_all_users(&self) -> Result<(UserList, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::GET, USER_V1_ENDPOINT, &EmptyBody {}, &[])
            .await?;

        let users = details.parse()?;
        Ok((users, details))
    }

    /// List every user in the organization (v2 shape)
    pub async fn get_all_users_v2(&self) -> Result<(UserListV2, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::GET, USER_V2_ENDPOINT, &EmptyBody {}, &[])
            .await?;

        let users = details.parse()?;
        Ok((users, details))
    }

    /// Look up users matching an email address
    pub async fn get_user_by_email(&self, email: &str) -> Result<(UserListV2, RequestDetails)> {
        let details = self
            .make_public_api_call(
                Method::GET,
                USER_V2_ENDPOINT,
                &EmptyBody {},
                &[("email", email.to_string())],
            )
            .await?;

        let users = details.parse()?;
        Ok((users, details))
    }

    /// Find the id of the user's email contact method labelled "Default"
    ///
    /// Returns `Ok(None)` when the user has no contact method with that
    /// label.
    pub async fn get_user_default_email_contact_id(
        &self,
        username: &str,
    ) -> Result<(Option<u64>, RequestDetails)> {
        let endpoint = format!(
            "{USER_V1_ENDPOINT}/{}/contact-methods/emails",
            encode_segment(username)
        );
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let methods: ContactMethodList = details.parse()?;
        let id = methods
            .contact_methods
            .into_iter()
            .find(|contact| contact.label.as_deref() == Some("Default"))
            .and_then(|contact| contact.id);

        Ok((id, details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> VictorOpsClient {
        VictorOpsClient::new("test-id", "test-key", Url::parse(&server.uri()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api-public/v1/user"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "firstName": "test",
                    "lastName": "user",
                    "username": "rs_testuser",
                    "email": "rs_test@victorops.com",
                    "createdAt": "2020-03-25T17:49:01Z",
                    "passwordLastUpdated": "2020-03-25T17:49:01Z",
                    "verified": false,
                    "_selfUrl": "/api-public/v1/user/rs_testuser"
                }"#,
            ))
            .mount(&mock_server)
            .await;

        let user = User {
            first_name: Some("test".to_string()),
            last_name: Some("user".to_string()),
            username: Some("rs_testuser".to_string()),
            email: Some("rs_test@victorops.com".to_string()),
            admin: Some(true),
            expiration_hours: Some(24),
            ..User::default()
        };

        let (created, details) = test_client(&mock_server).create_user(&user).await.unwrap();

        // admin/expirationHours are request-only and absent from the response
        let want = User {
            first_name: Some("test".to_string()),
            last_name: Some("user".to_string()),
            username: Some("rs_testuser".to_string()),
            email: Some("rs_test@victorops.com".to_string()),
            created_at: Some("2020-03-25T17:49:01Z".to_string()),
            password_last_updated: Some("2020-03-25T17:49:01Z".to_string()),
            verified: Some(false),
            ..User::default()
        };
        assert_eq!(created, want);
        assert_eq!(details.status_code, 200);
    }

    #[tokio::test]
    async fn test_create_user_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api-public/v1/user"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Cloudflare is not available."))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .create_user(&User::default())
            .await
            .unwrap_err();

        assert!(err.is_decode());
        assert_eq!(
            err.details().unwrap().response_body,
            "Cloudflare is not available."
        );
    }

    #[tokio::test]
    async fn test_create_user_unavailable_username_decodes_empty() {
        let mock_server = MockServer::start().await;

        // Application errors arrive as HTTP 200 with an "error" field and
        // decode into an empty user; they are not detected client-side.
        Mock::given(method("POST"))
            .and(path("/api-public/v1/user"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"error": "User name rs_testuser is unavailable"}"#),
            )
            .mount(&mock_server)
            .await;

        let (created, _) = test_client(&mock_server)
            .create_user(&User::default())
            .await
            .unwrap();

        assert_eq!(created, User::default());
    }

    #[tokio::test]
    async fn test_get_all_users_nested_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-public/v1/user"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"users": [[{"username": "alice"}, {"username": "bob"}]]}"#,
            ))
            .mount(&mock_server)
            .await;

        let (list, _) = test_client(&mock_server).get_all_users().await.unwrap();

        assert_eq!(list.users.len(), 1);
        assert_eq!(list.users[0].len(), 2);
        assert_eq!(list.users[0][0].username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_get_user_by_email_uses_query_param() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-public/v2/user"))
            .and(query_param("email", "alice@example.com"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"users": [{"username": "alice"}]}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let (list, _) = test_client(&mock_server)
            .get_user_by_email("alice@example.com")
            .await
            .unwrap();

        assert_eq!(list.users.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_sends_replacement() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api-public/v1/user/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let details = test_client(&mock_server)
            .delete_user("alice", "bob")
            .await
            .unwrap();

        assert_eq!(details.request_body, r#"{"replacement":"bob"}"#);
    }

    #[tokio::test]
    async fn test_get_user_default_email_contact_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-public/v1/user/alice/contact-methods/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"contactMethods": [
                    {"id": 17, "label": "Work", "value": "alice@work.com"},
                    {"id": 42, "label": "Default", "value": "alice@example.com"}
                ]}"#,
            ))
            .mount(&mock_server)
            .await;

        let (id, _) = test_client(&mock_server)
            .get_user_default_email_contact_id("alice")
            .await
            .unwrap();

        assert_eq!(id, Some(42));
    }

    #[tokio::test]
    async fn test_get_user_default_email_contact_id_missing_label() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-public/v1/user/alice/contact-methods/emails"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"contactMethods": []}"#),
            )
            .mount(&mock_server)
            .await;

        let (id, _) = test_client(&mock_server)
            .get_user_default_email_contact_id("alice")
            .await
            .unwrap();

        assert_eq!(id, None);
    }

    #[test]
    fn test_user_serialization_skips_unset_fields() {
        let user = User {
            username: Some("alice".to_string()),
            ..User::default()
        };
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"username":"alice"}"#);
    }
}
