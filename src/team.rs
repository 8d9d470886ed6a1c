use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{encode_segment, EmptyBody, RequestDetails, VictorOpsClient};
use crate::errors::Result;
use crate::user::User;

const TEAM_ENDPOINT: &str = "v1/team";

/// A team in the VictorOps organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default_team: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Membership listing for a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamMembers {
    pub members: Vec<User>,
}

/// A team administrator as reported by the admins endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Admin {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(rename = "_selfUrl")]
    pub self_url: Option<String>,
}

/// Administrator listing for a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamAdmins {
    #[serde(rename = "admin")]
    pub team_admins: Vec<Admin>,
}

#[derive(Serialize)]
struct UsernameBody<'a> {
    username: &'a str,
}

#[derive(Serialize)]
struct ReplacementBody<'a> {
    replacement: &'a str,
}

impl VictorOpsClient {
    /// Create a team in the organization
    pub async fn create_team(&self, team: &Team) -> Result<(Team, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::POST, TEAM_ENDPOINT, team, &[])
            .await?;

        let created = details.parse()?;
        Ok((created, details))
    }

    /// Get a team by its slug
    pub async fn get_team(&self, team_id: &str) -> Result<(Team, RequestDetails)> {
        let endpoint = format!("{TEAM_ENDPOINT}/{}", encode_segment(team_id));
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let team = details.parse()?;
        Ok((team, details))
    }

    /// List every team in the organization
    pub async fn get_all_teams(&self) -> Result<(Vec<Team>, RequestDetails)> {
        let details = self
            .make_public_api_call(Method::GET, TEAM_ENDPOINT, &EmptyBody {}, &[])
            .await?;

        let teams = details.parse()?;
        Ok((teams, details))
    }

    /// Update a team; the name selects which team to modify
    pub async fn update_team(&self, team: &Team) -> Result<(Team, RequestDetails)> {
        let name = team.name.as_deref().unwrap_or_default();
        let endpoint = format!("{TEAM_ENDPOINT}/{}", encode_segment(name));
        let details = self
            .make_public_api_call(Method::PUT, &endpoint, team, &[])
            .await?;

        let updated = details.parse()?;
        Ok((updated, details))
    }

    /// Delete a team by its slug
    pub async fn delete_team(&self, team_id: &str) -> Result<RequestDetails> {
        let endpoint = format!("{TEAM_ENDPOINT}/{}", encode_segment(team_id));
        self.make_public_api_call(Method::DELETE, &endpoint, &EmptyBody {}, &[])
            .await
    }

    /// List the members of a team
    pub async fn get_team_members(
        &self,
        team_id: &str,
    ) -> Result<(TeamMembers, RequestDetails)> {
        let endpoint = format!("{TEAM_ENDPOINT}/{}/members", encode_segment(team_id));
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let members = details.parse()?;
        Ok((members, details))
    }

    /// List the administrators of a team
    pub async fn get_team_admins(&self, team_id: &str) -> Result<(TeamAdmins, RequestDetails)> {
        let endpoint = format!("{TEAM_ENDPOINT}/{}/admins", encode_segment(team_id));
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let admins = details.parse()?;
        Ok((admins, details))
    }

    /// Add a user to a team
    pub async fn add_team_member(
        &self,
        team_id: &str,
        username: &str,
    ) -> Result<RequestDetails> {
        let endpoint = format!("{TEAM_ENDPOINT}/{}/members", encode_segment(team_id));
        self.make_public_api_call(Method::POST, &endpoint, &UsernameBody { username }, &[])
            .await
    }

    /// Remove a user from a team, reassigning their duties to `replacement`
    pub async fn remove_team_member(
        &self,
        team_id: &str,
        username: &str,
        replacement: &str,
    ) -> Result<RequestDetails> {
        let endpoint = format!(
            "{TEAM_ENDPOINT}/{}/members/{}",
            encode_segment(team_id),
            encode_segment(username)
        );
        self.make_public_api_call(
            Method::DELETE,
            &endpoint,
            &ReplacementBody { replacement },
            &[],
        )
        .await
    }

    /// Check whether a user is a member of a team
    ///
    /// Usernames are compared case-insensitively, matching how the API
    /// treats them.
    pub async fn is_team_member(
        &self,
        team_id: &str,
        username: &str,
    ) -> Result<(bool, RequestDetails)> {
        let (members, details) = self.get_team_members(team_id).await?;

        let is_member = members.members.iter().any(|member| {
            member
                .username
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(username))
        });

        Ok((is_member, details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> VictorOpsClient {
        VictorOpsClient::new("test-id", "test-key", Url::parse(&server.uri()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_get_team() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-public/v1/team/team-abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "name": "Platform",
                    "slug": "team-abc123",
                    "memberCount": 4,
                    "version": 2,
                    "isDefaultTeam": false,
                    "description": "Platform engineering"
                }"#,
            ))
            .mount(&mock_server)
            .await;

        let (team, _) = test_client(&mock_server).get_team("team-abc123").await.unwrap();

        let want = Team {
            name: Some("Platform".to_string()),
            slug: Some("team-abc123".to_string()),
            member_count: Some(4),
            version: Some(2),
            is_default_team: Some(false),
            description: Some("Platform engineering".to_string()),
        };
        assert_eq!(team, want);
    }

    #[tokio::test]
    async fn test_get_all_teams_is_bare_array() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-public/v1/team"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"name": "Platform", "slug": "team-a"}, {"name": "Data", "slug": "team-b"}]"#,
            ))
            .mount(&mock_server)
            .await;

        let (teams, _) = test_client(&mock_server).get_all_teams().await.unwrap();

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1].slug.as_deref(), Some("team-b"));
    }

    #[tokio::test]
    async fn test_add_team_member_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api-public/v1/team/team-a/members"))
            .and(body_json(serde_json::json!({"username": "alice"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        test_client(&mock_server)
            .add_team_member("team-a", "alice")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_team_member_path_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api-public/v1/team/team-a/members/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let details = test_client(&mock_server)
            .remove_team_member("team-a", "alice", "bob")
            .await
            .unwrap();

        assert_eq!(details.request_body, r#"{"replacement":"bob"}"#);
    }

    #[tokio::test]
    async fn test_is_team_member_case_insensitive() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-public/v1/team/team-a/members"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"members": [{"username": "Alice"}, {"username": "bob"}]}"#,
            ))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);

        let (is_member, _) = client.is_team_member("team-a", "alice").await.unwrap();
        assert!(is_member);

        let (is_member, _) = client.is_team_member("team-a", "carol").await.unwrap();
        assert!(!is_member);
    }

    #[tokio::test]
    async fn test_get_team_admins() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-public/v1/team/team-a/admins"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"admin": [{
                    "username": "alice",
                    "firstName": "Alice",
                    "lastName": "Admin",
                    "_selfUrl": "/api-public/v1/user/alice"
                }]}"#,
            ))
            .mount(&mock_server)
            .await;

        let (admins, _) = test_client(&mock_server)
            .get_team_admins("team-a")
            .await
            .unwrap();

        assert_eq!(admins.team_admins.len(), 1);
        assert_eq!(
            admins.team_admins[0].self_url.as_deref(),
            Some("/api-public/v1/user/alice")
        );
    }
}
