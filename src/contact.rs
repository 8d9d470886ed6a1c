use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::client::{encode_segment, EmptyBody, RequestDetails, VictorOpsClient};
use crate::errors::Result;

/// Kind of contact method, determining the endpoint it lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactType {
    Phone,
    Email,
    Device,
}

impl ContactType {
    /// Path noun used by the contact-methods endpoints
    pub(crate) fn endpoint_noun(self) -> &'static str {
        match self {
            ContactType::Phone => "phones",
            ContactType::Email => "emails",
            ContactType::Device => "devices",
        }
    }

    /// Map the `notificationType` string found in escalation-policy
    /// notification steps to a contact type
    pub fn from_notification_type(notification_type: &str) -> Option<ContactType> {
        match notification_type {
            "push" => Some(ContactType::Device),
            "email" => Some(ContactType::Email),
            "phone" | "sms" => Some(ContactType::Phone),
            _ => None,
        }
    }
}

impl Display for ContactType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint_noun())
    }
}

/// A phone, email or device contact method for a user
///
/// `phone_number` and `email` are only used when creating a contact; on
/// reads the API reports the address in `value` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "phone", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<String>,
}

impl Contact {
    /// Contact type inferred from which address field is populated
    pub fn contact_type(&self) -> ContactType {
        if self.phone_number.is_some() {
            ContactType::Phone
        } else {
            ContactType::Email
        }
    }
}

/// One group of contact methods in the grouped listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactGroup {
    pub contact_methods: Vec<Contact>,
}

/// Grouped response of every contact method a user has
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AllContactResponse {
    pub phones: ContactGroup,
    pub emails: ContactGroup,
    pub devices: ContactGroup,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContactMethodList {
    contact_methods: Vec<Contact>,
}

impl VictorOpsClient {
    /// Create a contact method for a user
    ///
    /// The endpoint is chosen from the contact itself: a populated phone
    /// number targets `phones`, otherwise `emails`.
    pub async fn create_contact(
        &self,
        username: &str,
        contact: &Contact,
    ) -> Result<(Contact, RequestDetails)> {
        let endpoint = format!(
            "v1/user/{}/contact-methods/{}",
            encode_segment(username),
            contact.contact_type().endpoint_noun()
        );
        let details = self
            .make_public_api_call(Method::POST, &endpoint, contact, &[])
            .await?;

        let created = details.parse()?;
        Ok((created, details))
    }

    /// Get a contact method by its external id
    pub async fn get_contact(
        &self,
        username: &str,
        contact_ext_id: &str,
        contact_type: ContactType,
    ) -> Result<(Contact, RequestDetails)> {
        let endpoint = format!(
            "v1/user/{}/contact-methods/{}/{contact_ext_id}",
            encode_segment(username),
            contact_type.endpoint_noun()
        );
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let contact = details.parse()?;
        Ok((contact, details))
    }

    /// List every contact method of a user, grouped by type
    pub async fn get_all_contacts(
        &self,
        username: &str,
    ) -> Result<(AllContactResponse, RequestDetails)> {
        let endpoint = format!("v1/user/{}/contact-methods", encode_segment(username));
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let contacts = details.parse()?;
        Ok((contacts, details))
    }

    /// Delete a contact method by its external id
    pub async fn delete_contact(
        &self,
        username: &str,
        contact_ext_id: &str,
        contact_type: ContactType,
    ) -> Result<RequestDetails> {
        let endpoint = format!(
            "v1/user/{}/contact-methods/{}/{contact_ext_id}",
            encode_segment(username),
            contact_type.endpoint_noun()
        );
        self.make_public_api_call(Method::DELETE, &endpoint, &EmptyBody {}, &[])
            .await
    }

    /// Look up a contact method by its internal numeric id
    ///
    /// Device id 0 is the virtual "All Devices" pseudo-target; it is
    /// recognized client-side and synthesized without a network call,
    /// with an empty envelope. Any other id is searched in the listing
    /// for that contact type; `Ok(None)` means no match.
    pub async fn get_contact_by_id(
        &self,
        username: &str,
        id: u64,
        contact_type: ContactType,
    ) -> Result<(Option<Contact>, RequestDetails)> {
        if contact_type == ContactType::Device && id == 0 {
            let contact = Contact {
                value: Some("All Devices".to_string()),
                id: Some(0),
                rank: Some(0),
                ..Contact::default()
            };
            return Ok((Some(contact), RequestDetails::default()));
        }

        let endpoint = format!(
            "v1/user/{}/contact-methods/{}",
            encode_segment(username),
            contact_type.endpoint_noun()
        );
        let details = self
            .make_public_api_call(Method::GET, &endpoint, &EmptyBody {}, &[])
            .await?;

        let methods: ContactMethodList = details.parse()?;
        let found = methods
            .contact_methods
            .into_iter()
            .find(|contact| contact.id == Some(id));

        Ok((found, details))
    }
}
