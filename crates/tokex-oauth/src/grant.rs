//! Token grants and their form bodies.

use crate::error::{OAuthError, Result};
use crate::fields::{Field, FlowMode};
use crate::resolver::ResolvedInputs;

/// Grant type for the password-realm extension grant.
pub const PASSWORD_REALM_GRANT_TYPE: &str = "http://auth0.com/oauth/grant-type/password-realm";

/// Grant type for machine-to-machine tokens.
pub const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// Connection used for password-realm grants unless overridden.
pub const DEFAULT_REALM: &str = "Username-Password-Authentication";

/// Client credentials shared by both grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
}

/// A token grant carrying only the fields its flow needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    PasswordRealm {
        username: String,
        password: String,
        realm: String,
        client: ClientCredentials,
    },
    ClientCredentials(ClientCredentials),
}

impl Grant {
    /// Build the grant for the inputs' flow mode.
    pub fn from_inputs(inputs: &ResolvedInputs, realm: Option<&str>) -> Result<Self> {
        let client = ClientCredentials {
            client_id: required(inputs, Field::ClientId)?,
            client_secret: required(inputs, Field::ClientSecret)?,
            audience: required(inputs, Field::Audience)?,
        };

        Ok(match inputs.mode() {
            FlowMode::PasswordRealm => Grant::PasswordRealm {
                username: required(inputs, Field::Username)?,
                password: required(inputs, Field::Password)?,
                realm: realm
                    .filter(|r| !r.is_empty())
                    .unwrap_or(DEFAULT_REALM)
                    .to_string(),
                client,
            },
            FlowMode::MachineToMachine => Grant::ClientCredentials(client),
        })
    }

    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::PasswordRealm { .. } => PASSWORD_REALM_GRANT_TYPE,
            Grant::ClientCredentials(_) => CLIENT_CREDENTIALS_GRANT_TYPE,
        }
    }

    pub fn client(&self) -> &ClientCredentials {
        match self {
            Grant::PasswordRealm { client, .. } | Grant::ClientCredentials(client) => client,
        }
    }

    /// Form fields for the token request.
    pub fn form(&self) -> Vec<(&'static str, &str)> {
        let client = self.client();
        let mut fields = Vec::with_capacity(7);

        if let Grant::PasswordRealm {
            username, password, ..
        } = self
        {
            fields.push(("username", username.as_str()));
            fields.push(("password", password.as_str()));
        }

        fields.push(("client_id", client.client_id.as_str()));
        fields.push(("client_secret", client.client_secret.as_str()));
        fields.push(("audience", client.audience.as_str()));
        fields.push(("grant_type", self.grant_type()));

        if let Grant::PasswordRealm { realm, .. } = self {
            fields.push(("realm", realm.as_str()));
        }

        fields
    }
}

fn required(inputs: &ResolvedInputs, field: Field) -> Result<String> {
    inputs
        .get(field)
        .map(str::to_string)
        .ok_or(OAuthError::MissingField(field.name()))
}
