//! Credential resolution and OAuth 2.0 token exchange.
//!
//! Collects the inputs an identity provider needs for a token request and
//! performs exactly one request against its `/oauth/token` endpoint.
//!
//! # Components
//!
//! - [`fields`] — Flow modes and the ordered set of fields each one requires
//! - [`profile`] — Dotenv-style profile files
//! - [`resolver`] — Flag > profile > prompt precedence for every field
//! - [`grant`] — Password-realm and client-credentials form bodies
//! - [`requester`] — Token endpoint construction and the HTTP exchange
//! - [`token`] — Best-effort decoding of the provider's reply

pub mod error;
pub mod fields;
pub mod grant;
pub mod profile;
pub mod requester;
pub mod resolver;
pub mod token;

pub use error::{OAuthError, ResolveError, Result};
pub use fields::{Field, FieldSet, FlowMode};
pub use grant::{ClientCredentials, DEFAULT_REALM, Grant};
pub use profile::Profile;
pub use requester::{DEFAULT_TIMEOUT, TokenRequest, TokenRequester, token_endpoint};
pub use resolver::{
    FlagValues, InputSource, LinePrompter, Prompter, ResolvedInputs, preview, resolve,
};
pub use token::TokenResponse;
