//! Exchange command - resolve inputs and fetch one token.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;
use console::style;
use tokex_oauth::{
    DEFAULT_REALM, DEFAULT_TIMEOUT, Field, FieldSet, FlagValues, FlowMode, LinePrompter, Profile,
    TokenRequest, TokenRequester, TokenResponse, resolve,
};

use super::Context;

/// Arguments for the token exchange.
#[derive(Args, Debug)]
pub struct ExchangeArgs {
    /// Profile file, structured like a .env file
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Use the machine-to-machine (client credentials) flow
    #[arg(long)]
    pub m2m: bool,

    /// End-user name (password-realm flow)
    #[arg(long)]
    pub username: Option<String>,

    /// End-user password (password-realm flow)
    #[arg(long)]
    pub password: Option<String>,

    /// OAuth client ID
    #[arg(long = "clientId", visible_alias = "client-id", value_name = "ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long = "clientSecret", visible_alias = "client-secret", value_name = "SECRET")]
    pub client_secret: Option<String>,

    /// API the token is intended for
    #[arg(long)]
    pub audience: Option<String>,

    /// Authorization server host, e.g. tenant.auth0.com
    #[arg(long)]
    pub issuer: Option<String>,

    /// Realm (connection) for the password-realm flow
    #[arg(long, default_value = DEFAULT_REALM)]
    pub realm: String,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "TOKEX_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

impl ExchangeArgs {
    pub fn mode(&self) -> FlowMode {
        FlowMode::from_m2m(self.m2m)
    }

    /// Flag values keyed by field. Unset flags are left out.
    pub fn flag_values(&self) -> FlagValues {
        [
            (Field::Username, &self.username),
            (Field::Password, &self.password),
            (Field::ClientId, &self.client_id),
            (Field::ClientSecret, &self.client_secret),
            (Field::Audience, &self.audience),
            (Field::Issuer, &self.issuer),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}

/// Run the exchange.
pub async fn run(args: ExchangeArgs, ctx: &Context) -> Result<()> {
    let field_set = FieldSet::for_mode(args.mode());
    tracing::debug!(mode = ?field_set.mode(), "Selected flow");

    let profile = match &args.profile {
        Some(path) => {
            let profile = Profile::load(path);
            if profile.is_empty() {
                tracing::debug!(path = %path.display(), "Profile supplies no values");
            }
            profile
        }
        None => Profile::empty(),
    };

    let inputs = {
        let stdin = std::io::stdin();
        let mut prompter = LinePrompter::new(stdin.lock(), std::io::stdout());
        resolve(&field_set, &args.flag_values(), &profile, &mut prompter)?
    };

    let request = TokenRequest::from_inputs(&inputs, Some(&args.realm))?;
    let requester = TokenRequester::new(Duration::from_secs(args.timeout))
        .context("Failed to create HTTP client")?;
    tracing::debug!(
        endpoint = %request.endpoint,
        timeout_secs = requester.timeout().as_secs(),
        "Prepared token request"
    );

    let token = requester.request_token(&request).await?;

    print_token(&token, ctx)
}

fn print_token(token: &TokenResponse, ctx: &Context) -> Result<()> {
    let mut stdout = std::io::stdout().lock();

    if ctx.json_output {
        serde_json::to_writer_pretty(&mut stdout, token)?;
        writeln!(stdout)?;
        return Ok(());
    }

    write!(
        stdout,
        "\nYour JWT is:\n\n{}\n\n",
        style(&token.access_token).yellow()
    )?;

    if ctx.verbose {
        if let Some(token_type) = &token.token_type {
            writeln!(stdout, "Token type: {}", token_type)?;
        }
        if let Some(expires_in) = &token.expires_in {
            writeln!(stdout, "Expires in: {} seconds", expires_in)?;
        }
        if let Some(scope) = &token.scope {
            writeln!(stdout, "Scope: {}", scope)?;
        }
    }

    Ok(())
}
