//! Flow modes and the credential fields each one requires.

use std::fmt;

/// A single credential input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Username,
    Password,
    ClientId,
    ClientSecret,
    Audience,
    Issuer,
}

impl Field {
    /// Every field, in prompt order.
    pub const ALL: [Field; 6] = [
        Field::Username,
        Field::Password,
        Field::ClientId,
        Field::ClientSecret,
        Field::Audience,
        Field::Issuer,
    ];

    /// Name used for flags and prompts.
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::ClientId => "clientId",
            Field::ClientSecret => "clientSecret",
            Field::Audience => "audience",
            Field::Issuer => "issuer",
        }
    }

    /// Profile key: the upper-cased field name.
    pub fn env_key(self) -> String {
        self.name().to_uppercase()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which token flow to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowMode {
    /// End-user credentials plus client credentials, scoped to a realm.
    #[default]
    PasswordRealm,
    /// Client credentials only.
    MachineToMachine,
}

impl FlowMode {
    /// Select the mode from the `--m2m` switch.
    pub fn from_m2m(m2m: bool) -> Self {
        if m2m {
            FlowMode::MachineToMachine
        } else {
            FlowMode::PasswordRealm
        }
    }
}

/// Ordered fields required by a flow mode. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    mode: FlowMode,
    fields: &'static [Field],
}

const PASSWORD_REALM_FIELDS: &[Field] = &Field::ALL;

const MACHINE_TO_MACHINE_FIELDS: &[Field] = &[
    Field::ClientId,
    Field::ClientSecret,
    Field::Audience,
    Field::Issuer,
];

impl FieldSet {
    /// Build the field set for a mode.
    pub fn for_mode(mode: FlowMode) -> Self {
        let fields = match mode {
            FlowMode::PasswordRealm => PASSWORD_REALM_FIELDS,
            FlowMode::MachineToMachine => MACHINE_TO_MACHINE_FIELDS,
        };
        Self { mode, fields }
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    pub fn fields(&self) -> &[Field] {
        self.fields
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }
}
