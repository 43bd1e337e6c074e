//! Input resolution.
//!
//! Every field of the active [`FieldSet`] is resolved in order from the first
//! source that has a non-empty value: command-line flag, then profile, then an
//! interactive prompt.

use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use console::Style;

use crate::error::ResolveError;
use crate::fields::{Field, FieldSet, FlowMode};
use crate::profile::Profile;

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    CommandLine,
    Profile(Option<PathBuf>),
    Prompt,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::CommandLine => f.write_str("command line"),
            InputSource::Profile(Some(path)) => write!(f, "{}", path.display()),
            InputSource::Profile(None) => f.write_str("profile"),
            InputSource::Prompt => f.write_str("prompt"),
        }
    }
}

/// Values given as command-line flags. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct FlagValues {
    values: HashMap<Field, String>,
}

impl FlagValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag value.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// Non-empty value for a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values
            .get(&field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl<V: Into<String>> FromIterator<(Field, V)> for FlagValues {
    fn from_iter<I: IntoIterator<Item = (Field, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(f, v)| (f, v.into())).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    field: Field,
    value: String,
    source: InputSource,
}

/// Fully resolved inputs for one flow mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    mode: FlowMode,
    entries: Vec<Resolved>,
}

impl ResolvedInputs {
    /// Build inputs directly from known values, attributed to the command line.
    pub fn from_values<V: Into<String>>(
        mode: FlowMode,
        values: impl IntoIterator<Item = (Field, V)>,
    ) -> Self {
        Self {
            mode,
            entries: values
                .into_iter()
                .map(|(field, value)| Resolved {
                    field,
                    value: value.into(),
                    source: InputSource::CommandLine,
                })
                .collect(),
        }
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.find(field).map(|r| r.value.as_str())
    }

    pub fn source(&self, field: Field) -> Option<&InputSource> {
        self.find(field).map(|r| &r.source)
    }

    /// Resolved fields in resolution order.
    #[cfg(test)]
    pub(crate) fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.iter().map(|r| r.field)
    }

    fn find(&self, field: Field) -> Option<&Resolved> {
        self.entries.iter().find(|r| r.field == field)
    }
}

/// Interactive side of resolution.
pub trait Prompter {
    /// Ask for a field's value and return the answer without its line ending.
    fn prompt(&mut self, field: Field) -> std::io::Result<String>;

    /// Note a value found without prompting.
    fn report(&mut self, _field: Field, _source: &InputSource, _value: &str) {}
}

/// Resolve every field of `field_set`.
///
/// Prompts only for fields that neither a flag nor the profile supplies. An
/// empty answer is accepted as-is.
pub fn resolve<P: Prompter + ?Sized>(
    field_set: &FieldSet,
    flags: &FlagValues,
    profile: &Profile,
    prompter: &mut P,
) -> Result<ResolvedInputs, ResolveError> {
    let mut entries = Vec::with_capacity(field_set.len());

    for &field in field_set.fields() {
        let (value, source) = if let Some(value) = flags.get(field) {
            (value.to_string(), InputSource::CommandLine)
        } else if let Some(value) = profile.get(field) {
            (
                value.to_string(),
                InputSource::Profile(profile.path().map(|p| p.to_path_buf())),
            )
        } else {
            let answer = prompter
                .prompt(field)
                .map_err(|source| ResolveError::Prompt {
                    field: field.name(),
                    source,
                })?;
            if answer.is_empty() {
                tracing::warn!(field = %field, "Empty value entered");
            }
            (answer, InputSource::Prompt)
        };

        if source != InputSource::Prompt {
            prompter.report(field, &source, &value);
        }
        tracing::debug!(field = %field, source = %source, "Resolved input");

        entries.push(Resolved {
            field,
            value,
            source,
        });
    }

    Ok(ResolvedInputs {
        mode: field_set.mode(),
        entries,
    })
}

/// Short, non-revealing preview of a value.
///
/// Values longer than six characters show their first three; anything
/// shorter is fully masked.
pub fn preview(value: &str) -> String {
    if value.chars().count() > 6 {
        value.chars().take(3).collect()
    } else {
        "***".to_string()
    }
}

/// Line-oriented prompter over any reader/writer pair.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
    styled: bool,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Prompter with colors when the terminal supports them.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            styled: console::colors_enabled(),
        }
    }

    /// Prompter that never emits escape codes.
    pub fn plain(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            styled: false,
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.styled)
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, field: Field) -> std::io::Result<String> {
        let name = self.style(Style::new().yellow()).apply_to(field);
        write!(self.writer, "Please enter a {}: ", name)?;
        self.writer.flush()?;

        let mut line = Vec::new();
        self.reader.read_until(b'\n', &mut line)?;
        let line = String::from_utf8_lossy(&line);
        let answer = strip_line_ending(&line).to_string();

        let shown = self.style(Style::new().green()).apply_to(preview(&answer));
        writeln!(self.writer, "You entered: {}...", shown)?;
        Ok(answer)
    }

    fn report(&mut self, field: Field, source: &InputSource, value: &str) {
        let source_style = match source {
            InputSource::Profile(_) => Style::new().magenta(),
            _ => Style::new().cyan(),
        };
        let name = self.style(Style::new().blue()).apply_to(field);
        let from = self.style(source_style).apply_to(source);
        let shown = self.style(Style::new().green()).apply_to(preview(value));
        let result = writeln!(
            self.writer,
            "Reading {} argument from {}: {}...",
            name, from, shown
        );
        if let Err(e) = result {
            tracing::debug!(error = %e, "Failed to write progress line");
        }
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
