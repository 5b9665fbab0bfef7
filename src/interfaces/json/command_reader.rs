use crate::domain::channel::Channel;
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::io::BufRead;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
}

/// One line of a batch file.
///
/// `id` is required for everything but `create`. It may be `@label`, naming
/// the id produced by an earlier `create` that carried that `label`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub op: Operation,
    #[serde(deserialize_with = "deserialize_channel")]
    pub channel: Channel,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub request: Value,
}

fn deserialize_channel<'de, D>(deserializer: D) -> std::result::Result<Channel, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

/// Reads commands from a JSON Lines source.
///
/// Blank lines and lines starting with `#` are skipped. Each remaining line
/// yields its own `Result`, so one malformed line does not stop the batch.
pub struct CommandReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> CommandReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Returns an iterator that lazily reads and parses commands, paired
    /// with their 1-based line number.
    pub fn commands(self) -> impl Iterator<Item = (usize, Result<Command>)> {
        self.source
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let parsed = match line {
                    Ok(line) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() || trimmed.starts_with('#') {
                            return None;
                        }
                        serde_json::from_str(trimmed).map_err(PaymentError::from)
                    }
                    Err(e) => Err(PaymentError::from(e)),
                };
                Some((index + 1, parsed))
            })
    }
}
