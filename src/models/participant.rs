//! Participant: a single player or a pair registered for an event.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in fixtures and lookups).
pub type ParticipantId = Uuid;

/// A registered participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Second player for pairs events.
    pub partner: Option<String>,
    /// Team or group the participant belongs to.
    pub group: Option<String>,
}

impl Participant {
    /// Create a new participant with the given name and no partner or group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            partner: None,
            group: None,
        }
    }

    /// "Name" for individuals, "Name & Partner" for pairs.
    pub fn display_name(&self) -> String {
        match &self.partner {
            Some(partner) => format!("{} & {}", self.name, partner),
            None => self.name.clone(),
        }
    }
}

/// Input for registering or editing a participant (API bodies, CSV rows).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInput {
    pub name: String,
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

impl ParticipantInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Trimmed copy with blank optional fields dropped.
    pub fn normalized(&self) -> Self {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            name: self.name.trim().to_string(),
            partner: clean(&self.partner),
            group: clean(&self.group),
        }
    }
}
