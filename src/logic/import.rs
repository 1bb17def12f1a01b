//! CSV participant import (`name,partner,group`; partner and group optional).

use crate::models::{FixtureError, ParticipantInput};

fn csv_error(err: csv::Error) -> FixtureError {
    FixtureError::Csv {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

/// Parse participant rows. The header row is required; blank optional fields become None.
pub fn parse_participants_csv(data: &str) -> Result<Vec<ParticipantInput>, FixtureError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());
    let mut inputs = Vec::new();
    for row in reader.deserialize::<ParticipantInput>() {
        inputs.push(row.map_err(csv_error)?.normalized());
    }
    Ok(inputs)
}
