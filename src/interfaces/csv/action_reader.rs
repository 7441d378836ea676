use crate::application::script::WizardAction;
use crate::error::{Result, WizardError};
use std::io::Read;

/// Reads scripted wizard actions from a CSV source with an `action,value`
/// header.
///
/// Whitespace is trimmed and the `value` column may be left out for actions
/// that take none.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    /// Creates a new `ActionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes actions.
    pub fn actions(self) -> impl Iterator<Item = Result<WizardAction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(WizardError::from))
    }
}
