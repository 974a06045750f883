use colored::Colorize;
use console::Term;

use crate::application::use_cases::tag_release::{VersionPrompt, VersionRequest};
use crate::common::error::HelperError;
use crate::common::result::HelperResult;

/// Asks for the version on the terminal, pre-filled with the suggestion.
pub struct ConsolePrompt {
    term: Term,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionPrompt for ConsolePrompt {
    fn ask_version(&self, request: &VersionRequest) -> HelperResult<Option<String>> {
        let io_error =
            |e| HelperError::filesystem_error_with_source("Failed to prompt for version", None, e);

        self.term
            .write_line(
                &format!(
                    "{} - version: {}",
                    request.package_name,
                    request.latest_tag.as_deref().unwrap_or("none")
                )
                .green()
                .to_string(),
            )
            .map_err(io_error)?;
        for change in request.changes.iter() {
            self.term.write_line(change).map_err(io_error)?;
        }

        self.term
            .write_str("Specify the version to increment to or leave empty to skip: ")
            .map_err(io_error)?;

        let answer = match (&request.suggestion, self.term.is_term()) {
            (Some(suggestion), true) => self.term.read_line_initial_text(suggestion),
            _ => self.term.read_line(),
        }
        .map_err(io_error)?;

        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }
}
