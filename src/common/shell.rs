//! Argument safety and command-line rendering.
//!
//! Subprocesses are always spawned with an argv vector, never through a shell.
//! User supplied strings pass through [`check_message`] or
//! [`check_ref_label`] before they reach a subprocess. [`render_command`]
//! produces a copy-pastable, quoted rendering for logs and error reports.

use crate::common::error::HelperError;
use crate::common::result::HelperResult;

/// Quotes a single argument for display in a POSIX shell.
///
/// Plain words are returned untouched; everything else is wrapped in single
/// quotes with embedded single quotes escaped as `'\''`.
pub fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '-' | '_' | '.' | '/' | ':' | '@' | '=' | '+' | ',')
        });

    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Renders `program args...` as a quoted command line.
pub fn render_command(program: &str, args: &[&str]) -> String {
    std::iter::once(quote_arg(program))
        .chain(args.iter().map(|a| quote_arg(a)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validates free text (commit messages) handed to a subprocess.
pub fn check_message(field: &str, message: &str) -> HelperResult<()> {
    if message.trim().is_empty() {
        return Err(HelperError::validation_error(field, "must not be empty", None));
    }
    if message.contains('\0') {
        return Err(HelperError::validation_error(
            field,
            "must not contain NUL bytes",
            Some(message.replace('\0', "\\0")),
        ));
    }
    Ok(())
}

/// Validates a label used as a ref or file name (tag names, changelog aliases).
///
/// Mirrors the subset of `git check-ref-format` rules that matter for a
/// single path component, and rejects a leading `-` so the label is never
/// parsed as an option.
pub fn check_ref_label(field: &str, label: &str) -> HelperResult<()> {
    let reject = |reason: &str| {
        Err(HelperError::validation_error(
            field,
            reason,
            Some(label.to_string()),
        ))
    };

    if label.is_empty() {
        return reject("must not be empty");
    }
    if label.starts_with('-') {
        return reject("must not start with '-'");
    }
    if label.starts_with('.') || label.ends_with('.') || label.ends_with(".lock") {
        return reject("must not start or end with '.' or end with '.lock'");
    }
    if label.contains("..") || label.contains("@{") {
        return reject("must not contain '..' or '@{'");
    }
    if label
        .chars()
        .any(|c| c.is_control() || c.is_whitespace() || "~^:?*[\\/".contains(c))
    {
        return reject("contains a character not allowed in a tag name");
    }
    Ok(())
}
