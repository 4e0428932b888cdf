//! Two-line text format for a user file: name on the first line, balance on the second.

use crate::domain::validation::{validate_balance, validate_name};
use crate::error::{Result, UserError};

/// Line separator of the host platform.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Serializes a name and balance into file contents.
///
/// The balance is written in its shortest round-trip decimal form, so
/// `100.0` becomes `"100"` and `12.5` stays `"12.5"`.
pub fn encode(name: &str, balance: f64) -> String {
    format!("{}{}{}", name, LINE_SEPARATOR, balance)
}

/// Parses file contents back into a name and balance.
///
/// # Errors
/// Returns [`UserError::Corrupt`] unless the contents hold exactly two
/// lines forming a valid name and a valid balance. One trailing separator
/// is tolerated.
pub fn decode(id: u32, contents: &str) -> Result<(String, f64)> {
    let body = contents.strip_suffix(LINE_SEPARATOR).unwrap_or(contents);
    let fields: Vec<&str> = body.split(LINE_SEPARATOR).collect();

    let [name, balance] = fields.as_slice() else {
        return Err(UserError::Corrupt {
            id,
            reason: format!("expected 2 lines, found {}", fields.len()),
        });
    };

    let balance: f64 = balance.trim().parse().map_err(|_| UserError::Corrupt {
        id,
        reason: format!("balance {:?} is not a number", balance),
    })?;

    validate_name(name)
        .and_then(|_| validate_balance(balance))
        .map_err(|e| UserError::Corrupt { id, reason: e.to_string() })?;

    Ok((name.to_string(), balance))
}
