//! Example-query row editing.
//!
//! DESIGN
//! ======
//! The row list always ends with at most one blank row reserved for new
//! input. Typing into the tail row grows the list by one blank row (up to
//! [`MAX_EXAMPLE_QUERIES`]); deleting never empties it.

#[cfg(test)]
#[path = "queries_test.rs"]
mod queries_test;

use crate::error::TopicError;
use crate::topic::ExampleQuery;

/// Upper bound on rows produced by auto-grow.
pub const MAX_EXAMPLE_QUERIES: usize = 10;

/// Replace the value of row `index`, appending a blank row when the tail
/// row receives text and the list is below the cap.
///
/// # Errors
///
/// Returns `QueryIndexOutOfRange` if `index` is past the end; `rows` is
/// left untouched.
pub fn edit_row(rows: &mut Vec<ExampleQuery>, index: usize, value: &str) -> Result<(), TopicError> {
    let len = rows.len();
    let row = rows
        .get_mut(index)
        .ok_or(TopicError::QueryIndexOutOfRange { index, len })?;
    value.clone_into(&mut row.value);

    if index + 1 == len && !value.is_empty() && len < MAX_EXAMPLE_QUERIES {
        rows.push(ExampleQuery::blank());
    }
    Ok(())
}

/// Remove row `index`. A single remaining row is never removed.
///
/// Returns whether a row was removed.
///
/// # Errors
///
/// Returns `QueryIndexOutOfRange` if `index` is past the end of a list
/// with more than one row.
pub fn remove_row(rows: &mut Vec<ExampleQuery>, index: usize) -> Result<bool, TopicError> {
    if rows.len() <= 1 {
        return Ok(false);
    }
    if index >= rows.len() {
        return Err(TopicError::QueryIndexOutOfRange { index, len: rows.len() });
    }
    rows.remove(index);
    Ok(true)
}
