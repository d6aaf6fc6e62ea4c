//! Post-merge required-field validation.
//!
//! Walks the merged record depth-first in declaration order and fails on the
//! first `required` leaf that still holds its zero value. Nested records are
//! always visited; lists of records are checked element by element.

use super::error::ConfigError;
use crate::schema::visit::{Visitor, walk};
use crate::schema::{FieldDescriptor, Record, Slot};

struct RequiredCheck;

impl Visitor for RequiredCheck {
    type Error = ConfigError;

    fn scalar(&mut self, field: &FieldDescriptor, slot: &dyn Slot) -> Result<(), ConfigError> {
        if field.is_required() && slot.is_zero() {
            return Err(ConfigError::missing(field.display_name(), None));
        }
        Ok(())
    }
}

/// Check that no required field of `record` holds a zero value.
pub fn validate(record: &dyn Record) -> Result<(), ConfigError> {
    walk(record, &mut RequiredCheck)
}
