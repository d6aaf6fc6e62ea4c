//! Record traits tying a Rust type to its schema.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::{FieldDescriptor, Schema, Slot, schema_of};

/// A configuration record type with a declared schema.
///
/// Usually implemented with `#[derive(Settings)]`; a manual implementation
/// lists one `FieldDescriptor` per field in declaration order and must agree
/// with the `Record` accessors for the same indices.
pub trait Settings: Record + Default + DeserializeOwned + Send + Sync + 'static {
    /// Field descriptors in declaration order.
    fn fields() -> Vec<FieldDescriptor>;

    /// The memoized schema for this type.
    fn schema() -> Arc<Schema>
    where
        Self: Sized,
    {
        schema_of::<Self>()
    }
}

/// Object-safe access to the fields of a record instance.
pub trait Record {
    /// Schema describing this record's fields.
    fn record_schema(&self) -> Arc<Schema>;

    /// Shared access to the field at `index` (declaration order).
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    /// Mutable access to the field at `index` (declaration order).
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

pub enum FieldRef<'a> {
    Scalar(&'a dyn Slot),
    Record(&'a dyn Record),
    Records(&'a dyn RecordList),
}

pub enum FieldMut<'a> {
    Scalar(&'a mut dyn Slot),
    Record(&'a mut dyn Record),
    Records(&'a mut dyn RecordList),
}

/// A growable sequence of records of one type.
pub trait RecordList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, index: usize) -> Option<&dyn Record>;

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Record>;

    /// Append a default-valued element and return it.
    fn push_default(&mut self) -> &mut dyn Record;

    /// Drop the last element.
    fn pop(&mut self);

    /// Remove the first `count` elements.
    fn remove_front(&mut self, count: usize);
}

impl<R: Record + Default> RecordList for Vec<R> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element(&self, index: usize) -> Option<&dyn Record> {
        self.get(index).map(|r| r as &dyn Record)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Record> {
        self.get_mut(index).map(|r| r as &mut dyn Record)
    }

    fn push_default(&mut self) -> &mut dyn Record {
        self.push(R::default());
        let last = Vec::len(self) - 1;
        &mut self[last]
    }

    fn pop(&mut self) {
        Vec::pop(self);
    }

    fn remove_front(&mut self, count: usize) {
        self.drain(..count.min(Vec::len(self)));
    }
}
