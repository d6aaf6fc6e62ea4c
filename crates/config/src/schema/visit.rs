//! Shared traversal over a record's schema.
//!
//! Loaders, the validator, and the masker all walk records the same way:
//! fields in declaration order, leaves handed to `scalar`, nested records to
//! `record`, and record lists to `records`. The default `record`/`records`
//! implementations simply recurse.

use super::record::{FieldMut, FieldRef, Record, RecordList};
use super::{FieldDescriptor, Slot};

/// Read-only visitor over a record tree.
pub trait Visitor {
    type Error;

    fn scalar(&mut self, field: &FieldDescriptor, slot: &dyn Slot) -> Result<(), Self::Error>;

    fn record(&mut self, _field: &FieldDescriptor, record: &dyn Record) -> Result<(), Self::Error> {
        walk(record, self)
    }

    fn records(
        &mut self,
        _field: &FieldDescriptor,
        list: &dyn RecordList,
    ) -> Result<(), Self::Error> {
        for index in 0..list.len() {
            if let Some(element) = list.element(index) {
                walk(element, self)?;
            }
        }
        Ok(())
    }
}

/// Visitor with mutable access to every field.
pub trait VisitorMut {
    type Error;

    fn scalar(&mut self, field: &FieldDescriptor, slot: &mut dyn Slot)
    -> Result<(), Self::Error>;

    fn record(
        &mut self,
        field: &FieldDescriptor,
        record: &mut dyn Record,
    ) -> Result<(), Self::Error>;

    fn records(
        &mut self,
        field: &FieldDescriptor,
        list: &mut dyn RecordList,
    ) -> Result<(), Self::Error>;
}

/// Visit every field of `record` in declaration order.
pub fn walk<V>(record: &dyn Record, visitor: &mut V) -> Result<(), V::Error>
where
    V: Visitor + ?Sized,
{
    let schema = record.record_schema();
    for (index, field) in schema.fields().iter().enumerate() {
        match record.field(index) {
            Some(FieldRef::Scalar(slot)) => visitor.scalar(field, slot)?,
            Some(FieldRef::Record(child)) => visitor.record(field, child)?,
            Some(FieldRef::Records(list)) => visitor.records(field, list)?,
            None => {}
        }
    }
    Ok(())
}

/// Visit every field of `record` in declaration order, mutably.
pub fn walk_mut<V>(record: &mut dyn Record, visitor: &mut V) -> Result<(), V::Error>
where
    V: VisitorMut + ?Sized,
{
    let schema = record.record_schema();
    for (index, field) in schema.fields().iter().enumerate() {
        match record.field_mut(index) {
            Some(FieldMut::Scalar(slot)) => visitor.scalar(field, slot)?,
            Some(FieldMut::Record(child)) => visitor.record(field, child)?,
            Some(FieldMut::Records(list)) => visitor.records(field, list)?,
            None => {}
        }
    }
    Ok(())
}
