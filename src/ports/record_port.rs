//! Record collection port: CRUD over identified records.

use crate::domain::error::HedgefundError;
use crate::domain::records::Record;

pub trait RecordPort<R: Record> {
    fn list(&self) -> Result<Vec<R>, HedgefundError>;

    /// Fails with [`HedgefundError::NotFound`] when no record has `id`.
    fn get(&self, id: &str) -> Result<R, HedgefundError>;

    fn create(&self, record: R) -> Result<R, HedgefundError>;

    /// Apply `edit` to the record with `id` and persist the result.
    fn update(&self, id: &str, edit: &mut dyn FnMut(&mut R)) -> Result<R, HedgefundError>;

    fn delete(&self, id: &str) -> Result<(), HedgefundError>;
}
