use std::collections::HashMap;

use chrono::{DateTime, Utc};
use logbook_core::{CoreError, CoreResult};
use logbook_shared::{Cargo, FitnessAttendance, FitnessMember, Location, RecordId, User, Visitor};

use crate::allocator::IdAllocator;

/// A record kept in a [`Table`].
pub trait Record: Clone {
    /// Name used in not-found errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> RecordId;
}

macro_rules! impl_record {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Record for $ty {
                const ENTITY: &'static str = $name;

                fn id(&self) -> RecordId {
                    self.id
                }
            }
        )*
    };
}

impl_record! {
    User => "user",
    Location => "location",
    Visitor => "visitor",
    Cargo => "cargo",
    FitnessMember => "fitness member",
    FitnessAttendance => "attendance",
}

/// Keyed collection of one record type plus its id sequence.
///
/// A table does no locking of its own; the store wraps each one in a lock
/// and every method here runs under it.
#[derive(Debug)]
pub struct Table<T> {
    rows: HashMap<RecordId, T>,
    ids: IdAllocator,
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Allocate the next id, stamp the creation time and store the record
    /// produced by `build`.
    pub fn insert_with<F>(&mut self, now: DateTime<Utc>, build: F) -> T
    where
        F: FnOnce(RecordId, DateTime<Utc>) -> T,
    {
        let id = self.ids.allocate();
        let record = build(id, now);
        debug_assert_eq!(record.id(), id);
        self.rows.insert(id, record.clone());
        record
    }

    pub fn get(&self, id: RecordId) -> CoreResult<&T> {
        self.rows.get(&id).ok_or_else(|| CoreError::not_found(T::ENTITY, id))
    }

    pub fn get_mut(&mut self, id: RecordId) -> CoreResult<&mut T> {
        self.rows.get_mut(&id).ok_or_else(|| CoreError::not_found(T::ENTITY, id))
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.rows.values().find(|record| predicate(record))
    }

    /// Clones of every record matching `predicate`, in no particular order.
    pub fn select<P>(&self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.rows.values().filter(|record| predicate(record)).cloned().collect()
    }

    /// Replace an existing record wholesale.
    pub fn replace(&mut self, record: T) -> CoreResult<T> {
        let slot = self.get_mut(record.id())?;
        *slot = record.clone();
        Ok(record)
    }

    pub fn remove(&mut self, id: RecordId) -> CoreResult<T> {
        self.rows.remove(&id).ok_or_else(|| CoreError::not_found(T::ENTITY, id))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
