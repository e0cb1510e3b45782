use crate::{ast::Predicate, value::Record};

/// A collection of records that can be filtered with a compiled predicate.
pub trait RecordStore {
    fn records(&self) -> &[Record];

    /// Records matching `predicate`, in store order.
    fn filter(&self, predicate: &Predicate) -> Vec<&Record> {
        self.records()
            .iter()
            .filter(|record| predicate.matches(record))
            .collect()
    }
}

/// Records held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        MemoryStore { records }
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn records(&self) -> &[Record] {
        &self.records
    }
}

impl RecordStore for [Record] {
    fn records(&self) -> &[Record] {
        self
    }
}

impl RecordStore for Vec<Record> {
    fn records(&self) -> &[Record] {
        self
    }
}

impl FromIterator<Record> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        MemoryStore {
            records: iter.into_iter().collect(),
        }
    }
}
