use anyhow::anyhow;

pub type RecordId = i64;

pub trait Record {
    fn id(&self) -> RecordId;
}

/// Ordered in-memory collection of records with a monotonic id counter.
///
/// Positions returned by [`Table::find`] are only valid until the next
/// `create` or `delete`, callers must hold the store lock between the lookup
/// and the mutation.
#[derive(Debug, Clone)]
pub struct Table<T: Record> {
    records: Vec<T>,
    last_id: RecordId,
}
impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self { records: vec![], last_id: 0 }
    }
}
impl<T: Record> Table<T> {
    pub fn from_records(records: Vec<T>) -> Self {
        let last_id = records.iter().map(Record::id).max().unwrap_or(0).max(0);
        Self { records, last_id }
    }
    pub fn records(&self) -> &[T] {
        &self.records
    }
    pub fn find(&self, id: RecordId) -> Option<(usize, &T)> {
        self.records.iter().enumerate().find(|(_, rec)| rec.id() == id)
    }
    pub fn create(&mut self, make: impl FnOnce(RecordId) -> T) -> &T {
        self.last_id += 1;
        let rec = make(self.last_id);
        self.records.push(rec);
        &self.records[self.records.len() - 1]
    }
    pub fn replace(&mut self, position: usize, rec: T) -> anyhow::Result<&T> {
        let slot = self.records.get_mut(position)
            .ok_or_else(|| anyhow!("Cannot replace record, position {position} out of range"))?;
        *slot = rec;
        Ok(slot)
    }
    pub fn delete(&mut self, position: usize) -> anyhow::Result<T> {
        if position >= self.records.len() {
            return Err(anyhow!("Cannot delete record, position {position} out of range"));
        }
        Ok(self.records.remove(position))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: RecordId,
        label: &'static str,
    }
    impl Record for Item {
        fn id(&self) -> RecordId {
            self.id
        }
    }
    fn item(id: RecordId, label: &'static str) -> Item {
        Item { id, label }
    }

    #[test]
    fn test_counter_continues_after_seeded_ids() {
        let mut table = Table::from_records(vec![item(1, "a"), item(3, "c"), item(2, "b")]);
        let created = table.create(|id| item(id, "d"));
        assert_eq!(created.id, 4);
        assert_eq!(table.records().len(), 4);

        let mut empty: Table<Item> = Table::default();
        assert_eq!(empty.create(|id| item(id, "x")).id, 1);
    }

    #[test]
    fn test_find_returns_position() {
        let table = Table::from_records(vec![item(5, "a"), item(7, "b")]);
        let (pos, rec) = table.find(7).unwrap();
        assert_eq!(pos, 1);
        assert_eq!(rec.label, "b");
        assert!(table.find(6).is_none());
    }

    #[test]
    fn test_delete_keeps_order_and_never_reuses_ids() {
        let mut table = Table::from_records(vec![item(1, "a"), item(2, "b"), item(3, "c")]);
        let removed = table.delete(1).unwrap();
        assert_eq!(removed.id, 2);
        let labels: Vec<_> = table.records().iter().map(|r| r.label).collect();
        assert_eq!(labels, ["a", "c"]);

        table.delete(1).unwrap();
        assert_eq!(table.create(|id| item(id, "d")).id, 4);
        assert!(table.delete(5).is_err());
    }

    #[test]
    fn test_replace_in_place() {
        let mut table = Table::from_records(vec![item(1, "a"), item(2, "b")]);
        table.replace(0, item(1, "z")).unwrap();
        assert_eq!(table.records()[0], item(1, "z"));
        assert_eq!(table.records()[1], item(2, "b"));
        assert!(table.replace(2, item(9, "q")).is_err());
    }
}
