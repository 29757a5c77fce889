use crate::models::attendance::AttendanceRecord;
use std::collections::HashMap;

/// In-memory working records of one session, one per roster student,
/// kept in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingSet {
    session_id: i64,
    order: Vec<i64>,
    records: HashMap<i64, AttendanceRecord>,
}

impl WorkingSet {
    pub fn new(session_id: i64) -> Self {
        Self {
            session_id,
            order: Vec::new(),
            records: HashMap::new(),
        }
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn student_ids(&self) -> &[i64] {
        &self.order
    }

    pub fn contains(&self, student_id: i64) -> bool {
        self.records.contains_key(&student_id)
    }

    pub fn get(&self, student_id: i64) -> Option<&AttendanceRecord> {
        self.records.get(&student_id)
    }

    pub(crate) fn get_mut(&mut self, student_id: i64) -> Option<&mut AttendanceRecord> {
        self.records.get_mut(&student_id)
    }

    /// Adds a record for a student not yet in the set. Returns false (and
    /// keeps the existing record) when the student is already present.
    pub(crate) fn insert(&mut self, record: AttendanceRecord) -> bool {
        if self.records.contains_key(&record.student_id) {
            return false;
        }
        self.order.push(record.student_id);
        self.records.insert(record.student_id, record);
        true
    }

    /// Records in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}
