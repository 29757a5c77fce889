use chrono::NaiveDate;
use serde::Serialize;

/// One roster entry: a beneficiary enrolled in a class instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrollment {
    pub id: i64,                // ⇔ enrollments.id, also the student id on attendance rows
    pub instance_id: i64,       // ⇔ enrollments.instance_id
    pub name: String,           // ⇔ enrollments.name
    pub tax_id: Option<String>, // ⇔ enrollments.tax_id (CPF), optional
    pub enrolled_on: NaiveDate, // ⇔ enrollments.enrolled_on (TEXT "YYYY-MM-DD")
    pub active: bool,           // ⇔ enrollments.active (INT 0/1)
}
