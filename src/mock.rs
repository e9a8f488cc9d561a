//! Seed staff records shown by the staff table.

use crate::models::{Role, StaffId, StaffRecord};

const FACULTIES: [(&str, &[&str]); 4] = [
    ("Engineering", &["Computer Science", "Electrical Engineering", "Civil Engineering"]),
    ("Science", &["Mathematics", "Physics", "Chemistry"]),
    ("Business", &["Accounting", "Marketing"]),
    ("Arts", &["History", "Linguistics"]),
];

const NAMES: [&str; 24] = [
    "amelia.hart",
    "noah.kim",
    "lucas.moreau",
    "sofia.rossi",
    "liam.nguyen",
    "mia.schmidt",
    "ethan.okafor",
    "chloe.dubois",
    "james.walker",
    "isla.fraser",
    "mateo.garcia",
    "zara.khan",
    "oliver.brown",
    "ava.jensen",
    "leo.tanaka",
    "grace.osei",
    "henry.clark",
    "ruby.patel",
    "jack.murphy",
    "nina.petrova",
    "samuel.cohen",
    "emma.larsen",
    "daniel.silva",
    "hana.sato",
];

/// Deterministic list of staff records.
///
/// Every fifth record is a super admin; faculties and departments rotate.
pub fn staff_records() -> Vec<StaffRecord> {
    NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let (faculty, departments) = FACULTIES[idx % FACULTIES.len()];
            let department = departments[(idx / FACULTIES.len()) % departments.len()];
            StaffRecord {
                id: StaffId(format!("e99f09a7-dd88-49d5-b1c8-1daf80c2d7{idx:02}")),
                email: format!("{name}@university.edu"),
                faculty: faculty.to_string(),
                department: department.to_string(),
                role: if idx % 5 == 0 { Role::SuperAdmin } else { Role::Staff },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let records = staff_records();
        let ids: HashSet<_> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_both_roles_present() {
        let records = staff_records();
        assert!(records.iter().any(|r| r.role == Role::SuperAdmin));
        assert!(records.iter().any(|r| r.role == Role::Staff));
    }
}
