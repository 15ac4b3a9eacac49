use std::io::Cursor;

use placement_ai::workflows::placement::{eligible_students_count, DriveCatalog, DriveId};
use placement_ai::workflows::roster::RosterImporter;

const ROSTER: &str = "\
id,name,branch,batch,gender,currentCGPA,activeBacklogs,tenthPercentage,twelfthPercentage,programmingLanguages,frameworks,tools,internships
stu-1,Asha Rao,CSE,2025,Female,8.4,0,92,90,Rust;Python,Axum,Docker,Acme
stu-2,Ravi Kumar,IT,2025,,7.6,1,81,77,Java,Spring,,
stu-3,Meera Das,ME,2025,,6.2,2,75,70,,,,
";

const DRIVES: &str = r#"[
    {
        "id": "drv-platform",
        "company": "Globex",
        "role": "Platform Engineer",
        "allowPartiallyEligible": true,
        "rules": [
            { "field": "cgpa", "operator": ">=", "value": 7.5 },
            { "field": "branch", "operator": "IN", "value": ["CSE", "IT"] },
            { "field": "activeBacklogs", "operator": "<=", "value": 0 }
        ]
    }
]"#;

#[test]
fn imported_roster_feeds_cohort_counts() {
    let students = RosterImporter::from_reader(Cursor::new(ROSTER)).expect("roster imports");
    let drives = DriveCatalog::from_json(DRIVES).expect("catalog parses");

    assert_eq!(students.len(), 3);
    assert_eq!(drives[0].id, DriveId("drv-platform".to_string()));

    let summary = eligible_students_count(&students, &drives[0]);

    assert_eq!(summary.eligible, 1);
    assert_eq!(summary.partially_eligible, 1);
    assert_eq!(summary.not_eligible, 1);
    assert_eq!(summary.eligible_students[0].0, "stu-1");
}

#[test]
fn impossible_scores_never_reach_the_engine() {
    let roster = "\
id,name,branch,batch,gender,currentCGPA,activeBacklogs,tenthPercentage,twelfthPercentage,programmingLanguages,frameworks,tools,internships
stu-9,Dev Rao,CSE,2025,,NaN,0,-40,250,,,,
";

    let err = RosterImporter::from_reader(Cursor::new(roster)).expect_err("scores rejected");

    assert!(
        err.to_string().contains("currentCGPA"),
        "unexpected error: {err}"
    );
}
