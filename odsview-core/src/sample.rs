//! Fixed sample spreadsheet used to try out the converter and the server

use anyhow::Result;
use std::path::Path;

use crate::reader::{Document, Sheet};
use crate::writer::write_document_to_path;

/// Default output file name of the sample generator
pub const SAMPLE_FILE_NAME: &str = "sample.ods";

pub const SCHEDULE_SHEET: &str = "Schedule";
pub const GRADES_SHEET: &str = "Student Grades";

pub const SCHEDULE_HEADER: [&str; 6] =
    ["Time", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
pub const SCHEDULE_ROWS: [[&str; 6]; 3] = [
    ["9:00", "Math", "English", "Science", "History", "Art"],
    ["10:00", "Physics", "Chemistry", "Biology", "Geography", "Music"],
    ["11:00", "Literature", "Programming", "Statistics", "Economics", "PE"],
];

pub const GRADES_HEADER: [&str; 5] = ["Student Name", "Math", "Science", "English", "Average"];
pub const GRADES_ROWS: [[&str; 5]; 5] = [
    ["Alice Smith", "95", "88", "92", "91.7"],
    ["Bob Johnson", "87", "91", "85", "87.7"],
    ["Carol White", "92", "95", "89", "92.0"],
    ["David Brown", "78", "82", "80", "80.0"],
    ["Emma Davis", "91", "87", "94", "90.7"],
];

/// The two-sheet sample document
pub fn sample_document() -> Document {
    let schedule = std::iter::once(SCHEDULE_HEADER).chain(SCHEDULE_ROWS);
    let grades = std::iter::once(GRADES_HEADER).chain(GRADES_ROWS);

    Document::new(vec![
        Sheet::from_texts(SCHEDULE_SHEET, schedule),
        Sheet::from_texts(GRADES_SHEET, grades),
    ])
}

/// Write the sample document to `path`
pub fn write_sample<P: AsRef<Path>>(path: P) -> Result<()> {
    write_document_to_path(&sample_document(), path)
}
