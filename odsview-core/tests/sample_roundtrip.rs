use odsview_core::sample::{
    GRADES_HEADER, GRADES_ROWS, GRADES_SHEET, SCHEDULE_HEADER, SCHEDULE_ROWS, SCHEDULE_SHEET,
    write_sample,
};
use odsview_core::{EmptySheetPolicy, extract, load_document, read_tables};

fn owned<const N: usize>(row: [&str; N]) -> Vec<String> {
    row.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_sample_file_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sample.ods");
    write_sample(&path)?;

    let tables = read_tables(&path, EmptySheetPolicy::Omit)?;
    assert_eq!(tables.len(), 2);

    let schedule = &tables[0];
    assert_eq!(schedule.name, SCHEDULE_SHEET);
    assert_eq!(schedule.data.len(), 4);
    assert_eq!(schedule.data[0], owned(SCHEDULE_HEADER));
    for (row, expected) in schedule.data[1..].iter().zip(SCHEDULE_ROWS) {
        assert_eq!(row, &owned(expected));
    }

    let grades = &tables[1];
    assert_eq!(grades.name, GRADES_SHEET);
    assert_eq!(grades.data.len(), 6);
    assert_eq!(grades.data[0], owned(GRADES_HEADER));
    for (row, expected) in grades.data[1..].iter().zip(GRADES_ROWS) {
        assert_eq!(row, &owned(expected));
    }
    assert_eq!(grades.data[3][0], "Carol White");
    assert_eq!(grades.data[3][4], "92.0");

    Ok(())
}

#[test]
fn test_extraction_is_idempotent_on_loaded_document() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sample.ods");
    write_sample(&path)?;

    let document = load_document(&path)?;
    let first = extract(&document, EmptySheetPolicy::Omit);
    let second = extract(&document, EmptySheetPolicy::Omit);
    assert_eq!(first, second);

    // Reloading the unmodified file gives the same tables
    assert_eq!(read_tables(&path, EmptySheetPolicy::Omit)?, first);
    Ok(())
}
