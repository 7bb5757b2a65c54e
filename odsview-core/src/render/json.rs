//! JSON output: an array of `{"name": ..., "data": [[...]]}` objects

use crate::extract::SheetTable;

pub fn to_json_pretty(tables: &[SheetTable]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tables)
}
