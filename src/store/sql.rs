//! Statements over the `responses` table.

use itertools::Itertools as _;

pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS responses (
  id      INTEGER PRIMARY KEY AUTOINCREMENT,
  ext_id  TEXT,
  ts      TEXT,
  created TEXT DEFAULT (datetime('now')),
  answers TEXT NOT NULL
)";

pub const SELECT_BY_ID: &str = "SELECT * FROM responses WHERE id = ?";
pub const SELECT_ALL: &str = "SELECT * FROM responses ORDER BY id";
pub const SELECT_SUMMARIES: &str = "SELECT id, ext_id, ts, created FROM responses ORDER BY id";
pub const INSERT: &str = "INSERT INTO responses (ext_id, ts, answers) VALUES (?, ?, ?) RETURNING id";
pub const DELETE_BY_ID: &str = "DELETE FROM responses WHERE id = ?";

/// `SELECT ... WHERE id IN (?, ?, ...) ORDER BY id` for `count` ids.
pub fn select_by_ids(count: usize) -> String {
    format!(
        "SELECT * FROM responses WHERE id IN ({}) ORDER BY id",
        std::iter::repeat_n("?", count).join(", ")
    )
}
