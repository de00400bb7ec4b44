//! Student entity and its request/response shapes.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

/// A row of the `estudantes` table.
///
/// `id` is fixed at construction. `name` changes only through [`Student::rename`] and
/// `active` only through [`Student::deactivate`]; there is no way back to active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Student {
    id: Uuid,
    name: String,
    active: bool,
}

impl Student {
    pub fn new(name: impl Into<String>) -> Self {
        Student {
            id: Uuid::new_v4(),
            name: name.into(),
            active: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

impl<'r> FromRow<'r, SqliteRow> for Student {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let raw_id: String = row.try_get("id")?;
        let id = Uuid::parse_str(&raw_id).map_err(|e| sqlx::Error::ColumnDecode {
            index: "id".into(),
            source: Box::new(e),
        })?;
        Ok(Student {
            id,
            name: row.try_get("name")?,
            active: row.try_get("active")?,
        })
    }
}

/// Public projection: `{ "id", "name" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: Uuid,
    pub name: String,
}

impl From<&Student> for StudentDto {
    fn from(s: &Student) -> Self {
        StudentDto {
            id: s.id,
            name: s.name.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AddStudentRequest {
    #[serde(alias = "nome")]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateStudentRequest {
    #[serde(alias = "nome")]
    pub name: String,
}
