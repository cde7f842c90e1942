//! ActiveBackup for Google Workspace task models.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use strum::{EnumCount, IntoEnumIterator};

/// Item categories a GSuite task backs up.
///
/// The serialized form is the column/metric prefix used by the package,
/// e.g. `teamdrive_success_count`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Drive,
    Teamdrive,
    Mail,
    Contact,
    Calendar,
}

impl Category {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Plural noun used in help texts.
    pub fn items(self) -> &'static str {
        match self {
            Self::Drive => "drives",
            Self::Teamdrive => "team drives",
            Self::Mail => "mail accounts",
            Self::Contact => "contacts",
            Self::Calendar => "calendars",
        }
    }
}

/// Per-category counters of one task execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub success: i64,
    pub warning: i64,
    pub error: i64,
    pub transfered_size: i64,
}

/// Latest execution of one GSuite task, from `job_log_table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResultDbModel {
    pub task_id: i64,
    pub execution_status: i64,
    /// Zero when the package recorded no error code.
    pub error_code: i64,
    /// Epoch seconds.
    pub start_run_time: i64,
    /// Epoch seconds, zero while the task is still running.
    pub end_run_time: i64,
    pub transfered_size: i64,
    categories: [CategoryCounts; Category::COUNT],
}

impl TaskResultDbModel {
    pub fn new(task_id: i64) -> Self {
        Self {
            task_id,
            execution_status: 0,
            error_code: 0,
            start_run_time: 0,
            end_run_time: 0,
            transfered_size: 0,
            categories: [CategoryCounts::default(); Category::COUNT],
        }
    }

    pub fn category(&self, category: Category) -> &CategoryCounts {
        &self.categories[category.index()]
    }

    pub fn category_mut(&mut self, category: Category) -> &mut CategoryCounts {
        &mut self.categories[category.index()]
    }
}

impl<'r> FromRow<'r, SqliteRow> for TaskResultDbModel {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mut model = Self {
            task_id: row.try_get("task_id")?,
            execution_status: row.try_get("execution_status")?,
            error_code: row.try_get("error_code")?,
            start_run_time: row.try_get("start_run_time")?,
            end_run_time: row.try_get("end_run_time")?,
            transfered_size: row.try_get("transfered_size")?,
            categories: [CategoryCounts::default(); Category::COUNT],
        };

        for category in Category::iter() {
            let prefix = category.as_ref();
            *model.category_mut(category) = CategoryCounts {
                success: row.try_get(format!("{prefix}_success_count").as_str())?,
                warning: row.try_get(format!("{prefix}_warning_count").as_str())?,
                error: row.try_get(format!("{prefix}_error_count").as_str())?,
                transfered_size: row.try_get(format!("{prefix}_transfered_size").as_str())?,
            };
        }

        Ok(model)
    }
}

/// Declared task name, from `task_info_table` in the config store.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TaskNameDbModel {
    pub task_id: i64,
    pub task_name: String,
}
