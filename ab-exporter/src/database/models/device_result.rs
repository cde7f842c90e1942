//! ActiveBackup for Business device result model.

use sqlx::FromRow;

/// Latest completed backup of one device, from `device_result_table`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DeviceResultDbModel {
    pub device_name: String,
    /// Package-defined result status code.
    pub status: i64,
    /// Epoch seconds.
    pub time_start: i64,
    /// Epoch seconds, zero while the backup is still running.
    pub time_end: i64,
    pub transfered_bytes: i64,
}
