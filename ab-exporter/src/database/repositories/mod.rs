//! Latest-execution queries over the log stores.
//!
//! "Latest" always means the row with the highest execution id for an
//! entity. Timestamps are never used to order executions.

pub mod device_result;
pub mod task_result;

pub use device_result::{DeviceResultRepository, SqlxDeviceResultRepository};
pub use task_result::{SqlxTaskResultRepository, TaskResultRepository};
