//! Row models for the ActiveBackup log stores.

pub mod device_result;
pub mod task_result;

pub use device_result::DeviceResultDbModel;
pub use task_result::{Category, CategoryCounts, TaskNameDbModel, TaskResultDbModel};
