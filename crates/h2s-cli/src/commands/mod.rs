pub mod bulk_convert;
pub mod convert;
pub mod dispatch;
pub mod plan;
pub mod report;
