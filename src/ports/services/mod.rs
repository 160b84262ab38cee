mod browse_service;
mod file_ops_service;
mod quota_service;
mod upload_service;

pub use browse_service::BrowseService;
pub use file_ops_service::FileOpsService;
pub use quota_service::QuotaService;
pub use upload_service::UploadService;
