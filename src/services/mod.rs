mod browse_service_impl;
mod file_ops_service_impl;
mod policy;
mod quota_service_impl;
mod upload_service_impl;

pub use browse_service_impl::BrowseServiceImpl;
pub use file_ops_service_impl::FileOpsServiceImpl;
pub use policy::StoragePolicy;
pub use quota_service_impl::QuotaServiceImpl;
pub use upload_service_impl::UploadServiceImpl;
