mod object_store;
mod store_source;

pub use object_store::{ObjectInfo, ObjectStore, PrefixListing, PutObjectOptions, StoredObject};
pub use store_source::StoreSource;
