pub mod listing;
pub mod quota;
pub mod transfer;
pub mod upload;

pub use listing::*;
pub use quota::*;
pub use transfer::*;
pub use upload::*;
