mod bindable;
mod storage_buffer;
mod uploader;

pub use self::bindable::*;
pub use self::storage_buffer::*;
pub use self::uploader::*;
