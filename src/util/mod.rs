mod progress;
mod tracing;

pub use self::progress::UploadProgress;
pub use self::tracing::init as init_tracing;
