mod client;
mod progress;

pub mod github;

pub use self::progress::{ProgressCounter, ProgressObserver};
