pub mod duration;
pub mod groove;
pub mod pattern;

pub use duration::Duration;
pub use groove::Groove;
pub use pattern::DurationPattern;
