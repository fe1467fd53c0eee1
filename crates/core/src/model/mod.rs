pub mod domain;
pub mod point;

pub use domain::TimeDomain;
pub use point::TimePoint;
