pub mod estimate;
pub mod interpolate;
pub mod key;
pub mod range;
pub mod reckon;
pub mod sampling;
pub mod stride;
pub mod traits;

pub use estimate::EstimatePlanner;
pub use key::KeyPlanner;
pub use range::RangePlanner;
pub use reckon::ReckonPlanner;
pub use sampling::SamplingPlanner;
pub use traits::SplitPlanner;

#[cfg(test)]
mod interpolate_test;
