mod price_point;
mod period_series;
mod constituent;
pub mod index;

pub use price_point::PricePoint;
pub use period_series::{Granularity, PeriodPoint};
pub use constituent::{ConstituentQuote, RatioSource, WeightedAverage};
pub use index::{ConstituentSource, IndexSpec};
