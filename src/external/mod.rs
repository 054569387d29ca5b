pub mod constituents;
pub mod fundamentals;
pub mod price_provider;
pub mod yahoo;
