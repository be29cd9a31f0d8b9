//! Runtime executing handler actions against an asset provider.

pub mod driver;

pub use driver::SessionDriver;
