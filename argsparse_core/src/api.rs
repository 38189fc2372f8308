mod capture;
mod core;
mod parameter;

pub use self::core::*;
pub use parameter::*;
