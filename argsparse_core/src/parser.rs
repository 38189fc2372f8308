mod base;
mod dispatch;
mod middleware;
mod printer;
mod registry;

pub use base::*;
pub(crate) use middleware::*;
pub use printer::*;
pub(crate) use registry::*;
