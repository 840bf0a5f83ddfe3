pub mod config;
pub mod constants;
pub mod error;
pub mod motion;
pub mod permission;
pub mod session;
pub mod shake;

pub use config::*;
pub use error::*;
pub use motion::*;
pub use permission::*;
pub use session::*;
pub use shake::*;
