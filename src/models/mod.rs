mod notification;
mod system;
mod task;
mod weather;

pub use notification::*;
pub use system::*;
pub use task::*;
pub use weather::*;
