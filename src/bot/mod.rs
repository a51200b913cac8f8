pub mod command;
pub mod dispatcher;
pub mod reply;

pub use command::Command;
pub use dispatcher::{Dispatcher, PriceCheck};
