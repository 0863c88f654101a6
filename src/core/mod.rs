pub mod action;
pub mod command;
pub mod context;
pub mod module;
pub mod mount;

pub use action::{Action, NotifyLevel};
pub use command::{parse_command, Command};
pub use context::{CollectionSnapshot, Context, Profile};
pub use module::Module;
pub use mount::{MountId, Mounts};
