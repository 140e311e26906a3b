mod defaults;
mod file;
mod import;
mod memory;
mod repository;

pub use defaults::default_roster;
pub use file::JsonFileRoster;
pub use import::{RosterImportError, RosterImporter};
pub use memory::InMemoryRoster;
pub use repository::{RosterError, RosterRepository};
