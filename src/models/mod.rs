pub mod participant;
pub mod language;
pub mod messages;
pub mod room;
pub mod health;
pub mod diagnostics;
pub mod error;

pub use participant::*;
pub use language::*;
pub use messages::*;
pub use room::*;
pub use health::*;
pub use diagnostics::*;
pub use error::*;
