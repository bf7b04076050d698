/// Message composition
///
/// Builds multipart bodies for the demo messages. MIME encoding itself
/// is left to lettre.

pub mod composer;
pub mod types;

pub use composer::MessageComposer;
pub use types::Draft;
