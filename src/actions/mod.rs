//! Writes to Bear through its x-callback-url scheme.
//!
//! Bear's database is never written directly. Every mutation is a URL such
//! as `bear://x-callback-url/add-text?id=...` handed to the OS.

mod error;
mod ops;
mod runner;
mod url;

pub use error::{ActionError, ActionResult};
pub use ops::{
    BearActions, Dispatched, FileAttachment, InsertPosition, NewNote, validate_add_file,
    validate_add_tags, validate_add_text,
};
pub use runner::{ActionRunner, OpenCommand};
pub use url::{BEAR_URL_SCHEME, BearUrl};
