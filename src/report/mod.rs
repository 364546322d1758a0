// Report module: renders the analytics result for people and for other tools.

pub mod summary;
pub mod writer;

pub use summary::render_text;
pub use writer::{write_json, write_text};
