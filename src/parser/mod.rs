// Parser module: HTML extraction of the balance feed.

pub mod mister_parser;

pub use mister_parser::{MisterParser, Parser};
