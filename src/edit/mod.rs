//! Editing operations over the document model

mod replace;

pub use replace::{find, find_and_replace, find_and_replace_all, Match};
