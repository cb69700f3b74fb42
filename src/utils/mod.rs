//! Helpers around translated content

pub mod locale_file;
pub mod plural;
