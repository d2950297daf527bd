pub mod parse;
pub mod record;
