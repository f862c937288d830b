pub mod fetch;
pub mod output;
pub mod parse;
pub mod push;
