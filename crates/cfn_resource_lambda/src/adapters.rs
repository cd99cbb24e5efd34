pub mod callback;
pub mod word_source;
