//! Property test suite entry point.

mod matching_props;
mod tokenizer_props;
