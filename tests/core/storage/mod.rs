//! Storage layer tests

mod test_state;
