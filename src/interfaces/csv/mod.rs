pub mod action_reader;
pub mod bill_writer;
