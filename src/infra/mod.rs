pub mod file_adapter;
