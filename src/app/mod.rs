pub mod ports;
pub mod merge_use_case;
