// Pipeline processing: one module per consolidation stage, in run order

pub mod parser;
pub mod grouping;
pub mod eligibility;
pub mod consolidate;
pub mod collision;
pub mod ordering;
pub mod emit;
