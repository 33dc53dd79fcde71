pub mod analysis;
pub mod json_lines;
pub mod memory;
