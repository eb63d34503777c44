pub mod dropdown;
pub mod excel;
pub mod template;
pub mod utils;
