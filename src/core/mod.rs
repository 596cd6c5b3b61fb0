pub mod complex_number;
pub mod debug;
pub mod error;
pub mod plane;
pub mod svg;
