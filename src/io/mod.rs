//! Reading and writing the flat `*`-delimited instance and solution file
//! formats.

pub mod error;
pub mod instance_file;
pub mod solution_file;

pub use error::InputFormatError;
