//! Error catalog and definitions for the JUnit Report Helper
//!
//! # Error Code Ranges
//!
//! | Range      | Category    | Description                               |
//! |------------|-------------|-------------------------------------------|
//! | E001-E099  | Environment | Interpreter, converter, executable lookup |
//! | E100-E199  | Input       | Input report file problems                |
//! | E200-E299  | Converter   | Converter process failures                |
//! | E300-E399  | Output      | Generated report artifact problems        |
//! | E400-E499  | Report      | JUnit XML parsing errors                  |

pub mod catalog;

pub use catalog::{ErrorCategory, ErrorCode, ErrorEntry};
