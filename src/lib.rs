#![forbid(unsafe_code)]

#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate log;

//Application Imports/Exports
pub mod constants;
pub mod format_traits;
pub mod memory;
pub mod row_formats;
pub mod types;
