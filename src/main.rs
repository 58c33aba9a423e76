//Vendor Imports
#[macro_use]
extern crate log;
extern crate simplelog;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use thiserror::Error;

//Application Imports
use unsaferowlib::row_formats::{RowLayout, UnsafeRow};

/// Dumps a row file written by `UnsafeRow::write_to`, given the number of fields it holds.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])?;

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        return Err(Box::new(DumpError::Usage()));
    }
    let num_fields: usize = args[2].parse()?;

    let data = fs::read(&args[1])?;
    info!("Read {} bytes from {}", data.len(), args[1]);

    let needed = RowLayout::new(num_fields).fixed_length_size();
    if data.len() < needed {
        return Err(Box::new(DumpError::FileTooShort(data.len(), needed)));
    }

    let size = data.len();
    let row = UnsafeRow::bound(data, 0, num_fields, size);

    println!("fields: {}", row.num_fields());
    println!("size: {}", row.size_in_bytes());
    println!("hash: {}", row.hash_code());
    println!("any null: {}", row.any_null());
    for i in 0..row.num_fields() {
        if row.is_null_at(i) {
            println!("\t{}: null", i);
        } else {
            println!("\t{}: {:#018x}", i, row.get_long(i));
        }
    }
    println!("words: {}", row);

    Ok(())
}

#[derive(Debug, Error)]
enum DumpError {
    #[error("Usage: unsaferow-dump <row file> <field count>")]
    Usage(),
    #[error("File holds {0} bytes, the field count needs at least {1}")]
    FileTooShort(usize, usize),
}
