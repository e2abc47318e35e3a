use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Renders the one-line record appended for every found key. The wording
/// and byte layout are stable so external tooling can keep grepping the
/// file across releases.
pub fn found_key_line(private_key_hex: &str, address: &str) -> String {
    format!("Chave privada: {private_key_hex}, Endereço público: {address}\n")
}

/// Appends a found key to the log file, creating the file on first use.
///
/// Callers must invoke this before announcing a hit anywhere else; once a
/// match is celebrated on a console that may already be gone, the file is
/// the only witness.
pub fn append_found_key(path: &Path, private_key_hex: &str, address: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(found_key_line(private_key_hex, address).as_bytes())?;
    Ok(())
}
