/// Diagnostic tool: dumps the raw binary structure of a JWW file.
///
/// Usage:
///     cargo run --bin jww_dump -- <input.jww>
///
/// Prints the signature, version and file size, then scans the raw bytes
/// for the recognized entity class-name strings with their offsets. Useful
/// for eyeballing where the object streams sit in a file the parser
/// rejects.
use std::env;
use std::fs;
use std::process;

use jwwrust::io::jww::{RECOGNIZED_CLASSES, SIGNATURE};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: jww_dump <input.jww>");
        process::exit(1);
    }

    let data = match fs::read(&args[1]) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    println!("File size: {} bytes", data.len());

    if data.len() < 12 {
        eprintln!("File too small for a JWW header ({} bytes)", data.len());
        process::exit(1);
    }

    let signature = &data[0..8];
    println!(
        "Signature: {:?} ({})",
        String::from_utf8_lossy(signature),
        if signature == SIGNATURE.as_slice() { "valid" } else { "INVALID" }
    );

    let version = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
    println!("Version: {}", version);

    println!("\n--- Class-name string scan ---");
    let mut found = 0;
    for class in RECOGNIZED_CLASSES {
        let needle = class.as_bytes();
        for offset in find_all(&data, needle) {
            println!("Found {:?} at offset {} (0x{:X})", class, offset, offset);
            found += 1;
        }
    }
    if found == 0 {
        println!("No class-name strings found");
    }
}

fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    let mut offsets = Vec::new();
    if needle.is_empty() || haystack.len() < needle.len() {
        return offsets;
    }
    for i in 0..=(haystack.len() - needle.len()) {
        if &haystack[i..i + needle.len()] == needle {
            offsets.push(i);
        }
    }
    offsets
}
