use huffman_rs::HuffmanCoder;
use std::io::{self, BufRead};
use tracing_subscriber::EnvFilter;

/// Reads one line from stdin, compresses it, and prints the code, the
/// serialized tree and the decoded message.
///
/// Usage: echo "message" | RUST_LOG=huffman_rs=debug cargo run --example roundtrip
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    println!("Enter the message to encode:");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let message = line.trim_end_matches(['\r', '\n']);

    let mut coder = HuffmanCoder::new();
    let code = coder.compress(message.as_bytes())?;
    let serialized = coder.serialize_tree()?;
    let decoded = coder.decompress(&code)?;

    println!("\nCode message:\n{}\n", code);
    println!("Serialized tree:\n{}\n", String::from_utf8_lossy(&serialized));
    println!("Confirm the message:\n{}\n", String::from_utf8_lossy(&decoded));

    if let Some(stats) = coder.stats() {
        println!("=== Statistics ===");
        println!("Input bytes: {}", stats.input_length);
        println!("Distinct symbols: {}", stats.distinct_symbols);
        println!("Encoded bits: {}", stats.encoded_bits);
        println!("Bits per symbol: {:.3}", stats.bits_per_symbol());
        println!("Compression ratio: {:.2}%", stats.compression_ratio());
    }

    Ok(())
}
