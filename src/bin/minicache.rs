//! Interactive front-end: a line-oriented REPL over `minicache::Cache`.
//!
//! Grounded on `original_source/src/main.cpp`'s `MiniRedisCLI` — same
//! command set, same response vocabulary (`OK`, `(nil)`, `(integer) N`,
//! quoted values), same tokenizer (split on whitespace, uppercase the
//! first token). This is explicitly out of the cache's core design per
//! the purpose-and-scope non-goals; it's shipped here the way the
//! teacher crate ships a small demo `main.rs` alongside its library.

use clap::Parser;
use minicache::{Cache, CacheConfig};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "minicache", about = "An in-process key-value cache REPL")]
struct Args {
    /// Maximum estimated memory usage, in bytes.
    #[arg(long, default_value_t = CacheConfig::DEFAULT_MAX_MEMORY)]
    max_memory: usize,

    /// Maximum number of retained keys.
    #[arg(long, default_value_t = CacheConfig::DEFAULT_MAX_KEYS)]
    max_keys: usize,

    /// A single command to run non-interactively, e.g. `minicache -- SET a 1`.
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cache = match Cache::new(args.max_memory, args.max_keys) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if !args.command.is_empty() {
        let line = args.command.join(" ");
        process_command(&mut cache, &line);
        return;
    }

    run_repl(&mut cache);
}

fn run_repl(cache: &mut Cache) {
    print_welcome();

    let stdin = io::stdin();
    loop {
        print!("minicache> ");
        io::stdout().flush().ok();

        let mut input = String::new();
        if stdin.lock().read_line(&mut input).unwrap_or(0) == 0 {
            break; // EOF
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if !process_command(cache, input) {
            break;
        }
    }
}

/// Returns `false` when the REPL should stop (QUIT/EXIT).
fn process_command(cache: &mut Cache, input: &str) -> bool {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    if tokens.is_empty() {
        return true;
    }
    let command = tokens[0].to_uppercase();

    match command.as_str() {
        "SET" => handle_set(cache, &tokens),
        "GET" => handle_get(cache, &tokens),
        "DELETE" | "DEL" => handle_delete(cache, &tokens),
        "EXISTS" => handle_exists(cache, &tokens),
        "EXPIRE" => handle_expire(cache, &tokens),
        "FLUSH" => {
            cache.flush();
            println!("OK");
        }
        "STATS" => print_stats(cache),
        "HELP" => print_help(),
        "QUIT" | "EXIT" => {
            println!("Goodbye!");
            return false;
        }
        other => {
            println!("Error: Unknown command '{other}'");
            println!("Type HELP for available commands");
        }
    }
    true
}

fn handle_set(cache: &mut Cache, tokens: &[&str]) {
    if tokens.len() < 3 {
        println!("Error: SET requires at least key and value");
        println!("Usage: SET key value [ttl]");
        return;
    }
    let key = tokens[1];
    let value = tokens[2];
    let ttl = if tokens.len() >= 4 {
        match tokens[3].parse::<i64>() {
            Ok(ttl) if ttl > 0 => ttl,
            Ok(_) => {
                println!("Error: TTL must be positive");
                return;
            }
            Err(_) => {
                println!("Error: Invalid TTL value");
                return;
            }
        }
    } else {
        0
    };

    match cache.set(key, value, ttl) {
        Ok(_) if ttl > 0 => println!("OK (expires in {ttl} seconds)"),
        Ok(_) => println!("OK"),
        Err(e) => println!("Error: {e}"),
    }
}

fn handle_get(cache: &mut Cache, tokens: &[&str]) {
    if tokens.len() < 2 {
        println!("Error: GET requires a key");
        println!("Usage: GET key");
        return;
    }
    match cache.get(tokens[1]) {
        Some(value) => println!("\"{value}\""),
        None => println!("(nil)"),
    }
}

fn handle_delete(cache: &mut Cache, tokens: &[&str]) {
    if tokens.len() < 2 {
        println!("Error: DELETE requires a key");
        println!("Usage: DELETE key");
        return;
    }
    println!("(integer) {}", if cache.del(tokens[1]) { 1 } else { 0 });
}

fn handle_exists(cache: &mut Cache, tokens: &[&str]) {
    if tokens.len() < 2 {
        println!("Error: EXISTS requires a key");
        println!("Usage: EXISTS key");
        return;
    }
    println!("(integer) {}", if cache.exists(tokens[1]) { 1 } else { 0 });
}

fn handle_expire(cache: &mut Cache, tokens: &[&str]) {
    if tokens.len() < 3 {
        println!("Error: EXPIRE requires key and seconds");
        println!("Usage: EXPIRE key seconds");
        return;
    }
    let seconds = match tokens[2].parse::<i64>() {
        Ok(seconds) if seconds > 0 => seconds,
        Ok(_) => {
            println!("Error: Seconds must be positive");
            return;
        }
        Err(_) => {
            println!("Error: Invalid seconds value");
            return;
        }
    };
    println!(
        "(integer) {}",
        if cache.expire(tokens[1], seconds) { 1 } else { 0 }
    );
}

fn print_stats(cache: &Cache) {
    println!();
    println!("=== CACHE STATISTICS ===");
    println!("Total Keys: {}", cache.key_count());
    println!(
        "Memory Usage: {} / {}",
        format_memory_size(cache.memory_usage() as u64),
        format_memory_size(cache.max_memory() as u64)
    );
    let pct = if cache.max_memory() > 0 {
        cache.memory_usage() as f64 / cache.max_memory() as f64 * 100.0
    } else {
        0.0
    };
    println!("Memory Usage %: {pct:.2}%");
    println!("Total Operations: {}", cache.total_operations());
    println!("Operations/sec: {:.2}", cache.ops_per_second());
    println!("LRU Cache Size: {} / {}", cache.key_count(), cache.max_keys());
    println!("TTL Entries: {}", cache.ttl_index_size());
    println!("========================");
    println!();
}

/// B/KB/MB/GB, 1024-based, two decimal places — matches
/// `original_source/src/utils.cpp`'s `Utils::formatMemorySize`.
fn format_memory_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2} {}", UNITS[unit])
}

fn print_welcome() {
    println!("╔══════════════════════════════════════╗");
    println!("║              MINICACHE                ║");
    println!("║        High-Performance Cache         ║");
    println!("╚══════════════════════════════════════╝");
    println!();
    println!("Supported Commands:");
    println!("  SET key value [ttl]  - Store key-value with optional TTL");
    println!("  GET key             - Retrieve value by key");
    println!("  DELETE key          - Remove key");
    println!("  EXISTS key          - Check if key exists");
    println!("  EXPIRE key seconds  - Set expiration time");
    println!("  FLUSH               - Clear all data");
    println!("  STATS               - Show cache statistics");
    println!("  HELP                - Show this help");
    println!("  QUIT                - Exit program");
    println!();
    println!("Ready for commands...");
    println!();
}

fn print_help() {
    println!();
    println!("=== MINICACHE COMMANDS ===");
    println!("SET key value [ttl]    Store a key-value pair with optional TTL in seconds");
    println!("GET key                Retrieve the value for a key");
    println!("DELETE key             Remove a key and its value");
    println!("EXISTS key             Check if a key exists and is not expired");
    println!("EXPIRE key seconds     Set expiration time for an existing key");
    println!("FLUSH                  Clear the entire cache");
    println!("STATS                  Display cache statistics and performance metrics");
    println!("HELP                   Show this help message");
    println!("QUIT                   Exit the program");
    println!();
    println!("Examples:");
    println!("  > SET user:1 john 300    # Store 'john' with 5 min TTL");
    println!("  > GET user:1             # Retrieve value");
    println!("  > EXISTS user:1          # Check existence");
    println!("  > EXPIRE user:1 60       # Set 1 min expiry");
    println!("  > DELETE user:1          # Remove key");
    println!("========================");
    println!();
}
