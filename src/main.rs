//! Envelope Cipher - password-based encryption of text values.
//!
//! Encrypts values into self-contained envelope strings and decrypts them back.
//! Values come from the command line or, when none are given, one per stdin line.

use clap::{Parser, Subcommand};
use envelope_cipher::{CipherOptions, EnvelopeCipher, Result, TextEncoding};
use serde_json::Value;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "envelope-cipher")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Password-based authenticated encryption of text values",
    long_about = "Encrypts values with AES-256-GCM under a PBKDF2-derived key and packs salt, IV, tag and ciphertext into a single text envelope."
)]
struct Cli {
    /// Secret used to derive keys (prompted for when absent)
    #[arg(long, global = true, env = "ENVELOPE_CIPHER_SECRET", hide_env_values = true)]
    secret: Option<String>,

    /// JSON options file (encoding, salt_length, pbkdf2_iterations)
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Envelope text encoding: hex, base64 or base64url (default: hex)
    #[arg(long, global = true)]
    encoding: Option<TextEncoding>,

    /// Salt length in bytes (default: 64)
    #[arg(long, global = true)]
    salt_length: Option<usize>,

    /// PBKDF2 iteration count (default: 100000)
    #[arg(long, global = true)]
    iterations: Option<u32>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt values into envelopes
    Encrypt {
        /// Values to encrypt (default: one per stdin line)
        values: Vec<String>,

        /// Parse each value as JSON (text, number or boolean; null is rejected)
        #[arg(long)]
        json: bool,
    },

    /// Decrypt envelopes back to text
    Decrypt {
        /// Envelopes to decrypt (default: one per stdin line)
        envelopes: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("envelope_cipher=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let options = resolve_options(
        cli.options.as_deref(),
        cli.encoding,
        cli.salt_length,
        cli.iterations,
    )?;
    let secret = match cli.secret {
        Some(secret) => secret,
        None => rpassword::prompt_password("Secret: ")?,
    };
    let cipher = EnvelopeCipher::with_options(secret, options)?;

    match cli.command {
        Commands::Encrypt { values, json } => cmd_encrypt(&cipher, values, json),
        Commands::Decrypt { envelopes } => cmd_decrypt(&cipher, envelopes),
    }
}

/// Options file first, then explicit flags on top.
fn resolve_options(
    path: Option<&Path>,
    encoding: Option<TextEncoding>,
    salt_length: Option<usize>,
    iterations: Option<u32>,
) -> Result<CipherOptions> {
    let mut options = match path {
        Some(path) => CipherOptions::load(path)?,
        None => CipherOptions::default(),
    };

    if let Some(encoding) = encoding {
        options = options.with_encoding(encoding);
    }
    if let Some(salt_length) = salt_length {
        options = options.with_salt_length(salt_length);
    }
    if let Some(iterations) = iterations {
        options = options.with_pbkdf2_iterations(iterations);
    }

    Ok(options)
}

/// Positional inputs, or non-empty stdin lines when there are none.
///
/// Whitespace-only lines are kept, so `"   "` is a value like any other.
fn read_inputs(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            inputs.push(line.to_string());
        }
    }
    Ok(inputs)
}

fn cmd_encrypt(cipher: &EnvelopeCipher, values: Vec<String>, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for value in read_inputs(values)? {
        let envelope = if json {
            let value: Value = serde_json::from_str(&value)?;
            cipher.encrypt_value(&value)?
        } else {
            cipher.encrypt(value.as_str())?
        };
        writeln!(out, "{}", envelope)?;
    }

    Ok(())
}

fn cmd_decrypt(cipher: &EnvelopeCipher, envelopes: Vec<String>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for envelope in read_inputs(envelopes)? {
        let plaintext = cipher.decrypt(envelope.trim())?;
        writeln!(out, "{}", plaintext)?;
    }

    Ok(())
}
