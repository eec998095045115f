//! sitepass — derive a reproducible site password from a master passphrase.
//!
//! The passphrase comes from `-p`, or an echo-free prompt (twice with
//! `-r`), optionally extended with the raw bytes of a key file (`-k`).
//! The site identifier, the memory budget (`-m`, MiB) and the CPU budget
//! (`-o`, megaops) feed the scrypt parameter selector; the 64-byte derived
//! key is encoded into a password of `-l` characters on stdout.
//!
//! Everything else — `Master hex`, the chosen cost parameters, `Site hex`,
//! `Pass hex` under `-v`, and log output (`RUST_LOG`) — goes to stderr.
//! stdout carries exactly the password.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use data_encoding::HEXLOWER;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use sitepass_core::{
    derive, disable_core_dumps, encode_password, sha256_hex, Budget, DerivationRequest,
    DeriveError, SecretBuffer, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN,
};

/// Derive a reproducible site password from a master passphrase.
#[derive(Parser, Debug)]
#[command(name = "sitepass", version, about)]
struct Args {
    /// Site identifier the password is derived for.
    #[arg(value_name = "SITE", required_unless_present = "selftest")]
    site: Option<String>,

    /// Output password length.
    #[arg(short = 'l', long, default_value_t = 16)]
    length: usize,

    /// Memory budget for the key derivation, in MiB.
    #[arg(short = 'm', long = "max-mem", value_name = "MIB", default_value_t = 1000)]
    max_mem: u32,

    /// CPU budget for the key derivation, in millions of operations.
    #[arg(short = 'o', long = "max-ops", value_name = "MEGAOPS", default_value_t = 32)]
    max_ops: u32,

    /// Restrict the password alphabet to digits.
    #[arg(short = 'n', long)]
    numbers_only: bool,

    /// Append the raw bytes of this file to the passphrase.
    #[arg(short = 'k', long, value_name = "FILE")]
    keyfile: Option<PathBuf>,

    /// Take the passphrase from this argument instead of prompting.
    #[arg(short = 'p', long, value_name = "PASS")]
    passphrase: Option<String>,

    /// Prompt for the passphrase twice and require both entries to match.
    #[arg(short = 'r', long)]
    repeat: bool,

    /// Print intermediate digests to stderr.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Run the built-in self-test and exit.
    #[arg(short = 't', long)]
    selftest: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Best effort: secret material should not end up in a core dump.
    if let Err(err) = disable_core_dumps() {
        eprintln!("sitepass: warning: {err}");
    }

    if args.selftest {
        return selftest();
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sitepass: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let length = args.length;
    // Reject a bad length before spending seconds in the KDF.
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&length) {
        return Err(DeriveError::InvalidOutputLength { length }.into());
    }

    let Some(site) = args.site.as_deref() else {
        anyhow::bail!("missing site argument");
    };

    let passphrase = read_passphrase(args)?;
    if args.verbose {
        eprintln!("Master hex: {}", sha256_hex(passphrase.expose()));
    }

    let budget = Budget {
        memory_mib: args.max_mem,
        mega_ops: args.max_ops,
    };
    debug!(
        memory_mib = budget.memory_mib,
        mega_ops = budget.mega_ops,
        length,
        "deriving key"
    );

    let key = derive(&DerivationRequest {
        passphrase: passphrase.expose(),
        site,
        budget,
        verbose: args.verbose,
    })?;

    if args.verbose {
        eprintln!("Pass hex: {}", HEXLOWER.encode(key.expose()));
    }

    let password = Zeroizing::new(encode_password(key.expose(), length, args.numbers_only)?);
    println!("{}", password.as_str());

    Ok(())
}

/// Resolve the passphrase: `-p` argument or interactive prompt, then
/// append the key-file bytes if a key file was given. Staging buffers are
/// zeroized; the combined secret ends up in an mlock'd buffer.
fn read_passphrase(args: &Args) -> anyhow::Result<SecretBuffer> {
    let mut raw: Vec<u8> = match &args.passphrase {
        Some(pass) => pass.as_bytes().to_vec(),
        None => prompt_passphrase(args.repeat)?.into_bytes(),
    };

    if let Some(path) = &args.keyfile {
        let mut key_bytes = fs::read(path)
            .with_context(|| format!("unable to open keyfile {}", path.display()))?;
        raw.extend_from_slice(&key_bytes);
        key_bytes.zeroize();
    }

    let buffer = SecretBuffer::new(&raw)?;
    raw.zeroize();
    Ok(buffer)
}

/// Echo-free passphrase prompt, re-asking on empty input and (with
/// `repeat`) on mismatched confirmation.
fn prompt_passphrase(repeat: bool) -> anyhow::Result<String> {
    loop {
        let mut passphrase = rpassword::prompt_password("Please enter passphrase: ")
            .context("unable to read passphrase")?;
        if passphrase.is_empty() {
            eprintln!("Passphrase cannot be empty. Please try again.");
            continue;
        }
        if !repeat {
            return Ok(passphrase);
        }

        let mut confirmation = rpassword::prompt_password("Please repeat passphrase: ")
            .context("unable to read passphrase")?;
        if passphrase == confirmation {
            confirmation.zeroize();
            return Ok(passphrase);
        }
        eprintln!("Passphrases do not match. Please try again.");
        passphrase.zeroize();
        confirmation.zeroize();
    }
}

/// The SHA-256 known-answer self check (`-t`).
fn selftest() -> ExitCode {
    if sha256_hex(b"abc") == "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad" {
        eprintln!("All internal tests pass");
        ExitCode::SUCCESS
    } else {
        eprintln!("SHA-256 self-test failed");
        ExitCode::FAILURE
    }
}

/// Stable exit codes at the CLI boundary.
///
/// 3, 7, 9, and 10 keep the historical error numbering for KDF failure,
/// out-of-range parameters, and the memory/CPU safety floors; 16 and 17
/// are newly assigned for degenerate budgets and bad output lengths.
/// Untyped failures (I/O, prompting) exit 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<DeriveError>() {
        Some(DeriveError::Kdf(_)) => 3,
        Some(DeriveError::InvalidParameters(_)) => 7,
        Some(DeriveError::MemoryTooHigh) => 9,
        Some(DeriveError::CpuTooHigh) => 10,
        Some(DeriveError::InvalidBudget(_)) => 16,
        Some(DeriveError::InvalidOutputLength { .. }) => 17,
        Some(DeriveError::SecureMemory(_)) | None => 1,
    }
}
