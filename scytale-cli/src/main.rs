//! Scytale CLI
//!
//! Encrypt, decrypt, derive keys for and crack classical ciphers.

mod config;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use scytale_cipher::selftest::{self, DEFAULT_SEED, DEFAULT_TRIALS};
use scytale_cipher::{
    keygen, Affine, BruteForcer, Caesar, CipherType, Codec, Dictionary, FrequencyAnalysis,
    KeySpace, PatternIndex, Route, Substitution, SubstitutionCracker, Transposition, Vigenere,
};

#[derive(Parser)]
#[command(name = "scytale")]
#[command(about = "Scytale - classical ciphers and their cryptanalysis")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: <config dir>/scytale/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Word list, one word per line (default: bundled English list)
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Brute force worker threads
    #[arg(long, global = true)]
    workers: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt with a classic cipher
    Encrypt {
        /// Cipher: caesar, affine, transposition, substitution, vigenere, route
        #[arg(short, long)]
        cipher: String,

        /// Key; generated when omitted (except vigenere)
        #[arg(short, long, allow_hyphen_values = true)]
        key: Option<String>,

        /// Text to encrypt (default: stdin)
        text: Option<String>,
    },

    /// Decrypt with a classic cipher
    Decrypt {
        /// Cipher: caesar, affine, transposition, substitution, vigenere, route
        #[arg(short, long)]
        cipher: String,

        /// Key: shift, "a,b", column count, 26 letters, keyword or route ("-1 2 -3 4")
        #[arg(short, long, allow_hyphen_values = true)]
        key: String,

        /// Text to decrypt (default: stdin)
        text: Option<String>,
    },

    /// Recover the key from a plaintext and its ciphertext
    DeriveKey {
        /// Cipher: caesar, affine, transposition
        #[arg(short, long)]
        cipher: String,

        /// Known plaintext
        plaintext: String,

        /// Matching ciphertext
        ciphertext: String,
    },

    /// Recover plaintext without the key
    Crack {
        /// Cipher: caesar, affine, transposition, substitution
        #[arg(short, long)]
        cipher: String,

        /// Number of candidates to show
        #[arg(long)]
        top: Option<usize>,

        /// Character shown for unresolved substitution letters
        #[arg(long)]
        mark: Option<char>,

        /// Ciphertext (default: stdin)
        text: Option<String>,
    },

    /// Frequency analysis
    Analyze {
        /// Show ASCII chart
        #[arg(long)]
        chart: bool,

        /// Text to analyze (default: stdin)
        text: Option<String>,
    },

    /// Round-trip every cipher on random samples
    Selftest {
        #[arg(long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,

        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

struct App {
    config: Config,
    json: bool,
}

impl App {
    fn dictionary(&self) -> Result<Dictionary> {
        match &self.config.dictionary {
            Some(path) => {
                let dictionary = Dictionary::load(path)
                    .with_context(|| format!("Failed to load dictionary {}", path.display()))?;
                info!("Loaded {} words from {}", dictionary.len(), path.display());
                Ok(dictionary)
            }
            None => Ok(Dictionary::builtin()),
        }
    }

    fn print_json(&self, value: &impl Serialize) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env(|name| std::env::var(name).ok())?;
    if let Some(path) = cli.dictionary {
        config.dictionary = Some(path);
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    debug!("Configuration: {:?}", config);

    let app = App { config, json: cli.json };

    match cli.command {
        Commands::Encrypt { cipher, key, text } => cmd_encrypt(&app, cipher.parse()?, key, read_text(text)?),
        Commands::Decrypt { cipher, key, text } => cmd_decrypt(&app, cipher.parse()?, &key, read_text(text)?),
        Commands::DeriveKey { cipher, plaintext, ciphertext } => {
            cmd_derive_key(&app, cipher.parse()?, &plaintext, &ciphertext)
        }
        Commands::Crack { cipher, top, mark, text } => cmd_crack(&app, cipher.parse()?, top, mark, read_text(text)?),
        Commands::Analyze { chart, text } => cmd_analyze(&app, chart, read_text(text)?),
        Commands::Selftest { trials, seed } => cmd_selftest(&app, trials, seed),
    }
}

/// `RUST_LOG` wins unless `-v` is given
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "scytale=warn",
        1 => "scytale=info",
        _ => "scytale=debug",
    };
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        _ => EnvFilter::new(level),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// The argument, or all of stdin minus the trailing newline
fn read_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input.trim_end_matches(&['\n', '\r'][..]).to_string())
        }
    }
}

/// (key, output, generated)
fn encrypt_with<C>(
    codec: &C,
    text: &str,
    key: Option<String>,
    generate: impl FnOnce() -> scytale_cipher::Result<C::Key>,
) -> Result<(String, String, bool)>
where
    C: Codec,
    C::Key: FromStr<Err = scytale_cipher::Error>,
{
    let (key, generated) = match key {
        Some(key) => (key.parse::<C::Key>()?, false),
        None => (generate()?, true),
    };
    let output = codec.encode(text, &key)?;
    Ok((key.to_string(), output, generated))
}

fn decrypt_with<C>(codec: &C, text: &str, key: &str) -> Result<String>
where
    C: Codec,
    C::Key: FromStr<Err = scytale_cipher::Error>,
{
    Ok(codec.decode(text, &key.parse::<C::Key>()?)?)
}

fn cmd_encrypt(app: &App, cipher: CipherType, key: Option<String>, text: String) -> Result<()> {
    let mut rng = rand::rng();
    let len = text.chars().count();

    let (key, output, generated) = match cipher {
        CipherType::Caesar => encrypt_with(&Caesar, &text, key, || keygen::caesar(&mut rng))?,
        CipherType::Affine => encrypt_with(&Affine, &text, key, || keygen::affine(&mut rng))?,
        CipherType::Transposition => {
            encrypt_with(&Transposition, &text, key, || keygen::transposition(&mut rng, len))?
        }
        CipherType::Substitution => {
            encrypt_with(&Substitution, &text, key, || keygen::substitution(&mut rng))?
        }
        CipherType::Vigenere => encrypt_with(&Vigenere, &text, key, || {
            Err(scytale_cipher::Error::InvalidKey("Vigenère needs a keyword; pass --key".into()))
        })?,
        CipherType::Route => {
            let words = text.split_whitespace().count();
            encrypt_with(&Route, &text, key, || keygen::route(&mut rng, words))?
        }
    };

    if app.json {
        return app.print_json(&json!({ "cipher": cipher, "key": key, "output": output }));
    }

    println!("\n  ENCRYPT ({})", cipher.name().to_uppercase());
    if generated {
        println!("  The encryption key is: {}", key);
    } else {
        println!("  Key:    {}", key);
    }
    println!("  Input:  {}", text);
    println!("  Output: {}", output);
    Ok(())
}

fn cmd_decrypt(app: &App, cipher: CipherType, key: &str, text: String) -> Result<()> {
    let output = match cipher {
        CipherType::Caesar => decrypt_with(&Caesar, &text, key)?,
        CipherType::Affine => decrypt_with(&Affine, &text, key)?,
        CipherType::Transposition => decrypt_with(&Transposition, &text, key)?,
        CipherType::Substitution => decrypt_with(&Substitution, &text, key)?,
        CipherType::Vigenere => decrypt_with(&Vigenere, &text, key)?,
        CipherType::Route => decrypt_with(&Route, &text, key)?,
    };

    if app.json {
        return app.print_json(&json!({ "cipher": cipher, "key": key, "output": output }));
    }

    println!("\n  DECRYPT ({})", cipher.name().to_uppercase());
    println!("  Key:    {}", key);
    println!("  Input:  {}", text);
    println!("  Output: {}", output);
    Ok(())
}

fn cmd_derive_key(app: &App, cipher: CipherType, plaintext: &str, ciphertext: &str) -> Result<()> {
    let key = match cipher {
        CipherType::Caesar => Caesar.derive_key(plaintext, ciphertext)?.to_string(),
        CipherType::Affine => Affine.derive_key(plaintext, ciphertext)?.to_string(),
        CipherType::Transposition => Transposition.derive_key(plaintext, ciphertext)?.to_string(),
        other => bail!(
            "Cannot derive a {} key; use caesar, affine or transposition",
            other.name()
        ),
    };

    if app.json {
        return app.print_json(&json!({ "cipher": cipher, "key": key }));
    }

    println!("\n  The key used to encrypt this message was {}", key);
    Ok(())
}

/// Selectors of the ciphers `crack` can attack
fn crackable() -> Vec<String> {
    CipherType::ALL
        .iter()
        .filter(|c| c.attack().is_some())
        .map(|c| c.to_string())
        .collect()
}

fn cmd_crack(app: &App, cipher: CipherType, top: Option<usize>, mark: Option<char>, text: String) -> Result<()> {
    let Some(strategy) = cipher.attack() else {
        bail!(
            "{} has no automated attack; crack supports {} ('scytale analyze' gives key length hints)",
            cipher.name(),
            crackable().join(", ")
        );
    };
    info!("Cracking {} by {}", cipher.name(), strategy);

    let dictionary = app.dictionary()?;
    let top = top.unwrap_or(app.config.top).max(1);

    match cipher {
        CipherType::Caesar => brute_force(app, &Caesar, &dictionary, &text, top),
        CipherType::Affine => brute_force(app, &Affine, &dictionary, &text, top),
        CipherType::Transposition => brute_force(app, &Transposition, &dictionary, &text, top),
        CipherType::Substitution => {
            let index = PatternIndex::build(&dictionary);
            debug!("Pattern index: {} patterns over {} words", index.len(), dictionary.len());

            let outcome = SubstitutionCracker::new(&index)?
                .with_search_limit(app.config.search_limit)
                .with_marker(mark.or(app.config.mark_unresolved))
                .crack(&text)?;

            if app.json {
                return app.print_json(&outcome);
            }
            print!("{}", report::substitution(&outcome, top));
            Ok(())
        }
        other => bail!("No {} attack is wired up for {}", strategy, other.name()),
    }
}

fn brute_force<C>(app: &App, codec: &C, dictionary: &Dictionary, text: &str, top: usize) -> Result<()>
where
    C: KeySpace,
    C::Key: Serialize,
{
    let forcer = BruteForcer::new(dictionary)?.with_workers(app.config.workers)?;
    let ranked = forcer.top(codec, text, top)?;

    if app.json {
        return app.print_json(&ranked);
    }

    let english = ranked
        .first()
        .map(|best| forcer.scorer().is_english(&best.plaintext, app.config.english_threshold))
        .unwrap_or(false);
    print!("{}", report::brute_force(C::CIPHER, &ranked, english));
    Ok(())
}

fn cmd_analyze(app: &App, chart: bool, text: String) -> Result<()> {
    let analysis = FrequencyAnalysis::analyze(&text);

    if app.json {
        return app.print_json(&analysis);
    }
    if chart {
        println!("{}", analysis.render_ascii());
    } else {
        print!("{}", report::analysis(&analysis));
    }
    Ok(())
}

fn cmd_selftest(app: &App, trials: usize, seed: u64) -> Result<()> {
    let report = selftest::run(trials, seed)?;

    if app.json {
        app.print_json(&report)?;
    } else {
        print!("{}", report::selftest(&report));
    }

    if !report.ok() {
        bail!("Self-test failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crackable_ciphers() {
        assert_eq!(crackable(), vec!["caesar", "affine", "transposition", "substitution"]);
    }

    #[test]
    fn test_route_key_with_leading_minus() {
        let cli = Cli::try_parse_from([
            "scytale", "decrypt", "-c", "route", "-k", "-1 2 -3 4",
            "16 12 8 4 0 1 5 9 13 17 18 14 10 6 2 3 7 11 15 19",
        ])
        .unwrap();
        match cli.command {
            Commands::Decrypt { cipher, key, text } => {
                assert_eq!(cipher.parse::<CipherType>().unwrap(), CipherType::Route);
                let plain = decrypt_with(&Route, &text.unwrap(), &key).unwrap();
                assert_eq!(plain, "0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19");
            }
            _ => panic!("expected decrypt"),
        }
    }

    #[test]
    fn test_vigenere_crack_is_refused() {
        let app = App { config: Config::default(), json: false };
        let err = cmd_crack(&app, CipherType::Vigenere, None, None, "Lxfopv ef rnhr".into()).unwrap_err();
        assert!(err.to_string().contains("caesar, affine, transposition, substitution"));
    }
}
