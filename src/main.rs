use anyhow::{Context, Result, bail};
use aspnetpass::{
    Algorithm, DecodedHash, Hasher, HasherConfig, OsSaltGenerator, Verification, Version,
    default_hasher,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use serde::Serialize;
mod auth;

#[derive(Debug, clap::Args)]
struct Pbkdf2Args {
    /// PBKDF2 iteration count (default: 10000)
    #[arg(long, env = "ASPNETPASS_ITERATIONS")]
    iterations: Option<u32>,

    /// Salt length in bytes, at least 16 (default: 16)
    #[arg(long = "salt-len", env = "ASPNETPASS_SALT_LEN")]
    salt_len: Option<usize>,

    /// Derived key length in bytes, at least 32 (default: 32)
    #[arg(long = "key-len", env = "ASPNETPASS_KEY_LEN")]
    key_len: Option<usize>,

    /// HMAC PRF: sha1, sha256 or sha512 (default: sha256)
    #[arg(long, env = "ASPNETPASS_ALGORITHM")]
    algorithm: Option<Algorithm>,
}

impl Pbkdf2Args {
    fn is_set(&self) -> bool {
        self.iterations.is_some()
            || self.salt_len.is_some()
            || self.key_len.is_some()
            || self.algorithm.is_some()
    }

    fn to_config(&self) -> Result<HasherConfig> {
        let default = HasherConfig::default();

        HasherConfig::new(
            self.iterations.unwrap_or(default.iterations()),
            self.salt_len.unwrap_or(default.salt_len()),
            self.key_len.unwrap_or(default.key_len()),
            self.algorithm.unwrap_or(default.algorithm()),
        )
        .context("invalid hasher parameters")
    }
}

#[derive(Debug, Parser)]
#[command(name = "aspnetpass")]
#[command(version, about = "Hash and verify ASP.NET Identity password hashes.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password
    Hash {
        /// Produce a legacy V2 hash (PBKDF2-HMAC-SHA1, 1000 iterations)
        #[arg(long, default_value_t = false)]
        v2: bool,

        #[command(flatten)]
        pbkdf2: Pbkdf2Args,
    },

    /// Checks a password against a stored hash
    #[command(arg_required_else_help = true)]
    Verify { hash: String },

    /// Shows the parameters stored in a hash
    #[command(arg_required_else_help = true)]
    Inspect {
        hash: String,

        /// Print as JSON
        #[arg(short, long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct HashInfo {
    version: Version,
    algorithm: Algorithm,
    iterations: u32,
    salt: String,
    key: String,
}

impl From<&DecodedHash> for HashInfo {
    fn from(decoded: &DecodedHash) -> Self {
        Self {
            version: decoded.version(),
            algorithm: decoded.algorithm(),
            iterations: decoded.iterations(),
            salt: STANDARD.encode(decoded.salt()),
            key: STANDARD.encode(decoded.key()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();
    match args.command {
        Commands::Hash { v2, pbkdf2 } => {
            if v2 && pbkdf2.is_set() {
                bail!("--v2 uses fixed parameters and takes no PBKDF2 options");
            }

            let hasher = if v2 {
                Hasher::new_v2(OsSaltGenerator)
            } else {
                Hasher::with_config(pbkdf2.to_config()?, OsSaltGenerator)
            };

            let password = auth::read_new_password_with_confirmation()?;
            let hash = hasher.hash(&password)?;
            println!("{hash}");
        }
        Commands::Verify { hash } => {
            let password = auth::read_password()?;
            let outcome = default_hasher()
                .verify_with_rehash(&password, hash.trim())
                .context("invalid hash")?;

            match outcome {
                Verification::Success => println!("password matches"),
                Verification::SuccessRehashNeeded => {
                    println!("password matches (rehash recommended)")
                }
                Verification::Failed => bail!("password does not match"),
            }
        }
        Commands::Inspect { hash, json } => {
            let decoded: DecodedHash = hash.trim().parse().context("invalid hash")?;
            let info = HashInfo::from(&decoded);

            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("version:    {}", info.version);
                println!("algorithm:  {}", info.algorithm);
                println!("iterations: {}", info.iterations);
                println!("salt:       {}", info.salt);
                println!("key:        {}", info.key);
            }
        }
    }

    Ok(())
}
