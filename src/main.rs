//! LSB Vault - hide data in PNG images.
//!
//! Embeds text or files in the least-significant bits of an image, with an
//! integrity hash and optional password encryption.

use clap::{Parser, Subcommand, ValueEnum};
use lsb_vault::image_io::{load_png, save_png};
use lsb_vault::{
    CodecConfig, CompressionMode, Error, Payload, PayloadKind, Result, Steganography,
};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lsb-vault")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide text or files inside PNG images",
    long_about = "Embeds a hashed, compressed and optionally encrypted payload in the least-significant bits of an image."
)]
struct Cli {
    /// Codec configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compression applied to the hidden blob (overrides the config file)
    #[arg(long, global = true, value_enum)]
    compression: Option<CompressionArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CompressionArg {
    Gzip,
    Stored,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Text,
    File,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message or file in an image
    Encode {
        /// Cover image
        image: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Text message to hide
        #[arg(long, conflicts_with = "file")]
        message: Option<String>,

        /// File to hide (its name travels with it)
        #[arg(long, conflicts_with = "message")]
        file: Option<PathBuf>,

        /// Encrypt with a password (prompted)
        #[arg(long)]
        encrypt: bool,
    },

    /// Recover hidden data from an image
    Decode {
        /// Encoded image
        image: PathBuf,

        /// Interpret the payload as text or as a named file
        #[arg(long, value_enum, default_value = "text")]
        mode: ModeArg,

        /// Output path (default: stdout for text, original name for files)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Payload was encrypted (prompts for the password)
        #[arg(long)]
        encrypted: bool,
    },

    /// Show how much data an image can hold
    Capacity {
        /// Image to analyse
        image: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the container header stored in an image
    Inspect {
        /// Image to inspect
        image: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        if e.is_undecodable() {
            eprintln!("Error: could not decode; check password or image");
            log::debug!("underlying error: {}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let engine = Steganography::new(load_config(cli.config.as_deref(), cli.compression)?);

    match cli.command {
        Commands::Encode {
            image,
            output,
            message,
            file,
            encrypt,
        } => cmd_encode(&engine, &image, &output, message, file, encrypt),

        Commands::Decode {
            image,
            mode,
            output,
            encrypted,
        } => cmd_decode(&engine, &image, mode, output, encrypted),

        Commands::Capacity { image, json } => cmd_capacity(&engine, &image, json),

        Commands::Inspect { image } => cmd_inspect(&engine, &image),
    }
}

fn load_config(path: Option<&Path>, compression: Option<CompressionArg>) -> Result<CodecConfig> {
    let mut config = match path {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };
    if let Some(compression) = compression {
        config.compression = match compression {
            CompressionArg::Gzip => CompressionMode::Gzip,
            CompressionArg::Stored => CompressionMode::Stored,
        };
    }
    config.validate()?;
    Ok(config)
}

fn prompt_password(prompt: &str) -> Result<String> {
    match rpassword::prompt_password(prompt) {
        Ok(password) => Ok(password),
        Err(_) => {
            eprint!("{}", prompt);
            io::stderr().flush()?;
            let mut password = String::new();
            io::stdin().read_line(&mut password)?;
            Ok(password.trim().to_string())
        }
    }
}

fn cmd_encode(
    engine: &Steganography,
    image: &Path,
    output: &Path,
    message: Option<String>,
    file: Option<PathBuf>,
    encrypt: bool,
) -> Result<()> {
    let carrier = load_png(image)?;

    let payload = match (message, file) {
        (Some(text), None) => Payload::Text(text),
        (None, Some(path)) => Payload::from_file(&path)?,
        (None, None) => {
            // Read from stdin
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Payload::Text(buffer)
        }
        (Some(_), Some(_)) => unreachable!(),
    };
    let bytes = payload.to_bytes()?;

    let report = engine.capacity(&carrier);
    if bytes.len() > report.available_space {
        return Err(Error::CapacityExceeded {
            needed: bytes.len(),
            available: report.available_space,
        });
    }

    let password = if encrypt {
        let password = prompt_password("Enter password: ")?;
        let confirm = prompt_password("Confirm password: ")?;
        if password != confirm {
            eprintln!("Passwords do not match");
            std::process::exit(1);
        }
        Some(password)
    } else {
        None
    };

    let encoded = engine.encode(&carrier, &bytes, password.as_deref())?;
    save_png(&encoded, output)?;

    println!(
        "Hid {} bytes in {} ({} bytes available)",
        bytes.len(),
        output.display(),
        report.available_space
    );

    Ok(())
}

fn cmd_decode(
    engine: &Steganography,
    image: &Path,
    mode: ModeArg,
    output: Option<PathBuf>,
    encrypted: bool,
) -> Result<()> {
    let carrier = load_png(image)?;

    let password = if encrypted {
        Some(prompt_password("Password: ")?)
    } else {
        None
    };

    let bytes = engine.decode(&carrier, password.as_deref())?;

    let kind = match mode {
        ModeArg::Text => PayloadKind::Text,
        ModeArg::File => PayloadKind::File,
    };

    match Payload::from_bytes(&bytes, kind)? {
        Payload::Text(text) => match output {
            Some(path) => {
                std::fs::write(&path, text.as_bytes())?;
                println!("Wrote {} bytes to {}", text.len(), path.display());
            }
            None => println!("{}", text),
        },
        Payload::File { name, data } => {
            // Never trust a path from inside the image.
            let path = output.unwrap_or_else(|| {
                Path::new(&name)
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("decoded.bin"))
            });
            std::fs::write(&path, &data)?;
            println!("Wrote {} bytes to {} (original name: {})", data.len(), path.display(), name);
        }
    }

    Ok(())
}

fn cmd_capacity(engine: &Steganography, image: &Path, json: bool) -> Result<()> {
    let carrier = load_png(image)?;
    let report = engine.capacity(&carrier);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Image Capacity");
    println!("==============");
    println!("Dimensions:       {}x{}", report.width, report.height);
    println!("Pixels:           {}", report.total_pixels);
    println!("Total capacity:   {} bytes", report.maximum_capacity);
    println!("Available:        {} bytes", report.available_space);
    if !report.can_hold_header() {
        println!();
        println!("Image is too small to hold any data");
    }

    Ok(())
}

fn cmd_inspect(engine: &Steganography, image: &Path) -> Result<()> {
    let carrier = load_png(image)?;
    let info = engine.inspect(&carrier)?;

    println!("Container Header");
    println!("================");
    println!("Blob length:      {} bytes", info.length);
    println!("SHA-256:          {}", hex::encode(info.hash));
    if info.intact {
        println!("✓ Blob matches header");
    } else {
        println!("✗ No valid container (image not encoded, or damaged)");
    }

    Ok(())
}
