#![forbid(unsafe_code)]

//! Sigtuna CLI — AS4 envelope construction and WS-Security signing.

use clap::{Parser, Subcommand};
use sigtuna_core::Error;
use sigtuna_ebms::EbmsConfig;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "sigtuna",
    about = "Sigtuna — AS4 e-invoicing envelopes with WS-Security signatures",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an unsigned AS4 envelope
    Envelope {
        /// Messaging configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Document id (cid: URI); generated from the configured
        /// domain when omitted
        #[arg(long = "doc-id")]
        doc_id: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Sign an envelope's Security header
    Sign {
        /// Envelope XML file with an empty wsse:Security header
        envelope: PathBuf,

        /// Payload file to digest for the attachment reference
        #[arg(short, long)]
        document: Option<PathBuf>,

        /// Precomputed base64 SHA-256 of the payload, instead of
        /// --document
        #[arg(long = "doc-digest")]
        doc_digest: Option<String>,

        /// Document id; read from PartInfo/@href when omitted
        #[arg(long = "doc-id")]
        doc_id: Option<String>,

        /// Private key (PEM or DER)
        #[arg(short, long)]
        key: PathBuf,

        /// X.509 certificate (PEM or DER)
        #[arg(long)]
        cert: PathBuf,

        /// Password for an encrypted private key
        #[arg(short, long)]
        password: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the signing profile
    Info,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Envelope {
            config,
            doc_id,
            output,
            verbose,
        } => cmd_envelope(config, doc_id, output, verbose),

        Commands::Sign {
            envelope,
            document,
            doc_digest,
            doc_id,
            key,
            cert,
            password,
            output,
            verbose,
        } => cmd_sign(
            envelope, document, doc_digest, doc_id, key, cert, password, output, verbose,
        ),

        Commands::Info => cmd_info(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn cmd_envelope(
    config_path: PathBuf,
    doc_id: Option<String>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Error> {
    let config = EbmsConfig::from_file(&config_path)?;
    let doc_id = doc_id.unwrap_or_else(|| sigtuna_ebms::ids::document_id(&config.domain));
    let envelope = sigtuna_ebms::build_envelope(&config, &doc_id);

    if verbose {
        eprintln!("Message id:       {}", envelope.message_id());
        eprintln!("Conversation id:  {}", envelope.conversation_id());
        eprintln!("Document id:      {doc_id}");
        eprintln!("Body wsu:Id:      {}", envelope.body_id());
        eprintln!("Messaging wsu:Id: {}", envelope.messaging_id());
    }

    write_output(output, envelope.text().as_bytes())
}

#[allow(clippy::too_many_arguments)]
fn cmd_sign(
    envelope_path: PathBuf,
    document: Option<PathBuf>,
    doc_digest: Option<String>,
    doc_id: Option<String>,
    key: PathBuf,
    cert: PathBuf,
    password: Option<String>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Error> {
    let envelope_xml = read_file(&envelope_path)?;

    let digest = match (document, doc_digest) {
        (Some(path), None) => {
            let bytes = std::fs::read(&path)
                .map_err(|e| Error::Other(format!("{}: {e}", path.display())))?;
            sigtuna_wsse::hash::attachment_digest(&bytes)?
        }
        (None, Some(digest)) => digest,
        (Some(_), Some(_)) => {
            return Err(Error::Other(
                "--document and --doc-digest are mutually exclusive".into(),
            ))
        }
        (None, None) => {
            return Err(Error::Other(
                "either --document or --doc-digest is required".into(),
            ))
        }
    };

    let doc_id = match doc_id {
        Some(id) => id,
        None => sigtuna_ebms::part_info_href(&envelope_xml)?,
    };

    if verbose {
        eprintln!("Signing:     {}", envelope_path.display());
        eprintln!("Document id: {doc_id}");
        eprintln!("Digest:      {digest}");
    }

    let signed = sigtuna_wsse::sign_envelope_with_files(
        &envelope_xml,
        &doc_id,
        &digest,
        &key,
        &cert,
        password.as_deref(),
    )?;
    write_output(output, signed.as_bytes())
}

fn cmd_info() -> Result<(), Error> {
    println!("Sigtuna — AS4 envelopes with WS-Security signatures");
    println!();
    println!("Signing profile:");
    println!("  Digest:           SHA-256");
    println!("  Signature:        RSA PKCS#1 v1.5 with SHA-256");
    println!("  Canonicalization: Exclusive C14N 1.0");
    println!("  Attachments:      SwA Attachment-Content-Signature-Transform");
    println!();
    println!("Signature references, in order:");
    println!("  env:Body (wsu:Id), eb:Messaging (wsu:Id), external document (cid:)");
    println!();
    println!("Supported key formats:");
    println!("  PKCS#8 PEM/DER, PKCS#1 PEM/DER, encrypted PKCS#8 PEM");
    println!();
    println!("Supported certificate formats:");
    println!("  X.509 v3 PEM or DER");
    Ok(())
}

// ── Utility functions ────────────────────────────────────────────────

fn read_file(path: &PathBuf) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|e| Error::Other(format!("{}: {e}", path.display())))
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<(), Error> {
    match path {
        Some(p) => {
            std::fs::write(&p, data).map_err(|e| Error::Other(format!("{}: {e}", p.display())))
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(data)
                .map_err(|e| Error::Other(format!("stdout: {e}")))
        }
    }
}
