use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand, ValueEnum};
use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use runlog_decode::{
    decode_diet_cbor, function_selector, AgreementSchema, RawLog, RunRequest, SchemaDocument,
    ServiceAgreement, ORACLE_REQUEST_TOPIC,
};

#[derive(Parser)]
#[command(name = "runlog")]
#[command(about = "Decode oracle request logs and compute service agreement digests offline")]
struct Args {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Pretty, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode an OracleRequest log, or every OracleRequest log in a list of receipt logs.
    /// Input is JSON: `{"topics": [...], "data": "0x.."}` or an array of those.
    DecodeLog {
        /// JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Parse a request parameter block (`0x` hex, map delimiters optional)
    Params { hex: String },

    /// Print the service agreement fields reflected from an interface document
    Fields {
        /// JSON ABI of the coordinator interface
        #[arg(long, env = "RUNLOG_SCHEMA")]
        schema: PathBuf,
    },

    /// Compute the digest identifying a service agreement
    Digest {
        /// JSON ABI of the coordinator interface
        #[arg(long, env = "RUNLOG_SCHEMA")]
        schema: PathBuf,

        /// Agreement values as a JSON object, or `-` for stdin
        #[arg(default_value = "-")]
        agreement: PathBuf,
    },

    /// Print the 4-byte selector of a function signature
    Selector { signature: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Compact,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LogInput {
    One(RawLog),
    Receipt(Vec<RawLog>),
}

#[derive(Serialize)]
struct DecodedRequest {
    request: RunRequest,
    params: Option<runlog_decode::CborMap>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RUNLOG_LOG")
                .unwrap_or_else(|_| EnvFilter::new("warn,runlog=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let output = match args.command {
        Command::DecodeLog { input } => decode_log(&read_input(&input)?)?,
        Command::Params { hex } => serde_json::to_value(decode_diet_cbor(&hex)?)?,
        Command::Fields { schema } => {
            let schema = load_schema(&schema)?;
            serde_json::to_value(schema.fields())?
        }
        Command::Digest { schema, agreement } => {
            let schema = load_schema(&schema)?;
            let agreement = ServiceAgreement::from_json(&read_input(&agreement)?)
                .wrap_err("invalid agreement JSON")?;
            let digest = schema.digest(&agreement)?;
            info!(target: "runlog::cli", %digest, "computed agreement digest");
            json!({ "digest": digest })
        }
        Command::Selector { signature } => {
            json!({ "selector": function_selector(&signature), "signature": signature })
        }
    };

    let rendered = match args.format {
        Format::Pretty => serde_json::to_string_pretty(&output)?,
        Format::Compact => serde_json::to_string(&output)?,
    };
    println!("{rendered}");

    Ok(())
}

/// Decode one log, or every OracleRequest log of a receipt.
///
/// In receipt mode a log that fails to decode is reported and skipped.
fn decode_log(input: &str) -> Result<serde_json::Value> {
    match serde_json::from_str::<LogInput>(input).wrap_err("invalid log JSON")? {
        LogInput::One(log) => Ok(serde_json::to_value(decode_one(&log)?)?),
        LogInput::Receipt(logs) => {
            let mut decoded = Vec::new();
            for (index, log) in logs.iter().enumerate() {
                if log.topic(0) != Some(ORACLE_REQUEST_TOPIC) {
                    debug!(target: "runlog::cli", index, "skipping non-OracleRequest log");
                    continue;
                }
                match decode_one(log) {
                    Ok(request) => decoded.push(request),
                    Err(e) => warn!(target: "runlog::cli", index, error = %e, "skipping log"),
                }
            }
            if decoded.is_empty() {
                return Err(eyre!("no decodable OracleRequest log among {} logs", logs.len()));
            }
            Ok(serde_json::to_value(decoded)?)
        }
    }
}

fn decode_one(log: &RawLog) -> Result<DecodedRequest> {
    let request = RunRequest::from_log(log)?;
    let params = match request.params() {
        Ok(params) => Some(params),
        Err(e) => {
            warn!(target: "runlog::cli", id = %request.id, error = %e, "unparseable parameters");
            None
        }
    };
    Ok(DecodedRequest { request, params })
}

fn load_schema(path: &Path) -> Result<AgreementSchema> {
    let doc = SchemaDocument::from_json(&read_input(path)?)
        .wrap_err_with(|| format!("invalid interface document {}", path.display()))?;
    Ok(AgreementSchema::from_document(&doc)?)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).wrap_err("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}
