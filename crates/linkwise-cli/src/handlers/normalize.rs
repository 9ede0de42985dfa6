//! Normalize command handler

use crate::cli::NormalizeArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use linkwise_core::{normalize, Layer, MemoryLayer, NormalizerLayer, Payload, Stack};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Handle the normalize command
///
/// Without `--key` the document is normalized directly. With a key it is
/// served from memory through a normalizer-only pipeline, which also adds
/// the `self` link for that key.
pub fn handle_normalize(
    args: NormalizeArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let raw = read_document(args.file.as_deref())?;
    if !raw.is_object() && !raw.is_sequence() {
        output.warning("Document is a bare scalar; it is printed unchanged")?;
    }
    let client = config.client_config(args.api_host.as_deref(), false);
    let api_host = client.api_host()?;

    let canonical = match args.key {
        Some(key) => {
            let memory = MemoryLayer::new(api_host).with_resource(key.as_str(), raw);
            let pipeline = Stack::builder()
                .layer("normalizer", |next, _config| {
                    Ok(Box::new(NormalizerLayer::new(next)) as Box<dyn Layer>)
                })
                .build()
                .build(Box::new(memory), &client)?;
            pipeline.lookup(key)?.into_payload()
        }
        None => normalize(raw, &api_host),
    };

    output.payload(&canonical)
}

/// Read a raw document from a file, or stdin when the path is absent or `-`
fn read_document(file: Option<&Path>) -> Result<Payload> {
    match file {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            let content = std::fs::read_to_string(path)?;
            parse_document(&content, Some(path))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            parse_document(&content, None)
        }
    }
}

/// Parse JSON, or YAML for files with a YAML extension
fn parse_document(content: &str, path: Option<&Path>) -> Result<Payload> {
    let is_yaml = path
        .and_then(Path::extension)
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);
    let origin = || path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("<stdin>"));

    let value: serde_json::Value = if is_yaml {
        serde_yaml::from_str(content).map_err(|_| Error::InvalidFormat {
            path: origin(),
            expected: "YAML".to_string(),
        })?
    } else {
        serde_json::from_str(content).map_err(|_| Error::InvalidFormat {
            path: origin(),
            expected: "JSON".to_string(),
        })?
    };

    Ok(Payload::from(value))
}
