//! Get command handler

use crate::cli::GetArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use linkwise_core::context;

/// Handle the get command
///
/// The lookup runs inside a scope holding a pipeline built from the
/// effective configuration, so nothing leaks into the thread afterwards.
pub fn handle_get(args: GetArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    if args.key.trim().is_empty() {
        return Err(Error::invalid_args("KEY must not be empty"));
    }

    let client = config.client_config(args.api_host.as_deref(), args.no_cache);
    tracing::info!(key = %args.key, api_host = %client.api_host, "Looking up resource");

    let response = {
        let _timer = Timer::new("lookup");
        context::with_pipeline(client, |pipeline| {
            tracing::debug!(layers = ?pipeline.layer_names(), "Pipeline ready");
            context::lookup(args.key.as_str())
        })??
    };

    output.response(&response)
}
