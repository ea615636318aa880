//! `jwrap methods` command.

use clap::Args;

use jwrap_config::JwrapConfig;
use jwrap_protocol::{ParameterBag, RawRequest, METHOD_KEY};

use crate::shared;

/// Print the method catalog served to discovery requests.
#[derive(Debug, Args)]
pub struct MethodsArgs {
    /// Pretty-print the catalog.
    #[arg(long)]
    pub pretty: bool,
}

/// Executes the methods command.
pub fn execute(args: &MethodsArgs, config: &JwrapConfig) -> anyhow::Result<()> {
    let alias = config
        .dispatch
        .discovery_aliases
        .first()
        .ok_or_else(|| anyhow::anyhow!("no discovery alias configured"))?;

    let mut query = ParameterBag::new();
    query.insert(METHOD_KEY, alias.as_str());
    let raw = RawRequest {
        query,
        body: ParameterBag::new(),
    };
    let out = shared::run_once(config, raw)?;

    if args.pretty {
        let value: serde_json::Value = serde_json::from_str(&out.body)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", out.body);
    }
    Ok(())
}
