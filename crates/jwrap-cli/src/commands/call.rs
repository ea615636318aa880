//! `jwrap call` command.
//!
//! Builds a request the way a browser would send it and prints the
//! rendered response body, which makes it easy to check both modes.

use clap::Args;

use jwrap_config::JwrapConfig;
use jwrap_protocol::{ParameterBag, RawRequest, CALLBACK_KEY, METHOD_KEY};

use crate::shared;

/// Run a single request through the dispatch core.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Method selector.
    pub method: String,
    /// Arguments as `name=value` pairs.
    pub params: Vec<String>,
    /// Send as a JSONP request wrapped in this callback.
    #[arg(long)]
    pub callback: Option<String>,
}

/// Executes the call command.
pub fn execute(args: &CallArgs, config: &JwrapConfig) -> anyhow::Result<()> {
    let raw = build_request(args)?;
    let out = shared::run_once(config, raw)?;
    println!("{}", out.body);
    Ok(())
}

/// Callback requests carry everything in the URL; direct ones put arguments in the body.
fn build_request(args: &CallArgs) -> anyhow::Result<RawRequest> {
    let params = shared::parse_pairs(&args.params)?;
    Ok(match &args.callback {
        Some(cb) => {
            let mut query = params;
            query.insert(METHOD_KEY, args.method.as_str());
            query.insert(CALLBACK_KEY, cb.as_str());
            RawRequest {
                query,
                body: ParameterBag::new(),
            }
        }
        None => {
            let mut query = ParameterBag::new();
            query.insert(METHOD_KEY, args.method.as_str());
            RawRequest {
                query,
                body: params,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(callback: Option<&str>) -> CallArgs {
        CallArgs {
            method: "greet".into(),
            params: vec!["name=Ada".into()],
            callback: callback.map(String::from),
        }
    }

    #[test]
    fn direct_call_puts_arguments_in_body() {
        let raw = build_request(&args(None)).expect("build");
        assert_eq!(raw.query.get_str("method"), Some("greet"));
        assert!(raw.query.get("name").is_none());
        assert_eq!(raw.body.get_str("name"), Some("Ada"));
    }

    #[test]
    fn callback_call_puts_everything_in_url() {
        let raw = build_request(&args(Some("cb"))).expect("build");
        assert_eq!(raw.query.get_str("name"), Some("Ada"));
        assert_eq!(raw.query.get_str("callback"), Some("cb"));
        assert!(raw.body.is_empty());
    }

    #[test]
    fn callback_call_renders_script() {
        let raw = build_request(&args(Some("cb"))).expect("build");
        let out = shared::run_once(&JwrapConfig::default(), raw).expect("run");
        assert_eq!(
            out.body,
            "/**/\ntypeof cb==='function' && cb({\"success\":true,\"response\":\"Hello, Ada\"});"
        );
    }
}
