//! wialon-cli: call Wialon Remote API actions from the command line.
//!
//! Usage:
//!   wialon-cli login <user> <password>       Login, print the session id, poll events once
//!   wialon-cli token <token>                 Token login, print the session id, poll events once
//!   wialon-cli call <action> [<json>]        Call any action (object = single call, array = batch)
//!   wialon-cli events                        Poll the event endpoint once

use anyhow::{bail, Context};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use wialon::{Params, Response, Wialon};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "login" => cmd_login(&args[2..]),
        "token" => cmd_token(&args[2..]),
        "call" => cmd_call(&args[2..]),
        "events" => cmd_events(),
        "version" | "--version" | "-V" => {
            println!("wialon-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"wialon-cli — Wialon Remote API client

USAGE:
    wialon-cli <COMMAND> [ARGS]

COMMANDS:
    login <user> <password>     Login, print the session id, poll events once
    token <token>               Token login, print the session id, poll events once
    call <action> [<json>]      Call any action; JSON object = single call, array = batch
    events                      Poll the event endpoint once
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    WIALON_HOST                 Server host (default hst-api.wialon.com)
    WIALON_BASE_URL             Full root URL, overrides WIALON_HOST
    WIALON_SID                  Session id for `call` and `events`
    WIALON_SDK_PRO              Set to 1 to send the session as `ssid`
    RUST_LOG                    Log filter, e.g. wialon=debug"#
    );
}

fn client() -> anyhow::Result<Wialon> {
    let mut builder = Wialon::builder()
        .sdk_pro(std::env::var("WIALON_SDK_PRO").ok().as_deref() == Some("1"));
    if let Ok(host) = std::env::var("WIALON_HOST") {
        builder = builder.host(host);
    }
    if let Ok(base_url) = std::env::var("WIALON_BASE_URL") {
        builder = builder.base_url_override(base_url);
    }
    if let Ok(sid) = std::env::var("WIALON_SID") {
        builder = builder.sid(sid);
    }
    Ok(builder.build()?)
}

fn cmd_login(args: &[String]) -> anyhow::Result<()> {
    let [user, password] = args else {
        bail!("usage: wialon-cli login <user> <password>");
    };
    let wialon = client()?;
    let params = Params::named(serde_json::json!({"user": user, "password": password}))?;
    login_and_poll(&wialon, "core_login", params)
}

fn cmd_token(args: &[String]) -> anyhow::Result<()> {
    let [token] = args else {
        bail!("usage: wialon-cli token <token>");
    };
    let wialon = client()?;
    let params = Params::named(serde_json::json!({"token": token}))?;
    login_and_poll(&wialon, "token_login", params)
}

fn login_and_poll(wialon: &Wialon, action: &str, params: Params) -> anyhow::Result<()> {
    wialon.login(action, params)?;
    let sid = wialon
        .sid()
        .context("login succeeded but returned no session id")?;
    println!("sid: {sid}");
    print_response(&wialon.avl_evts()?)
}

fn cmd_call(args: &[String]) -> anyhow::Result<()> {
    let Some(action) = args.first() else {
        bail!("usage: wialon-cli call <action> [<json>]");
    };
    let params = match args.get(1) {
        Some(raw) => {
            let value: Value = serde_json::from_str(raw).context("params must be valid JSON")?;
            match value {
                Value::Array(items) => Params::batch(items),
                other => Params::named(other)?,
            }
        }
        None => Params::empty(),
    };
    let wialon = client()?;
    print_response(&wialon.call(action, params)?)
}

fn cmd_events() -> anyhow::Result<()> {
    let wialon = client()?;
    print_response(&wialon.avl_evts()?)
}

fn print_response(response: &Response) -> anyhow::Result<()> {
    match response.clone().into_value() {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => {
            if let Response::Undecoded { content_type, body } = response {
                eprintln!(
                    "(undecoded response, content type {})",
                    content_type.as_deref().unwrap_or("<none>")
                );
                println!("{body}");
            }
        }
    }
    Ok(())
}
