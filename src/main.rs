//! Interactive WebSocket probe
//!
//! Run with: cargo run --bin ws-probe
//!
//! Log lines go to stdout, tracing output to stderr.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::sync::mpsc;
    use tracing::info;
    use tracing_subscriber::{fmt, EnvFilter};
    use ws_probe::config::ProbeConfig;
    use ws_probe::probe::Probe;
    use ws_probe::repl::{decode_line, parse_line, ReplCommand, HELP};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ws_probe=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = ProbeConfig::from_env()?;
    info!(ws_url = %config.ws_url, api = %config.api_base, "Configuration resolved");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let mut probe = Probe::new(&config, event_tx, outcome_tx)?;

    let print = |lines: Vec<String>| {
        for line in lines {
            println!("{line}");
        }
    };

    println!("{HELP}");
    if config.autoconnect {
        print(probe.execute(ReplCommand::Connect(None)));
    }

    // Raw segments so a line with invalid UTF-8 is reported, not fatal
    let mut stdin = BufReader::new(tokio::io::stdin()).split(b'\n');
    loop {
        tokio::select! {
            segment = stdin.next_segment() => {
                let Some(bytes) = segment? else {
                    info!("stdin closed");
                    break;
                };
                match parse_line(&decode_line(&bytes)) {
                    Ok(ReplCommand::Quit) => break,
                    Ok(cmd) => print(probe.execute(cmd)),
                    Err(e) => println!("{e}"),
                }
            }
            Some((id, event)) = event_rx.recv() => print(probe.on_event(id, event)),
            Some(outcome) = outcome_rx.recv() => print(probe.on_outcome(outcome)),
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
