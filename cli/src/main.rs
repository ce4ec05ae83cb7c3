use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use sonar::{Engine, EngineConfig, Request};

#[derive(Parser)]
#[command(name = "sonar")]
#[command(about = "Answer grid queries read as JSON, one response per request")]
struct Args {
    /// Read requests from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Worker threads per query (defaults to available parallelism)
    #[arg(long)]
    workers: Option<usize>,
}

/// The reply line for one decoded JSON item.
///
/// Items that are not a valid request and queries that fail both become `{"error": ...}` replies, so the session goes on.
fn answer(engine: &Engine, item: Value) -> Result<Value> {
    let request = match serde_json::from_value::<Request>(item) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("rejected request: {}", e);
            return Ok(json!({ "error": format!("invalid request: {e}") }));
        }
    };

    match engine.handle(&request) {
        Ok(response) => Ok(serde_json::to_value(response)?),
        Err(e) => {
            log::warn!("{} failed: {}", request.operation(), e);
            Ok(json!({ "error": e.to_string() }))
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.workers.map(EngineConfig::with_workers).unwrap_or_default();
    log::info!("starting with {} workers per query", config.workers);

    let engine = Engine::new(config);
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let mut handled = 0usize;
    for item in serde_json::Deserializer::from_reader(reader).into_iter::<Value>() {
        // broken JSON leaves the stream at an unknown position, so it ends the session
        let item = item.context("could not read request")?;

        let reply = answer(&engine, item)?;
        writeln!(out, "{}", reply)?;
        out.flush()?;
        handled += 1;
    }

    log::info!("end of input after {} requests", handled);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sonar::{Engine, EngineConfig};

    use super::answer;

    #[test]
    fn bad_requests_do_not_end_the_session() {
        let engine = Engine::new(EngineConfig::with_workers(2));

        let ragged = answer(&engine, json!({ "operation": "components", "grid": [[1, 1], [1]] })).unwrap();
        assert!(ragged["error"].as_str().unwrap().contains("not rectangular"));

        let unknown = answer(&engine, json!({ "operation": "stop", "grid": [[1]] })).unwrap();
        assert!(unknown["error"].as_str().unwrap().starts_with("invalid request"));

        let counted = answer(&engine, json!({ "operation": "count-shapes", "grid": [[1, 1], [1, 1]] })).unwrap();
        assert_eq!(counted, json!({ "count": 1 }));
    }
}
