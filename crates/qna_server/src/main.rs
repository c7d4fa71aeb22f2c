//! Server bootstrap.
//!
//! Configuration comes from the environment:
//! - `QNA_ADDR` — listen address, default `127.0.0.1:8080`
//! - `QNA_DB_PATH` — SQLite file path, default `qna.db`
//! - `QNA_LOG_LEVEL` — log level, defaults per build mode
//! - `QNA_LOG_DIR` — when set, log to rotated files there instead of stderr

use log::{error, info};
use qna_core::db::open_db;
use qna_core::LogSink;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "qna.db";

#[tokio::main]
async fn main() -> ExitCode {
    let level = std::env::var("QNA_LOG_LEVEL")
        .unwrap_or_else(|_| qna_core::default_log_level().to_string());
    let sink = match std::env::var("QNA_LOG_DIR") {
        Ok(dir) => LogSink::File(PathBuf::from(dir)),
        Err(_) => LogSink::Stderr,
    };
    if let Err(message) = qna_core::init_logging(&level, sink) {
        eprintln!("logging setup failed: {message}");
        return ExitCode::FAILURE;
    }

    let addr_text = std::env::var("QNA_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = match addr_text.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!(
                "event=server_start module=server status=error error=invalid address `{addr_text}`: {err}"
            );
            return ExitCode::FAILURE;
        }
    };

    let db_path = std::env::var("QNA_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    info!("event=server_start module=server status=ok addr={addr} db={db_path}");

    let db = Arc::new(Mutex::new(conn));
    warp::serve(qna_server::routes::api(db)).run(addr).await;

    ExitCode::SUCCESS
}
