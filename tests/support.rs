use std::ffi::OsStr;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    hits: Arc<AtomicU64>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ServerHandle {
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server whose status depends on the arrival index
/// of each request.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(script: fn(u64) -> u16) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let hits = Arc::new(AtomicU64::new(0));
    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let server_hits = Arc::clone(&hits);
    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let hits = Arc::clone(&server_hits);
                    thread::spawn(move || handle_client(stream, &hits, script));
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(2));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}/", addr),
        ServerHandle {
            hits,
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Like [`spawn_http_server`], but skips when the sandbox forbids sockets.
///
/// # Errors
///
/// Returns an error if the server fails for any other reason.
pub fn spawn_http_server_or_skip(
    script: fn(u64) -> u16,
) -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_http_server(script) {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle_client(mut stream: TcpStream, hits: &AtomicU64, script: fn(u64) -> u16) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let mut head: Vec<u8> = Vec::new();
    let mut buffer = [0u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => return,
            Ok(read) => head.extend_from_slice(buffer.get(..read).unwrap_or_default()),
        }
    }

    let status = script(hits.fetch_add(1, Ordering::SeqCst));
    let response = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        status
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `stresser` binary inside `dir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_stresser<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = stresser_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .env_remove("STRESSER_LOG")
        .env_remove("STRESSER_URL")
        .output()
        .map_err(|err| format!("run stresser failed: {}", err))
}

fn stresser_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_stresser").map_or_else(
        || Err("CARGO_BIN_EXE_stresser missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
