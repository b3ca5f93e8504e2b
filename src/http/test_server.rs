use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

type Script = dyn Fn(u64) -> u16 + Send + Sync;

/// In-process HTTP server answering each request with a scripted status.
///
/// The script receives the zero-based arrival index of the request.
pub(super) struct TestServer {
    url: String,
    hits: Arc<AtomicU64>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TestServer {
    pub(super) fn url(&self) -> &str {
        &self.url
    }

    pub(super) fn hits(&self) -> u64 {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

pub(super) fn spawn_server<F>(script: F) -> Result<TestServer, String>
where
    F: Fn(u64) -> u16 + Send + Sync + 'static,
{
    spawn_server_with_delay(script, Duration::ZERO)
}

pub(super) fn spawn_server_with_delay<F>(script: F, delay: Duration) -> Result<TestServer, String>
where
    F: Fn(u64) -> u16 + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let hits = Arc::new(AtomicU64::new(0));
    let script: Arc<Script> = Arc::new(script);
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
                    let script = Arc::clone(&script);
                    thread::spawn(move || handle_client(stream, &hits, script.as_ref(), delay));
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(2));
                }
                Err(_) => break,
            }
        }
    });

    Ok(TestServer {
        url: format!("http://{}/", addr),
        hits,
        shutdown: shutdown_tx,
        thread: Some(handle),
    })
}

/// Address that refuses connections: the listener is bound and dropped.
pub(super) fn refused_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind refused listener failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("refused listener addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

fn handle_client(mut stream: TcpStream, hits: &AtomicU64, script: &Script, delay: Duration) {
    if stream.set_nonblocking(false).is_err() || !read_request_head(&mut stream) {
        return;
    }
    let index = hits.fetch_add(1, Ordering::SeqCst);
    let status = script(index);
    if !delay.is_zero() {
        thread::sleep(delay);
    }

    let response = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        status
    );
    if stream.write_all(response.as_bytes()).is_err() || stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request_head(stream: &mut TcpStream) -> bool {
    let mut head: Vec<u8> = Vec::new();
    let mut buffer = [0u8; 1024];
    loop {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => return false,
            Ok(read) => {
                head.extend_from_slice(buffer.get(..read).unwrap_or_default());
                if head.windows(4).any(|window| window == b"\r\n\r\n") {
                    return true;
                }
            }
        }
    }
}
