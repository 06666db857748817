use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

#[derive(Clone)]
pub struct Scripted {
    pub status: u16,
    pub body: String,
}

pub fn respond(status: u16, body: &str) -> Scripted {
    Scripted {
        status,
        body: body.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub request_line: String,
    pub body: Vec<u8>,
}

/// Blocking HTTP/1.1 server answering each connection with the next script.
///
/// Serves exactly `scripts.len()` connections, then exits.
pub struct BlockingServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: Option<JoinHandle<()>>,
}

impl BlockingServer {
    pub fn start(scripts: Vec<Scripted>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("local listener should bind");
        let addr = listener.local_addr().expect("listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = std::thread::spawn({
            let requests = Arc::clone(&requests);
            move || {
                for script in scripts {
                    let Ok((mut socket, _)) = listener.accept() else {
                        return;
                    };
                    if let Some(request) = read_request(&mut socket) {
                        requests.lock().expect("requests lock").push(request);
                    }
                    let head = format!(
                        "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        script.status,
                        script.body.len()
                    );
                    let _ = socket.write_all(head.as_bytes());
                    let _ = socket.write_all(script.body.as_bytes());
                    let _ = socket.flush();
                }
            }
        });

        Self {
            base_url: format!("http://{addr}/v1"),
            requests,
            handle: Some(handle),
        }
    }

    /// Waits for every scripted connection and returns what was received.
    pub fn finish(mut self) -> Vec<Recorded> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("server thread");
        }
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn received(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn read_request(socket: &mut TcpStream) -> Option<Recorded> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let read = socket.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break position + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let request_line = head.lines().next()?.to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let read = socket.read(&mut chunk).ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }

    Some(Recorded { request_line, body })
}
