//! Loopback HTTP server answering with canned statuses. Shared by the disk
//! and CLI integration tests.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

#[derive(Debug)]
pub struct SeenRequest {
    pub request_line: String,
    pub authorization: Option<String>,
}

/// Serves one canned status per connection, in order, then stops. Returns
/// the disk base URL to point a client at.
pub fn serve(statuses: Vec<u16>) -> (String, JoinHandle<Vec<SeenRequest>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base_url = format!("http://{}/v1/disk", listener.local_addr().expect("addr"));
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for status in statuses {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut authorization = None;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("authorization") {
                        authorization = Some(value.trim().to_string());
                    }
                }
            }
            seen.push(SeenRequest {
                request_line: request_line.trim_end().to_string(),
                authorization,
            });
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status} Canned\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            )
            .expect("write response");
        }
        seen
    });
    (base_url, handle)
}
