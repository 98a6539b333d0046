#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        Self { _tmp: tmp, root }
    }

    /// `hera` running inside the temp dir, isolated from the caller's
    /// model settings.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("hera");
        cmd.current_dir(&self.root)
            .env_remove("OLLAMA_HOST")
            .env_remove("OLLAMA_MODEL")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn read_json(&self, rel: &str) -> Value {
        let raw = std::fs::read_to_string(self.root.join(rel)).expect("read output file");
        serde_json::from_str(&raw).expect("output file is json")
    }
}

pub struct Recorded {
    pub path: String,
    pub body: Value,
}

/// Minimal stand-in for an Ollama server: answers one connection per
/// canned reply, in order, then stops.
pub struct FakeModel {
    pub url: String,
    handle: Option<JoinHandle<Vec<Recorded>>>,
}

impl FakeModel {
    pub fn serve(replies: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake model");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in replies {
                let stream = match listener.accept() {
                    Ok((stream, _)) => stream,
                    Err(_) => break,
                };
                seen.push(answer(stream, status, &body));
            }
            seen
        });
        Self {
            url,
            handle: Some(handle),
        }
    }

    /// Requests received. Only call when every reply was consumed.
    pub fn requests(mut self) -> Vec<Recorded> {
        self.handle
            .take()
            .map(|h| h.join().expect("fake model thread"))
            .unwrap_or_default()
    }
}

pub fn generate_reply(text: &str) -> (u16, String) {
    (
        200,
        json!({"model": "mistral", "response": text, "done": true}).to_string(),
    )
}

pub fn chat_reply(text: &str) -> (u16, String) {
    (
        200,
        json!({"model": "mistral", "message": {"role": "assistant", "content": text}, "done": true})
            .to_string(),
    )
}

/// A URL nothing is listening on.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

fn answer(stream: TcpStream, status: u16, body: &str) -> Recorded {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut payload = vec![0u8; content_length];
    reader.read_exact(&mut payload).expect("read body");

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Error",
    };
    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .expect("write response");
    stream.flush().expect("flush response");

    Recorded {
        path: request_line
            .split_whitespace()
            .nth(1)
            .unwrap_or_default()
            .to_string(),
        body: serde_json::from_slice(&payload).unwrap_or(Value::Null),
    }
}
