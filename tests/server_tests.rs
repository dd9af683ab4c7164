//! End-to-end tests over TCP
//!
//! These tests verify:
//! - The server answers real sockets with well-formed responses
//! - The message scenarios from client to disk and back
//! - Concurrent clients never receive the same id
//! - Malformed input gets 400 and the connection closes

use std::fs;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use flatboard::client::parse_response;
use flatboard::network::{Server, ShutdownHandle};
use flatboard::{Client, Config, Service};
use tempfile::TempDir;

const INDEX: &[u8] = b"<!DOCTYPE html><title>index</title>";

// =============================================================================
// Helper Functions
// =============================================================================

struct TestServer {
    temp: TempDir,
    addr: String,
    shutdown: ShutdownHandle,
    thread: Option<JoinHandle<()>>,
}

impl TestServer {
    fn start() -> Self {
        let temp = TempDir::new().unwrap();
        let index_path = temp.path().join("index.html");
        fs::write(&index_path, INDEX).unwrap();

        let config = Config::builder()
            .data_dir(temp.path().join("data"))
            .index_path(&index_path)
            .listen_addr("127.0.0.1:0")
            .workers(4)
            .read_timeout_ms(5000)
            .build();

        let service = Arc::new(Service::open(&config).unwrap());
        let server = Server::bind(config, service).unwrap();
        let addr = server.local_addr().unwrap().to_string();
        let shutdown = server.shutdown_handle().unwrap();
        let thread = thread::spawn(move || server.run().unwrap());

        Self {
            temp,
            addr,
            shutdown,
            thread: Some(thread),
        }
    }

    fn client(&self) -> Client {
        Client::new(&self.addr)
    }

    fn data_file(&self, name: &str) -> PathBuf {
        self.temp.path().join("data").join(name)
    }

    /// Send raw bytes and return everything the server wrote back
    fn raw(&self, bytes: &[u8]) -> Vec<u8> {
        let mut stream = TcpStream::connect(&self.addr).unwrap();
        stream.write_all(bytes).unwrap();
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        out
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.shutdown();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

// =============================================================================
// Static and Error Path Tests
// =============================================================================

#[test]
fn test_index_with_headers() {
    let server = TestServer::start();

    let response = server.client().index().unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, INDEX);
    assert_eq!(response.header("content-type"), Some("text/html"));
    assert_eq!(
        response.header("Content-Length"),
        Some(INDEX.len().to_string().as_str())
    );
    assert_eq!(response.header("server"), Some("flatboard"));
    assert!(response.header("date").unwrap().ends_with(" GMT"));
}

#[test]
fn test_not_found_and_forbidden() {
    let server = TestServer::start();
    let client = server.client();

    assert_eq!(client.request("GET", "did_not_find_this_file.not", b"").unwrap().status, 404);
    assert_eq!(client.request("GET", "server.rs", b"").unwrap().status, 403);
    assert_eq!(client.request("GET", "../README.md", b"").unwrap().status, 403);
    assert_eq!(client.request("DELETE", "../messages", b"").unwrap().status, 403);
}

#[test]
fn test_method_statuses() {
    let server = TestServer::start();
    let client = server.client();

    assert_eq!(client.request("HEAD", "/", b"").unwrap().status, 501);
    assert_eq!(client.request("OPTION", "/", b"").unwrap().status, 501);
    assert_eq!(client.request("BREW", "/", b"").unwrap().status, 400);
}

#[test]
fn test_malformed_request_line() {
    let server = TestServer::start();

    let response = parse_response(&server.raw(b"GET\r\n\r\n")).unwrap();
    assert_eq!(response.status, 400);

    let response = parse_response(&server.raw(b"GET  HTTP/1.1\r\n\r\n")).unwrap();
    assert_eq!(response.status, 400);
}

#[test]
fn test_client_hanging_up_does_not_stop_server() {
    let server = TestServer::start();

    drop(TcpStream::connect(&server.addr).unwrap());

    assert_eq!(server.client().list().unwrap().status, 200);
}

// =============================================================================
// Scratch Resource Tests
// =============================================================================

#[test]
fn test_scratch_post_creates_and_echoes_file() {
    let server = TestServer::start();

    let response = server.client().scratch("test.txt", b"text=Simple test").unwrap();
    let on_disk = fs::read(server.data_file("test.txt")).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, on_disk);
    assert_eq!(response.header("content-length"), Some("16"));
}

// =============================================================================
// Message Scenario Tests
// =============================================================================

#[test]
fn test_post_writes_record_file() {
    let server = TestServer::start();

    let response = server
        .client()
        .request("POST", "messages", b"{\"text\": \"Example text1\"}")
        .unwrap();
    let on_disk = fs::read(server.data_file("messages.txt")).unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body, on_disk);
}

#[test]
fn test_post_and_get() {
    let server = TestServer::start();
    let client = server.client();

    client.request("POST", "messages", b"{\"text\": \"Example text1\"}").unwrap();
    client.request("POST", "messages", b"{\"text\": \"Example text2\"}").unwrap();
    let response = client.request("GET", "messages", b"").unwrap();

    assert_eq!(
        response.body,
        b"[{\"id\": 0,\"text\": \"Example text1\"},{\"id\": 1,\"text\": \"Example text2\"}]"
    );
}

#[test]
fn test_post_and_put_with_id_in_body_then_uri() {
    let server = TestServer::start();
    let client = server.client();
    let messages = server.data_file("messages.txt");

    client.request("POST", "messages", b"{\"text\": \"First message\"}").unwrap();

    let msg2 = b"{\"id\": 0,\"text\": \"Second message\"}";
    client.request("PUT", "messages", msg2).unwrap();
    let mut expected = b",".to_vec();
    expected.extend_from_slice(msg2);
    assert_eq!(fs::read(&messages).unwrap(), expected);

    client.request("PUT", "messages/0", b"{\"text\": \"Third message\"}").unwrap();
    assert_eq!(fs::read(&messages).unwrap(), b",{\"id\": 0,\"text\": \"Third message\"}");
}

#[test]
fn test_invalid_delete() {
    let server = TestServer::start();
    let client = server.client();

    assert_eq!(client.request("DELETE", "messages", b"").unwrap().status, 400);
    assert_eq!(client.request("DELETE", "messages", b"{\"id\": 0}").unwrap().status, 200);
}

#[test]
fn test_delete_by_body_and_uri() {
    let server = TestServer::start();
    let client = server.client();

    client.create("Example text1").unwrap();
    client.create("Example text2").unwrap();

    client.request("DELETE", "messages", b"{\"id\": 0}").unwrap();
    client.delete(1).unwrap();

    let response = client.list().unwrap();
    assert_eq!(response.body, b"[]");
    assert_eq!(response.reason, "No Messages Found");
    assert!(fs::read(server.data_file("messages.txt")).unwrap().is_empty());
}

#[test]
fn test_client_helpers_round_trip() {
    let server = TestServer::start();
    let client = server.client();

    assert_eq!(client.create("hello").unwrap().status, 201);
    assert_eq!(client.replace(0, "world").unwrap().status, 200);
    assert_eq!(client.replace(3, "nobody").unwrap().status, 404);

    let response = client.list().unwrap();
    assert_eq!(response.body_text(), "[{\"id\": 0,\"text\": \"world\"}]");
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_clients_get_distinct_ids() {
    let server = TestServer::start();

    let mut handles = vec![];
    for t in 0..8 {
        let client = server.client();
        handles.push(thread::spawn(move || {
            let mut bodies = Vec::new();
            for i in 0..5 {
                let response = client.create(&format!("t{}-{}", t, i)).unwrap();
                assert_eq!(response.status, 201);
                bodies.push(response.body_text());
            }
            bodies
        }));
    }

    let mut records = Vec::new();
    for handle in handles {
        records.extend(handle.join().unwrap());
    }

    let mut ids: Vec<u32> = records
        .iter()
        .map(|r| {
            let rest = r.strip_prefix(",{\"id\": ").unwrap();
            rest[..rest.find(',').unwrap()].parse().unwrap()
        })
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..40).collect::<Vec<u32>>());
}
