//! Transport Tests
//!
//! Tests for the scripted mock and the TCP bridge transport.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use ambimon::transport::{MockTransport, TcpTransport, Transport};
use ambimon::{AmbientClient, AmbientError, Config};

// =============================================================================
// MockTransport
// =============================================================================

#[test]
fn test_mock_replies_follow_writes() {
    let mut transport = MockTransport::new().reply("first").reply("second");

    assert_eq!(transport.bytes_available().unwrap(), 0);

    transport.write(b"a").unwrap();
    assert_eq!(transport.bytes_available().unwrap(), 5);
    assert_eq!(transport.read(5).unwrap(), b"first");

    transport.write(b"b").unwrap();
    assert_eq!(transport.bytes_available().unwrap(), 6);
    assert_eq!(transport.read(100).unwrap(), b"second");
}

#[test]
fn test_mock_delays_reply() {
    let mut transport = MockTransport::new().reply_after(2, "late");

    transport.write(b"x").unwrap();
    assert_eq!(transport.bytes_available().unwrap(), 0);
    assert_eq!(transport.bytes_available().unwrap(), 0);
    assert_eq!(transport.bytes_available().unwrap(), 4);
}

#[test]
fn test_mock_partial_read() {
    let mut transport = MockTransport::new().stale("abcdef");

    assert_eq!(transport.read(2).unwrap(), b"ab");
    assert_eq!(transport.bytes_available().unwrap(), 4);
}

#[test]
fn test_mock_handle_sees_client_activity() {
    let transport = MockTransport::new().reply(":REP:HUMIDITY:40:!");
    let handle = transport.handle();
    let mut client = AmbientClient::new(transport).unwrap();

    client.get_humidity().unwrap();

    assert_eq!(handle.written(), vec![":GET:HUMIDITY:!"]);
    assert_eq!(handle.reads(), 1);
}

#[test]
fn test_boxed_transport() {
    let transport: Box<dyn Transport> = Box::new(MockTransport::new().reply(":REP:TEMPERATURE:5.5:!"));
    let mut client = AmbientClient::new(transport).unwrap();

    assert_eq!(client.get_temperature().unwrap(), 5.5);
}

// =============================================================================
// TcpTransport
// =============================================================================

/// Spawn a one-shot device that answers `request` with `reply`
fn spawn_device(request: &'static str, reply: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = vec![0u8; request.len()];
        stream.read_exact(&mut buf).unwrap();
        assert_eq!(buf, request.as_bytes());
        stream.write_all(reply.as_bytes()).unwrap();
        stream.flush().unwrap();
        // Hold the connection until the client is done reading
        let mut rest = Vec::new();
        let _ = stream.read_to_end(&mut rest);
    });

    (addr, handle)
}

#[test]
fn test_tcp_get_temperature() {
    let (addr, device) = spawn_device(":GET:TEMPERATURE:!", ":REP:TEMPERATURE:23.5:!");

    let config = Config::builder()
        .poll_interval(Duration::from_millis(1))
        .timeout(Some(Duration::from_secs(2)))
        .bridge_addr(addr)
        .build();
    let transport = TcpTransport::connect(&config.bridge_addr, config.timeout).unwrap();
    let mut client = AmbientClient::with_config(transport, &config).unwrap();

    assert_eq!(client.get_temperature().unwrap(), 23.5);

    drop(client);
    device.join().unwrap();
}

#[test]
fn test_tcp_reset_humidity() {
    let (addr, device) = spawn_device(":SET:HUMIDITY_RESET:!", ":REP:HUMIDITY_RESET:!");

    let transport = TcpTransport::connect(&addr, Some(Duration::from_secs(2))).unwrap();
    let mut client = AmbientClient::new(transport).unwrap();

    client.reset_humidity().unwrap();

    drop(client);
    device.join().unwrap();
}

#[test]
fn test_tcp_flush_drains_backlog_beyond_one_peek() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let (backlog_sent, backlog_ready) = mpsc::channel();

    let device = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut backlog = vec![b'x'; 5000];
        backlog.extend_from_slice(b":REP:TEMPERATURE:99.0:!");
        stream.write_all(&backlog).unwrap();
        stream.flush().unwrap();
        backlog_sent.send(()).unwrap();

        let request = ":GET:TEMPERATURE:!";
        let mut buf = vec![0u8; request.len()];
        stream.read_exact(&mut buf).unwrap();
        assert_eq!(buf, request.as_bytes());
        stream.write_all(b":REP:TEMPERATURE:21.0:!").unwrap();
        stream.flush().unwrap();
        let mut rest = Vec::new();
        let _ = stream.read_to_end(&mut rest);
    });

    let transport = TcpTransport::connect(&addr, Some(Duration::from_secs(2))).unwrap();
    backlog_ready.recv().unwrap();
    // Let the whole backlog land in the socket buffer
    thread::sleep(Duration::from_millis(100));

    let config = Config::builder()
        .poll_interval(Duration::from_millis(1))
        .timeout(Some(Duration::from_secs(2)))
        .build();
    let mut client = AmbientClient::with_config(transport, &config).unwrap();

    assert_eq!(client.get_temperature().unwrap(), 21.0);

    drop(client);
    device.join().unwrap();
}

#[test]
fn test_tcp_nothing_available() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let mut transport = TcpTransport::connect(&addr, Some(Duration::from_millis(100))).unwrap();
    let (_peer, _) = listener.accept().unwrap();

    assert_eq!(transport.bytes_available().unwrap(), 0);
    assert_eq!(transport.timeout(), Some(Duration::from_millis(100)));
}

#[test]
fn test_tcp_reports_closed_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let mut transport = TcpTransport::connect(&addr, Some(Duration::from_millis(100))).unwrap();
    let (peer, _) = listener.accept().unwrap();
    drop(peer);

    let deadline = Instant::now() + Duration::from_secs(2);
    let closed = loop {
        match transport.bytes_available() {
            Err(AmbientError::ConnectionClosed) => break true,
            Ok(0) if Instant::now() < deadline => thread::sleep(Duration::from_millis(5)),
            _ => break false,
        }
    };

    assert!(closed);
}
