use std::io::{self, Write};
use std::net::TcpListener;
use std::process::{Command, Output, Stdio};

fn chat_client(args: &[&str], stdin: &[u8]) -> io::Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chat-client"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // The client may exit before reading anything.
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output()
}

fn unused_port() -> io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

#[test]
fn connection_failure_is_reported() -> io::Result<()> {
    let port = unused_port()?.to_string();
    let output = chat_client(&["127.0.0.1", &port], b"hello\n")?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "{}", stderr);
    assert!(lines[0].starts_with("Error connecting to server: "), "{}", stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("> "), "{}", stdout);
    Ok(())
}

#[test]
fn malformed_port_is_not_fatal() -> io::Result<()> {
    let output = chat_client(&["127.0.0.1", "not-a-port"], b"")?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut lines = stderr.lines();
    assert_eq!(
        lines.next(),
        Some("invalid port # \"not-a-port\", using 6666"),
        "{}",
        stderr
    );
    // At most the connection diagnostic follows; no log lines by default.
    assert!(lines.clone().count() <= 1, "{}", stderr);
    assert!(lines.all(|line| line.starts_with("Error connecting to server: ")));
    // Whatever happens next depends on whether something listens on the default port.
    assert!(
        stderr.contains("Error connecting to server")
            || String::from_utf8_lossy(&output.stdout).contains("127.0.0.1:6666"),
        "{}",
        stderr
    );
    Ok(())
}

#[test]
fn chat_over_stdio() -> io::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port().to_string();

    let server = std::thread::spawn(move || -> io::Result<Vec<u8>> {
        use std::io::Read;

        let (mut stream, _) = listener.accept()?;
        let mut received = Vec::new();
        stream.read_to_end(&mut received)?;
        Ok(received)
    });

    let output = chat_client(&["127.0.0.1", &port], b"first\nsecond\n")?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with(&format!("Welcome to chat server 127.0.0.1:{}\n", port)),
        "{}",
        stdout
    );
    assert!(stdout.contains("Client terminated.\n"), "{}", stdout);

    assert_eq!(server.join().unwrap()?, b"first\nsecond\n");
    Ok(())
}
