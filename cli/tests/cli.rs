//! Runs the `reqprobe` binary against the echo server.

use std::net::SocketAddr;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn reqprobe() -> Result<Command> {
    let mut cmd = Command::cargo_bin("reqprobe")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn post_params_are_echoed_and_pretty_printed() -> Result<()> {
    let addr = start_server();

    reqprobe()?
        .arg(format!("http://{addr}/echo"))
        .arg("a=1")
        .assert()
        .success()
        .stdout("Response status: 200 OK\nResponse body:\n{\n  \"a\": \"1\"\n}\n")
        .stderr("");

    Ok(())
}

#[test]
fn get_json_keeps_key_order() -> Result<()> {
    let addr = start_server();

    let output = reqprobe()?.arg(format!("http://{addr}/json")).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let body = stdout
        .strip_prefix("Response status: 200 OK\nResponse body:\n")
        .expect("report header");
    let keys: Vec<&str> = body
        .lines()
        .filter(|line| line.starts_with("  \""))
        .map(|line| line.trim_start().split('"').nth(1).unwrap_or_default())
        .collect();
    assert_eq!(keys, ["name", "version", "tags", "owner", "extra"]);

    Ok(())
}

#[test]
fn non_json_body_is_printed_verbatim() -> Result<()> {
    let addr = start_server();

    let expected = format!(
        "Response status: 200 OK\nResponse body:\n{}",
        mock_server::TEXT_DOCUMENT
    );
    reqprobe()?
        .arg(format!("http://{addr}/text"))
        .assert()
        .success()
        .stdout(expected);

    Ok(())
}

#[test]
fn error_status_still_exits_zero() -> Result<()> {
    let addr = start_server();

    reqprobe()?
        .arg(format!("http://{addr}/status/404"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Response status: 404 Not Found\n"));

    reqprobe()?
        .arg(format!("http://{addr}/status/503"))
        .arg("retry=no")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Response status: 503 Service Unavailable\n",
        ));

    Ok(())
}

#[test]
fn header_flag_is_sent() -> Result<()> {
    let addr = start_server();

    reqprobe()?
        .arg(format!("http://{addr}/headers"))
        .args(["-H", "X-Probe: from-cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""x-probe": "from-cli""#));

    Ok(())
}

#[test]
fn unreachable_host_exits_one_without_stdout() -> Result<()> {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")?.local_addr()?;

    reqprobe()?
        .arg(format!("http://{addr}/"))
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("Error: "));

    Ok(())
}

#[test]
fn malformed_url_exits_one() -> Result<()> {
    reqprobe()?
        .arg("ftp://example.com/file")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Error: invalid URL"));

    Ok(())
}

#[test]
fn param_without_equals_is_usage_error() -> Result<()> {
    reqprobe()?
        .args(["http://127.0.0.1:9/", "novalue"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("expected key=value"));

    Ok(())
}

#[test]
fn missing_url_prints_usage() -> Result<()> {
    reqprobe()?
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));

    Ok(())
}
