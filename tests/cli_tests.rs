use std::io::Write;
use std::process::{Command, Output, Stdio};

fn jjq() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jjq"))
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = jjq()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn jjq");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for jjq")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn compact_output_from_stdin() {
    let output = run_with_stdin(&["-c", ".k | .l , .n"], r#"{"k": {"l": "m", "n": "o"}}"#);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "\"m\"\n\"o\"\n");
}

#[test]
fn pretty_output_is_the_default() {
    let output = run_with_stdin(&[r#"{"a": .}"#], "1");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "{\n  \"a\": 1\n}\n");
}

#[test]
fn raw_output_strips_quotes_from_strings_only() {
    let output = run_with_stdin(&["-r", "-c", r#".a, .b"#], r#"{"a": "plain", "b": [1]}"#);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "plain\n[1]\n");
}

#[test]
fn every_document_in_the_input_stream_is_filtered() {
    let output = run_with_stdin(&["-c", "[.x]"], "{\"x\": 1}\n{\"x\": 2}\n{}");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "[1]\n[2]\n[null]\n");
}

#[test]
fn reads_input_from_file_with_single_quotes() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{{'h': {{'i': 'j'}}}}").expect("write temp file");
    let path = file.path().to_str().expect("utf-8 path").to_string();

    let output = jjq()
        .args(["-c", "--single-quotes", ".h | .i", &path])
        .output()
        .expect("failed to run jjq");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "\"j\"\n");
}

#[test]
fn null_input_skips_reading() {
    let output = jjq()
        .args(["-n", "-c", r#"{"aa": (1,2)}"#])
        .stdin(Stdio::null())
        .output()
        .expect("failed to run jjq");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "{\"aa\":1}\n{\"aa\":2}\n");
}

#[test]
fn malformed_index_exits_with_filter_error() {
    let output = run_with_stdin(&[".b | .[0.5]"], r#"{"b": [1]}"#);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed index '0.5'"), "stderr: {}", stderr);
}

#[test]
fn malformed_json_exits_with_input_error() {
    let output = run_with_stdin(&["."], "{'a': 1}");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("jjq: Malformed JSON"));
}
