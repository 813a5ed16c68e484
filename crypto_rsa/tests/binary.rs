//! Runs the compiled `crypto-rsa` binary and checks its streams and exit
//! status.

use std::process::Output;

use anyhow::{Result, ensure};
use assert_cmd::Command;
use crypto_rsa::usage;
use test_helpers::sandbox::Sandbox;

/// Runs the binary inside `sandbox` with a clean settings environment.
fn run_in(sandbox: &Sandbox, env: &[(&str, &str)], args: &[&str]) -> Result<Output> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crypto-rsa"));
    cmd.current_dir(sandbox.root())
        .env_remove("RUST_LOG")
        .env_remove("CRYPTO_RSA_PUBLIC_KEY_FILE")
        .env_remove("CRYPTO_RSA_PRIVATE_KEY_FILE")
        .env_remove("CRYPTO_RSA_RESULT_PREFIX")
        .env("RUST_BACKTRACE", "0");
    for (key, value) in env {
        cmd.env(key, value);
    }
    Ok(cmd.args(args).output()?)
}

fn stdout_of(output: &Output) -> Result<String> {
    Ok(String::from_utf8(output.stdout.clone())?)
}

fn stderr_of(output: &Output) -> Result<String> {
    Ok(String::from_utf8(output.stderr.clone())?)
}

#[test]
fn help_flag_prints_usage_on_stdout() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = run_in(&sandbox, &[], &["-h"])?;
    ensure!(output.status.success(), "help should succeed: {output:?}");
    ensure!(stdout_of(&output)? == usage(), "unexpected stdout");
    ensure!(output.stderr.is_empty(), "unexpected stderr");
    Ok(())
}

#[test]
fn no_arguments_print_usage() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = run_in(&sandbox, &[], &[])?;
    ensure!(output.status.success(), "bare invocation should succeed");
    ensure!(stdout_of(&output)? == usage(), "unexpected stdout");
    Ok(())
}

#[test]
fn rejection_prints_reason_then_usage_on_stderr() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = run_in(&sandbox, &[], &["-e", "-d"])?;
    ensure!(!output.status.success(), "conflict should fail");
    ensure!(output.stdout.is_empty(), "nothing belongs on stdout");
    let stderr = stderr_of(&output)?;
    ensure!(
        stderr == format!("option '-d' cannot be used with '-e'\n\n{}", usage()),
        "unexpected stderr: {stderr}"
    );
    Ok(())
}

#[test]
fn missing_source_names_the_path() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let key = sandbox.write_private_key("privateKey.csv")?;
    let output = run_in(&sandbox, &[], &["-d", "-s", "absent.txt", "-k", key.as_str()])?;
    ensure!(!output.status.success(), "missing source should fail");
    let stderr = stderr_of(&output)?;
    ensure!(
        stderr.starts_with("source file 'absent.txt' does not exist\n\n"),
        "unexpected stderr: {stderr}"
    );
    Ok(())
}

#[test]
fn key_generation_reports_default_destinations() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = run_in(&sandbox, &[], &["-g"])?;
    ensure!(output.status.success(), "generation should succeed: {output:?}");
    let stdout = stdout_of(&output)?;
    ensure!(
        stdout
            == concat!(
                "PUBLIC_KEY  will be saved to: \"publicKey.csv\"\n",
                "PRIVATE_KEY will be saved to: \"privateKey.csv\"\n",
            ),
        "unexpected stdout: {stdout}"
    );
    Ok(())
}

#[test]
fn encryption_result_defaults_beside_the_source() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_private_key("publicKey.csv")?;
    sandbox.write("notes/plain.txt", "hello")?;
    let output = run_in(
        &sandbox,
        &[],
        &["-e", "-s", "notes/plain.txt", "-k", "publicKey.csv"],
    )?;
    ensure!(output.status.success(), "encryption should succeed: {output:?}");
    let stdout = stdout_of(&output)?;
    ensure!(
        stdout
            == concat!(
                "encrypt 5 bytes from \"notes/plain.txt\" using key \"publicKey.csv\"\n",
                "The result will be saved to: \"notes/new_plain.txt\"\n",
            ),
        "unexpected stdout: {stdout}"
    );
    Ok(())
}

#[test]
fn result_prefix_follows_the_environment() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_private_key("privateKey.csv")?;
    sandbox.write("cipher.txt", "x")?;
    let output = run_in(
        &sandbox,
        &[("CRYPTO_RSA_RESULT_PREFIX", "plain_")],
        &["-d", "-k", "privateKey.csv", "-s", "cipher.txt"],
    )?;
    ensure!(output.status.success(), "decryption should succeed: {output:?}");
    let stdout = stdout_of(&output)?;
    ensure!(
        stdout.contains("decrypt 1 byte from \"cipher.txt\""),
        "unexpected stdout: {stdout}"
    );
    ensure!(
        stdout.ends_with("The result will be saved to: \"plain_cipher.txt\"\n"),
        "unexpected stdout: {stdout}"
    );
    Ok(())
}

#[test]
fn explicit_result_wins_over_configuration() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_private_key("privateKey.csv")?;
    sandbox.write("cipher.txt", "xy")?;
    sandbox.write("crypto-rsa.toml", "result_prefix = \"ignored_\"\n")?;
    let output = run_in(
        &sandbox,
        &[],
        &["-d", "-k", "privateKey.csv", "-s", "cipher.txt", "-r", "out.txt"],
    )?;
    ensure!(output.status.success(), "decryption should succeed: {output:?}");
    let stdout = stdout_of(&output)?;
    ensure!(
        stdout.ends_with("The result will be saved to: \"out.txt\"\n"),
        "unexpected stdout: {stdout}"
    );
    Ok(())
}
