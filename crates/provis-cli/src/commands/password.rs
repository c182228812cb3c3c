//! Password command implementation.

use provis_engine::generate_password;

/// Runs the password command: generates one console password and
/// prints it to stdout.
///
/// The generated value is intentionally printed in plaintext - that is
/// the entire purpose of the command.
pub fn run_password(length: usize) -> crate::CliResult<()> {
    let password = generate_password(length);
    println!("{}", password.expose());
    Ok(())
}
