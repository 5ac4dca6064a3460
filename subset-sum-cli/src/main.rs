//! Entry point for the `subset-sum` binary.
#![forbid(unsafe_code)]

use subset_sum_cli::CliError;

fn main() {
    match subset_sum_cli::run() {
        Ok(()) => {}
        // Lets clap print help and version output with its own exit code.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            report_failure(&err);
            std::process::exit(1);
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn report_failure(err: &CliError) {
    eprintln!("subset-sum: {err}");
}
