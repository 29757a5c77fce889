//! pec-attendance main entrypoint.

use pec_attendance::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
