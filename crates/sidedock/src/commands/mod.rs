pub mod debug;
pub mod init;
pub mod offset;
pub mod run;

/// Exits with an error on platforms without a panel implementation.
#[cfg(not(windows))]
pub fn unsupported(command: &str) -> ! {
    eprintln!("Error: `{command}` is only available on Windows.");
    std::process::exit(1);
}
