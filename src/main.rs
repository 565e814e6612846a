// Binary entrypoint.
// - Keeps `main` small: read the one command argument, create a storage
//   client and hand both to the UI layer.
// - Returns `anyhow::Result` so client construction errors print cleanly.

use paimon_cli::{api::StorageClient, ui};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "paimon-cli".into());

    // One positional argument: the literal `ping`, or a file to upload.
    // Anything else is a usage error and the only path that exits non-zero.
    let Some(command) = args.next() else {
        println!("Usage: {} <file_path>", program);
        println!("       {} ping", program);
        std::process::exit(1);
    };

    // Server address comes from `PAIMON_SERVER_URL` or falls back to
    // http://localhost:8080. See `api::StorageClient::from_env`.
    let api = StorageClient::from_env()?;

    ui::run(&api, &command);
    Ok(())
}
