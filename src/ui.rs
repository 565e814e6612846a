// UI layer: renders client outcomes as terminal text.
// The functions are small and synchronous. The printed lines are the CLI's
// actual interface, so their wording stays stable; failure detail goes to
// stderr and the verdict line to stdout.

use crate::api::{StorageClient, UploadRequest};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Token the CLI sends when `PAIMON_AUTH_TOKEN` is not set. This is the
/// test credential local development servers are configured with.
pub const DEFAULT_AUTH_TOKEN: &str = "test-token-12345";

/// Run one CLI command: the literal `ping`, or a path to a file to upload.
///
/// Both branches print their outcome rather than returning it; a rejected
/// upload is a normal run, not a process failure.
pub fn run(api: &StorageClient, command: &str) {
    if command == "ping" {
        handle_ping(api);
    } else {
        handle_upload(api, Path::new(command));
    }
}

/// Spinner shown while a request is in flight. Ticks on its own thread so
/// it stays animated during the blocking call.
fn spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn handle_ping(api: &StorageClient) {
    let spinner = spinner("Pinging...");
    let result = api.ping();
    spinner.finish_and_clear();

    if result.reachable {
        println!("Ping response: {}", result.raw_body);
        println!("Server is reachable!");
    } else {
        if let Some(err) = &result.transport_error {
            eprintln!("Ping failed: {}", err);
        }
        println!("Server is not reachable!");
    }
}

fn handle_upload(api: &StorageClient, path: &Path) {
    println!("Uploading file: {}", path.display());

    // The auth token is per-request configuration; the environment override
    // lives here in the front end, never in the client itself.
    let token =
        std::env::var("PAIMON_AUTH_TOKEN").unwrap_or_else(|_| DEFAULT_AUTH_TOKEN.into());
    let request = UploadRequest::new(token, path);

    let spinner = spinner("Uploading...");
    let result = api.upload(request);
    spinner.finish_and_clear();

    match result.http_status {
        Some(status) => {
            println!("HTTP Status Code: {}", status);
            println!("Upload response: {}", result.raw_body);
        }
        None => {
            if let Some(err) = &result.transport_error {
                eprintln!("Upload failed: {}", err);
            }
        }
    }

    if result.success {
        println!("File uploaded successfully!");
    } else {
        println!("File upload failed!");
    }
}
