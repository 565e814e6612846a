// Library root
// -----------
// The crate is a thin command-line companion to a Paimon Cloud Storage
// server, split into a reusable client and the terminal front end the
// binary (`main.rs`) drives.
//
// Module responsibilities:
// - `api`: the storage client proper. Builds and performs the ping, upload
//   and status exchanges and classifies each outcome into result values
//   (transport failure vs. the server's own verdict).
// - `ui`: maps the single CLI argument to an api call and renders the
//   outcome as terminal text.
//
// Keeping this separation makes it possible to drive the client without the
// CLI, or to put a different front end on top of it.
pub mod api;
pub mod ui;
