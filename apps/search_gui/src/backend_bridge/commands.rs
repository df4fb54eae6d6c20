//! Backend commands queued from UI to backend worker.

use client_core::FetchRequest;

pub enum BackendCommand {
    Search(FetchRequest),
    Cancel,
}
