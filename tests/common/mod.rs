//! Shared builders and fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use outlay::models::{AppData, CostEntry, CostSource, DailyRecord};

/// Initialize test logging once; safe to call from every test.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "outlay=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn source(id: &str, name: &str) -> CostSource {
    CostSource::new(id, name)
}

/// Record builder with a derived total, mirroring what a saved record looks
/// like.
pub fn record(id: &str, date: &str, entries: &[(&str, f64)], images: u32) -> DailyRecord {
    let cost_entries: Vec<CostEntry> = entries
        .iter()
        .map(|(source_id, cost)| CostEntry {
            source_id: (*source_id).to_string(),
            cost: *cost,
        })
        .collect();
    let total_cost = cost_entries.iter().map(|entry| entry.cost).sum();

    DailyRecord {
        id: id.to_string(),
        date: date.to_string(),
        cost_entries,
        image_count: images,
        total_cost,
        notes: None,
    }
}

pub fn app_data(sources: Vec<CostSource>, records: Vec<DailyRecord>) -> AppData {
    AppData {
        version: None,
        last_updated: None,
        sources,
        records,
    }
}

/// Serve exactly one HTTP response on an ephemeral port, then close the
/// connection. Returns the URL to request.
pub fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/app-data.json", addr)
}

/// A URL nothing is listening on: the backing listener is bound to reserve a
/// port, then dropped.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/app-data.json", addr)
}
