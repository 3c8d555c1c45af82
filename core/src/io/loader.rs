//! Plain-text network descriptions
//!
//! ```text
//! 4
//! 0 1 3
//! 0 2 2
//! 1 3 2
//! 2 3 3
//! -1
//! ```
//!
//! The first non-blank line holds the vertex count; each following line is
//! `start end capacity`. A line starting with `-1` ends the description, as
//! does the end of input. Blank lines are skipped.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::data_structures::network::{Capacity, Directedness, FlowNetwork, NetworkError};

const TERMINATOR: &str = "-1";

/// Largest vertex count a description may declare
///
/// A network keeps three dense `order x order` matrices, so 4096 vertices
/// already take roughly 400 MiB.
pub const MAX_ORDER: usize = 4096;

/// Failure while reading a network description
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: cannot parse '{token}'")]
    Parse { line: usize, token: String },

    #[error("missing vertex count header")]
    MissingHeader,

    #[error("line {line}: vertex count {order} exceeds the supported maximum {max}")]
    OrderTooLarge { line: usize, order: usize, max: usize },

    #[error("line {line}: negative vertex {value}")]
    NegativeVertex { line: usize, value: i64 },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Outcome of a lenient load
#[derive(Debug)]
pub struct LoadReport {
    pub network: FlowNetwork,
    /// Set when the file could not be opened and an empty network was used
    pub fallback: Option<LoadError>,
}

/// Parse a description held in memory
pub fn parse_network(text: &str, directedness: Directedness) -> Result<FlowNetwork, LoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(LoadError::MissingHeader)?;
    let order_token = header.split_whitespace().next().unwrap_or(header);
    let order = parse_token(header_line, order_token)?;
    let order = vertex_index(header_line, order)?;
    if order > MAX_ORDER {
        return Err(LoadError::OrderTooLarge {
            line: header_line,
            order,
            max: MAX_ORDER,
        });
    }
    let mut network = FlowNetwork::new(directedness, order);

    for (line, content) in lines {
        let mut tokens = content.split_whitespace();
        let first = tokens.next().unwrap_or(TERMINATOR);
        if first == TERMINATOR {
            break;
        }

        let start = vertex_index(line, parse_token(line, first)?)?;
        let end = match tokens.next() {
            Some(token) => vertex_index(line, parse_token(line, token)?)?,
            None => return Err(short_line(line, content)),
        };
        let capacity: Capacity = match tokens.next() {
            Some(token) => parse_token(line, token)?,
            None => return Err(short_line(line, content)),
        };

        network.add_edge(start, end, capacity)?;
    }

    debug!(
        "Parsed {} network of order {} with {} edges",
        directedness,
        network.order(),
        network.edge_count()
    );
    Ok(network)
}

/// Read and parse a description file
pub fn load_network(
    path: impl AsRef<Path>,
    directedness: Directedness,
) -> Result<FlowNetwork, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_network(&text, directedness)
}

/// Like [`load_network`], but an unreadable file yields an empty network
pub fn load_network_or_empty(
    path: impl AsRef<Path>,
    directedness: Directedness,
) -> Result<LoadReport, LoadError> {
    match load_network(path, directedness) {
        Ok(network) => Ok(LoadReport {
            network,
            fallback: None,
        }),
        Err(error @ LoadError::Io { .. }) => {
            warn!("{}; continuing with an empty network", error);
            Ok(LoadReport {
                network: FlowNetwork::empty(directedness),
                fallback: Some(error),
            })
        }
        Err(error) => Err(error),
    }
}

fn parse_token(line: usize, token: &str) -> Result<i64, LoadError> {
    token.parse().map_err(|_| LoadError::Parse {
        line,
        token: token.to_string(),
    })
}

fn vertex_index(line: usize, value: i64) -> Result<usize, LoadError> {
    usize::try_from(value).map_err(|_| LoadError::NegativeVertex { line, value })
}

fn short_line(line: usize, content: &str) -> LoadError {
    LoadError::Parse {
        line,
        token: content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "4\n0 1 3\n0 2 2\n1 3 2\n2 3 3\n1 2 1\n-1\n";

    #[test]
    fn test_parse_example() {
        let network = parse_network(EXAMPLE, Directedness::Directed).unwrap();
        assert_eq!(network.order(), 4);
        assert_eq!(network.edge_count(), 5);
        assert_eq!(network.original()[0][1], 3);
        assert_eq!(network.neighbors()[0], vec![1, 2]);
    }

    #[test]
    fn test_terminator_and_end_of_input() {
        let text = "3\n\n0 1 4\n-1\n1 2 9\n";
        let network = parse_network(text, Directedness::Directed).unwrap();
        assert_eq!(network.edge_count(), 1);
        assert!(!network.is_edge(1, 2));

        let unterminated = parse_network("3\n0 1 4\n1 2 5", Directedness::Undirected).unwrap();
        assert_eq!(unterminated.edge_count(), 4);
        assert!(unterminated.is_edge(2, 1));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(matches!(
            parse_network("3\n0 x 4\n", Directedness::Directed),
            Err(LoadError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_network("3\n0 1\n", Directedness::Directed),
            Err(LoadError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_network("3\n-2 1 4\n", Directedness::Directed),
            Err(LoadError::NegativeVertex { line: 2, value: -2 })
        ));
        assert!(matches!(
            parse_network("3\n0 7 4\n", Directedness::Directed),
            Err(LoadError::Network(NetworkError::VertexOutOfRange { vertex: 7, .. }))
        ));
        assert!(matches!(
            parse_network("\n\n", Directedness::Directed),
            Err(LoadError::MissingHeader)
        ));
        assert!(matches!(
            parse_network("2\n0 1 9223372036854775807\n0 1 1\n-1\n", Directedness::Directed),
            Err(LoadError::Network(NetworkError::CapacityOverflow { start: 0, end: 1 }))
        ));
    }

    #[test]
    fn test_rejects_oversized_header() {
        assert!(matches!(
            parse_network("100000000\n-1\n", Directedness::Directed),
            Err(LoadError::OrderTooLarge { line: 1, order: 100_000_000, max: MAX_ORDER })
        ));
        let just_over = format!("{}\n-1\n", MAX_ORDER + 1);
        assert!(matches!(
            parse_network(&just_over, Directedness::Directed),
            Err(LoadError::OrderTooLarge { .. })
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_empty() {
        let path = std::env::temp_dir().join("flowlab-loader-missing-network.txt");
        let _ = fs::remove_file(&path);

        assert!(matches!(
            load_network(&path, Directedness::Directed),
            Err(LoadError::Io { .. })
        ));
        let report = load_network_or_empty(&path, Directedness::Directed).unwrap();
        assert_eq!(report.network.order(), 0);
        assert!(report.fallback.is_some());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("flowlab-loader-example-network.txt");
        fs::write(&path, EXAMPLE).unwrap();

        let report = load_network_or_empty(&path, Directedness::Directed).unwrap();
        assert!(report.fallback.is_none());
        assert_eq!(report.network.edge_count(), 5);
        let _ = fs::remove_file(&path);
    }
}
