//! Network description input
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod loader;

pub use self::loader::{
    load_network, load_network_or_empty, parse_network, LoadError, LoadReport, MAX_ORDER,
};
