//! Core data structures
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod network;

pub use self::network::{
    Capacity, Directedness, Edge, EdgeUsage, FlowNetwork, NetworkError, VertexId,
};
