//! Adapters: implementations of the domain ports.

pub mod outbound;
