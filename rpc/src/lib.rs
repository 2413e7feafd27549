//! Node access for the Contentos chain client.
//!
//! - [`Transport`]: one request/response call; [`HttpTransport`] speaks HTTP JSON-RPC
//! - [`NodeClient`]: cloneable handle with typed calls for chain state,
//!   broadcast, accounts, posts, blocks, producers, contracts and stakes
//! - [`PageManager`]: cursor pagination over the node's range queries

pub mod client;
pub mod error;
pub mod order;
pub mod pagination;
pub mod responses;
pub mod transport;

pub use client::NodeClient;
pub use error::RpcError;
pub use pagination::{Page, PageError, PageManager};
pub use transport::{HttpTransport, Transport};
