//! Integration test common infrastructure.
//!
//! Provides a fake chat server, a way to spawn the gateway binary against
//! it, and a line-based IRC test client.

pub mod client;
pub mod remote;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use remote::FakeShowdown;
#[allow(unused_imports)]
pub use server::TestServer;
