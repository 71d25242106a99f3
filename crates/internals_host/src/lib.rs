//! Offline internals host boundary: service proxy, simulated host and call execution.
mod handle;
mod memory;
mod persist;
mod proxy;
mod seed;

pub use handle::{execute, HostCall, HostEvent, HostEvents, HostHandle, HostReply};
pub use memory::{Clock, InMemoryHost, STATUS_FAILURE, STATUS_SUCCESS};
pub use persist::{ensure_dump_dir, DumpWriter, PersistError};
pub use proxy::{HostError, HostServiceProxy};
pub use seed::{HostSeed, SeedError};
