pub mod common;
pub mod elimination;
pub mod error;
pub mod max_flow;
pub mod network;
pub mod standings;

pub use common::{Certificate, TeamRecord, Verdict};
pub use elimination::{is_valid_certificate, Division};
pub use error::{Error, Result};
pub use max_flow::{edmonds_karp, source_side, MaxFlow};
pub use network::{FlowEdge, FlowNetwork, FlowNode};
pub use standings::Standings;
