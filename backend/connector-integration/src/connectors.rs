pub mod zgate;
pub use self::zgate::{gateway::ZgateGateway, Zgate};
