mod reader;
mod rpc;

pub use reader::RpcChainReader;
pub use rpc::{RateLimitConfig, RetryConfig, RpcClient, RpcClientConfig, RpcError};
