//! 翻译客户端模块
//!
//! 提供统一的翻译客户端接口，以及把非英文输入桥接到分类模型的 `LanguageBridge`。

mod adapter;
mod passthrough;
mod remote;
mod types;

pub use adapter::LanguageBridge;
pub use passthrough::PassthroughNmtClient;
pub use remote::RemoteNmtHttpClient;
pub use types::{NmtClient, NmtTranslateRequest, NmtTranslateResponse};
