pub mod client;
pub mod document;
pub mod metrics;
pub mod navigator;
pub mod notifier;
pub mod storage;

pub use client::ApiClient;
pub use document::DocumentHead;
pub use navigator::{History, Navigator};
pub use notifier::{Notice, NoticeLevel, NoticeQueue, Notifier, TracingNotifier};
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
