//! # Controller Dependencies / 控制器依赖
//!
//! Parameter grouping for [`SyncController`](crate::SyncController)
//! construction. Not a builder: no build steps, no defaults, no hidden logic.

use std::sync::Arc;

use ce_core::ports::*;

use crate::SyncConfigStore;

pub struct SyncDeps {
    // Both sides of the mirror / 镜像两端
    pub store: Arc<dyn ExternalStorePort>,
    pub fields: Arc<dyn LocalFieldHostPort>,

    // Event loop / 事件循环
    pub scheduler: Arc<dyn DeferredTaskPort>,

    // Settings / 设置
    pub config: Arc<SyncConfigStore>,

    /// Present only when the editor was launched by a caller awaiting a value.
    pub result_sink: Option<Arc<dyn ResultSinkPort>>,
}
