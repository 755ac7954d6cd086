//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (settings file, in-memory store) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (clipboard, scheduler) / 创建 platform 层具体实现
//! - ✅ Inject all dependencies into the sync controller / 将所有依赖注入到同步控制器
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide which trigger fires on startup
//! - 不判断启动时触发哪个同步
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - Config already loaded in config.rs
//! - 配置已在 config.rs 加载
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on ce-infra + ce-platform + ce-app simultaneously.**
//! > **这是唯一允许同时依赖 ce-infra、ce-platform 和 ce-app 的地方。**
//! > But this privilege is only for "assembly", not for "decision making".
//! > 但这种特权仅用于"组装"，不用于"决策"。

use std::sync::Arc;

use anyhow::Result;
use ce_app::usecases::settings::GetSyncSettings;
use ce_app::{SyncConfigStore, SyncController, SyncDeps};
use ce_core::config::AppConfig;
use ce_core::ports::{ExternalStorePort, ResultSinkPort, SettingsPort};
use ce_infra::{FileSettingsRepository, InMemoryExternalStore};
use ce_platform::{
    dispatch_channel, DispatchLoop, DispatchSender, SystemClipboardStore, TokioDeferredScheduler,
};
use tokio::runtime::Handle;
use tracing::info;

use crate::host::{LastResultSink, TerminalFields};

/// Which external store a session mirrors.
#[derive(Clone)]
pub enum StoreBackend {
    System(Arc<SystemClipboardStore>),
    Memory(Arc<InMemoryExternalStore>),
}

impl StoreBackend {
    pub fn system() -> Result<Self> {
        Ok(Self::System(Arc::new(SystemClipboardStore::new()?)))
    }

    pub fn memory() -> Self {
        Self::Memory(Arc::new(InMemoryExternalStore::new()))
    }

    pub fn port(&self) -> Arc<dyn ExternalStorePort> {
        match self {
            Self::System(store) => store.clone(),
            Self::Memory(store) => store.clone(),
        }
    }
}

/// Everything a command needs to drive one editing session.
pub struct Session {
    pub controller: Arc<SyncController>,
    pub fields: Arc<TerminalFields>,
    pub result: Arc<LastResultSink>,
    pub backend: StoreBackend,
    pub config: Arc<SyncConfigStore>,
    pub settings: Arc<dyn SettingsPort>,
    pub dispatch: DispatchLoop,
    pub dispatch_tx: DispatchSender,
}

/// Assemble a session. Must be called inside a tokio runtime.
///
/// Settings are loaded once here; `echo` makes the terminal fields print
/// every change the controller writes.
pub async fn wire_session(config: &AppConfig, backend: StoreBackend, echo: bool) -> Session {
    let settings: Arc<dyn SettingsPort> =
        Arc::new(FileSettingsRepository::new(config.settings_path.clone()));
    let sync_config = Arc::new(SyncConfigStore::default());
    GetSyncSettings::new(settings.clone(), sync_config.clone())
        .execute()
        .await;

    let (dispatch_tx, dispatch) = dispatch_channel();
    let scheduler = Arc::new(TokioDeferredScheduler::new(
        Handle::current(),
        dispatch_tx.clone(),
    ));
    let fields = Arc::new(TerminalFields::new(echo));
    let result = Arc::new(LastResultSink::default());

    let controller = SyncController::new(SyncDeps {
        store: backend.port(),
        fields: fields.clone(),
        scheduler,
        config: sync_config.clone(),
        result_sink: Some(result.clone() as Arc<dyn ResultSinkPort>),
    });
    fields.attach(&controller);

    info!(settings = %config.settings_path.display(), "session wired");

    Session {
        controller,
        fields,
        result,
        backend,
        config: sync_config,
        settings,
        dispatch,
        dispatch_tx,
    }
}
