//! 面部情绪检测进程管理
//!
//! 同一时间最多只有一个检测进程。启动和停止都在同一把锁内完成状态判断与切换，
//! 重复 start / stop 是幂等的。

use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config_manager::DetectionConfig;
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

impl StartOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartOutcome::Started => "started",
            StartOutcome::AlreadyRunning => "already_running",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

impl StopOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopOutcome::Stopped => "stopped",
            StopOutcome::NotRunning => "not_running",
        }
    }
}

pub struct DetectionSupervisor {
    config: DetectionConfig,
    child: Mutex<Option<Child>>,
}

impl DetectionSupervisor {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            child: Mutex::new(None),
        }
    }

    /// 启动检测进程；已在运行时不做任何事
    pub async fn start(&self) -> EngineResult<StartOutcome> {
        let mut slot = self.child.lock().await;

        if let Some(child) = slot.as_mut() {
            if is_alive(child)? {
                return Ok(StartOutcome::AlreadyRunning);
            }
            *slot = None;
        }

        let child = Command::new(&self.config.program)
            .args(&self.config.args)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                EngineError::process(format!(
                    "Failed to start detection process '{}': {e}",
                    self.config.program
                ))
            })?;

        info!(
            pid = child.id(),
            program = %self.config.program,
            args = ?self.config.args,
            "detection process started"
        );
        *slot = Some(child);
        Ok(StartOutcome::Started)
    }

    /// 强制结束检测进程并等待回收；未运行时不做任何事
    pub async fn stop(&self) -> EngineResult<StopOutcome> {
        let mut slot = self.child.lock().await;

        let Some(mut child) = slot.take() else {
            return Ok(StopOutcome::NotRunning);
        };
        if !is_alive(&mut child)? {
            return Ok(StopOutcome::NotRunning);
        }

        let pid = child.id();
        child.start_kill().map_err(|e| {
            EngineError::process(format!("Failed to stop detection process: {e}"))
        })?;

        let timeout = Duration::from_millis(self.config.stop_timeout_ms);
        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) => info!(pid, %status, "detection process stopped"),
            Ok(Err(e)) => warn!(pid, error = %e, "failed to reap detection process"),
            Err(_) => warn!(
                pid,
                timeout_ms = self.config.stop_timeout_ms,
                "detection process did not exit in time"
            ),
        }
        Ok(StopOutcome::Stopped)
    }

    pub async fn is_running(&self) -> bool {
        let mut slot = self.child.lock().await;
        match slot.as_mut() {
            Some(child) => is_alive(child).unwrap_or(false),
            None => false,
        }
    }
}

fn is_alive(child: &mut Child) -> EngineResult<bool> {
    match child.try_wait() {
        Ok(None) => Ok(true),
        Ok(Some(status)) => {
            info!(%status, "detection process has exited");
            Ok(false)
        }
        Err(e) => Err(EngineError::process(format!(
            "Failed to query detection process: {e}"
        ))),
    }
}
