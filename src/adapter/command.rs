//! 命令适配器：把外部命令当作单槽位翻译组件
//!
//! 每次写入启动一次命令：原文由单独线程写入 stdin，另一线程同时读取 stdout，
//! 命令输出结束后成为槽位中的译文。读取只返回槽位当前内容，命令慢于设定延迟时
//! 读到的是上一次的译文。新的写入会终止仍在运行的上一个命令。

use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::adapter::{AdapterError, OutputSurface, WidgetAdapter};

pub struct CommandAdapter {
    command: String,
    surface: OutputSurface,
    label: String,
    slot: Arc<Mutex<String>>,
    /// 最近一次写入的编号；过期命令的输出不会写回槽位
    generation: Arc<AtomicU64>,
    /// 最近一次写入启动的进程
    running: Option<Child>,
}

impl CommandAdapter {
    pub fn new(command: impl Into<String>, surface: OutputSurface) -> Result<Self, AdapterError> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(AdapterError::InputUnavailable("翻译命令为空".into()));
        }
        Ok(Self {
            label: format!("command({})", command),
            command,
            surface,
            slot: Arc::new(Mutex::new(String::new())),
            generation: Arc::new(AtomicU64::new(0)),
            running: None,
        })
    }

    /// 回收上一个进程；仍在运行则先终止
    fn reap_previous(&mut self) {
        let Some(mut child) = self.running.take() else {
            return;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    tracing::warn!("翻译命令退出状态异常: {}", status);
                }
            }
            Ok(None) => {
                tracing::debug!("终止被取代的翻译命令 (pid {})", child.id());
                if let Err(e) = child.kill() {
                    tracing::warn!("终止翻译命令失败: {}", e);
                }
                let _ = child.wait();
            }
            Err(e) => tracing::warn!("查询翻译命令状态失败: {}", e),
        }
    }
}

impl Drop for CommandAdapter {
    fn drop(&mut self) {
        self.reap_previous();
    }
}

fn shell(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut c = Command::new("cmd");
        c.args(["/C", command]);
        c
    }
    #[cfg(not(windows))]
    {
        let mut c = Command::new("sh");
        c.args(["-c", command]);
        c
    }
}

impl WidgetAdapter for CommandAdapter {
    fn write_input(&mut self, text: &str) -> Result<(), AdapterError> {
        self.reap_previous();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut child = shell(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AdapterError::InputUnavailable(format!("无法启动命令 `{}`: {}", self.command, e)))?;
        let (Some(mut stdin), Some(mut stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AdapterError::InputUnavailable("命令的stdin/stdout不可用".into()));
        };
        self.running = Some(child);

        // 写入与读取分处两个线程，输出量超过管道缓冲时也不会互相阻塞
        let text = text.to_string();
        thread::spawn(move || {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                tracing::debug!("写入命令stdin中断: {}", e);
            }
        });

        let slot = Arc::clone(&self.slot);
        let current = Arc::clone(&self.generation);
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = stdout.read_to_end(&mut buf) {
                tracing::warn!("读取命令stdout失败: {}", e);
                return;
            }

            let Ok(mut guard) = slot.lock() else {
                return;
            };
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!("丢弃过期的命令输出（第 {} 次写入）", generation);
                return;
            }
            *guard = String::from_utf8_lossy(&buf).into_owned();
        });
        Ok(())
    }

    fn read_output(&mut self) -> Result<String, AdapterError> {
        let guard = self
            .slot
            .lock()
            .map_err(|_| AdapterError::OutputUnavailable("输出槽已损坏".into()))?;
        Ok(self.surface.present(guard.clone()))
    }

    fn name(&self) -> &str {
        &self.label
    }
}
