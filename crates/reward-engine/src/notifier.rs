//! 投放事件通知
//!
//! 回收箱接收投放物后（校验之前）同步通知所有订阅者。
//!
//! ## 设计说明
//!
//! - 订阅者按订阅顺序依次调用
//! - 单个订阅者返回错误或 panic 只记录日志，不影响其他订阅者
//! - 订阅返回 `SubscriptionId`，用于取消订阅

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Item, User};

/// 投放事件
///
/// 只表示“已接收”，不携带校验结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositEvent {
    pub event_id: Uuid,
    pub item_id: Uuid,
    pub bin_material: String,
    pub material: String,
    pub weight_kg: f64,
    pub user_id: String,
    pub received_at: DateTime<Utc>,
}

impl DepositEvent {
    pub fn new(bin_material: &str, item: &Item, user: &User) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            item_id: item.item_id(),
            bin_material: bin_material.to_string(),
            material: item.material().to_string(),
            weight_kg: item.weight_kg(),
            user_id: user.id().to_string(),
            received_at: Utc::now(),
        }
    }
}

/// 投放事件订阅者
pub trait DepositListener: Send + Sync {
    fn on_deposit(&self, event: &DepositEvent) -> anyhow::Result<()>;
}

impl<F> DepositListener for F
where
    F: Fn(&DepositEvent) -> anyhow::Result<()> + Send + Sync,
{
    fn on_deposit(&self, event: &DepositEvent) -> anyhow::Result<()> {
        self(event)
    }
}

/// 日志订阅者：把每次投放写入 tracing 日志
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

impl DepositListener for LoggingListener {
    fn on_deposit(&self, event: &DepositEvent) -> anyhow::Result<()> {
        info!(
            event_id = %event.event_id,
            bin = %event.bin_material,
            material = %event.material,
            weight_kg = event.weight_kg,
            user_id = %event.user_id,
            "回收箱收到投放物"
        );
        Ok(())
    }
}

/// 订阅 ID
pub type SubscriptionId = u64;

/// 投放事件通知器
pub struct DepositNotifier {
    listeners: RwLock<Vec<(SubscriptionId, Arc<dyn DepositListener>)>>,
    /// 订阅 ID 计数器
    id_counter: AtomicU64,
}

impl DepositNotifier {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            id_counter: AtomicU64::new(1),
        }
    }

    /// 订阅投放事件
    pub fn subscribe(&self, listener: Arc<dyn DepositListener>) -> SubscriptionId {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        self.listeners.write().push((id, listener));
        debug!(subscription_id = id, "新增投放事件订阅");
        id
    }

    /// 取消订阅，订阅不存在时返回 false
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(sub_id, _)| *sub_id != id);
        let removed = listeners.len() != before;
        if removed {
            debug!(subscription_id = id, "取消投放事件订阅");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// 按订阅顺序通知所有订阅者，返回失败的订阅者数量
    ///
    /// 通知前先复制订阅列表，订阅者在回调中订阅/取消订阅不会死锁
    pub fn notify_all(&self, event: &DepositEvent) -> usize {
        let snapshot: Vec<_> = self.listeners.read().clone();
        let mut failures = 0;

        for (id, listener) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| listener.on_deposit(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failures += 1;
                    warn!(
                        subscription_id = id,
                        event_id = %event.event_id,
                        error = %e,
                        "投放事件订阅者处理失败"
                    );
                }
                Err(_) => {
                    failures += 1;
                    warn!(
                        subscription_id = id,
                        event_id = %event.event_id,
                        "投放事件订阅者发生 panic"
                    );
                }
            }
        }

        failures
    }
}

impl Default for DepositNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DepositNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepositNotifier")
            .field("listeners", &self.len())
            .finish()
    }
}
