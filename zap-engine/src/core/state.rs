use std::sync::Arc;

use shared::ParcelDraft;
use zap_client::{NetworkParcelApi, ParcelApi};

use crate::booking::BookingSubmitter;
use crate::core::{EngineConfig, EngineError, EngineResult};
use crate::pricing::PricingPolicy;
use crate::region::RegionTable;
use crate::session::{QuoteSession, RetryPolicy};

/// 引擎状态 - 进程内共享的只读组件
///
/// 区域表在启动时加载一次，之后只读，可在多个会话间并发读取。
/// 克隆开销很小 (内部均为 `Arc`)。
#[derive(Debug, Clone)]
pub struct EngineState {
    regions: Arc<RegionTable>,
    policy: PricingPolicy,
    submitter: BookingSubmitter,
    retry: RetryPolicy,
}

impl EngineState {
    /// 根据配置初始化: 加载区域表并创建网络客户端
    pub fn initialize(config: &EngineConfig) -> EngineResult<Self> {
        let api = NetworkParcelApi::new(&config.client_config())
            .map_err(|e| EngineError::Config(e.to_string()))?;
        tracing::info!(base_url = api.base_url(), "Parcel API client ready");
        Self::with_api(config, Arc::new(api))
    }

    /// 使用指定的 Parcel API 实现初始化 (测试中注入内存实现)
    pub fn with_api(config: &EngineConfig, api: Arc<dyn ParcelApi>) -> EngineResult<Self> {
        let regions = match &config.region_table_path {
            Some(path) => RegionTable::load_from_path(path)?,
            None => RegionTable::builtin(),
        };
        Ok(Self::from_parts(
            regions,
            BookingSubmitter::new(api).with_tracking_proposal(config.propose_tracking_id),
            config.retry_policy(),
        ))
    }

    pub fn from_parts(regions: RegionTable, submitter: BookingSubmitter, retry: RetryPolicy) -> Self {
        let regions = Arc::new(regions);
        Self {
            policy: PricingPolicy::new(regions.clone()),
            regions,
            submitter,
            retry,
        }
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn submitter(&self) -> &BookingSubmitter {
        &self.submitter
    }

    /// 为一次下单创建新会话
    pub fn new_session(&self, draft: ParcelDraft) -> QuoteSession {
        QuoteSession::new(draft, self.policy.clone(), self.submitter.clone())
            .with_retry_policy(self.retry)
    }
}
