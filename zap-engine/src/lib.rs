//! Zap Engine - 报价与下单引擎
//!
//! # 架构概述
//!
//! 客户端在提交包裹之前调用本引擎：
//!
//! - **区域表** (`region`): 区域与服务网点的只读查找表
//! - **定价** (`pricing`): 由草稿计算报价，纯函数
//! - **会话** (`session`): 草稿 → 报价 → 确认 → 提交 状态机，幂等提交
//! - **下单** (`booking`): 通过 Parcel API 持久化订单，失败分类与运单事件
//!
//! # 模块结构
//!
//! ```text
//! zap-engine/src/
//! ├── core/          # 配置、状态、错误
//! ├── region/        # 区域表
//! ├── pricing/       # 定价规则
//! ├── session/       # 报价会话状态机
//! ├── booking/       # Parcel API 提交与订单生命周期
//! └── utils/         # 日志、校验
//! ```

pub mod booking;
pub mod core;
pub mod pricing;
pub mod region;
pub mod session;
pub mod utils;

// Re-export 公共类型
pub use booking::{BookingPayment, BookingSubmitter, DeliveryUpdate, SubmitFailure, SubmitReceipt};
pub use core::{DraftViolation, EngineConfig, EngineError, EngineResult, EngineState};
pub use pricing::PricingPolicy;
pub use region::{RegionError, RegionTable};
pub use session::{QuoteSession, RetryPolicy, SessionState, SharedQuoteSession};

// Re-export unified error types from shared
pub use utils::{ApiResponse, AppError, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 .env、读取配置并初始化日志
pub fn setup_environment() -> EngineConfig {
    dotenv::dotenv().ok();

    let config = EngineConfig::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    config
}
