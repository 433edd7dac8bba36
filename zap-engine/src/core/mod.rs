//! 核心模块 - 引擎配置、状态和错误定义
//!
//! # 模块结构
//!
//! - [`EngineConfig`] - 引擎配置
//! - [`EngineState`] - 引擎状态 (区域表、定价策略、提交器)
//! - [`EngineError`] - 引擎错误

pub mod config;
pub mod error;
pub mod state;

pub use config::EngineConfig;
pub use error::{DraftViolation, EngineError, EngineResult};
pub use state::EngineState;
