//! 应用组装：配置、存储提供者、仓储与服务的唯一组合根

pub mod context;

pub use context::{AppContext, AppState};
