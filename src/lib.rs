pub mod cli;
pub mod runner;
pub mod runtime;
pub mod scenarios;
pub mod script;
// 导出 neu_vector 供项目内其他模块使用
pub use neu_vector;
