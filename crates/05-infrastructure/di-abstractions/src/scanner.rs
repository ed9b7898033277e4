//! 组件扫描抽象
//!
//! 扫描根以模块路径表示，例如 `bank_transfer_demo` 或 `bank_transfer_demo::service`

use infrastructure_common::module_in_root;
use std::fmt;

/// 扫描根
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRoot(String);

impl ScanRoot {
    /// 以模块路径创建扫描根
    pub fn new(module_path: impl Into<String>) -> Self {
        Self(module_path.into())
    }

    /// 匹配所有模块的扫描根
    pub fn all() -> Self {
        Self::default()
    }

    /// 模块路径
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 模块是否位于扫描根之下
    pub fn contains(&self, module_path: &str) -> bool {
        module_in_root(module_path, &self.0)
    }
}

impl fmt::Display for ScanRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<all>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for ScanRoot {
    fn from(module_path: &str) -> Self {
        Self::new(module_path)
    }
}
