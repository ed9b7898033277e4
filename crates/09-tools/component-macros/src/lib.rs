//! # Component Macros
//!
//! 这个 crate 提供了 bean 类型登记和事务代理生成的过程宏。
//!
//! ## 核心宏
//!
//! - [`Bean`] - 派生 `Bean` 实现并在启动时登记类型描述符
//! - [`transactional_capability`] - 为能力集 trait 生成事务代理实现
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{transactional_capability, Bean};
//! use infrastructure_common::{Autowired, TransactionError};
//!
//! #[transactional_capability]
//! pub trait TransferService: Send + Sync {
//!     fn transfer(&self, from: &str, to: &str, money: i64) -> Result<(), BankError>;
//! }
//!
//! #[derive(Default, Bean)]
//! #[bean(implements(TransferService))]
//! #[service("transferService")]
//! #[transactional]
//! pub struct TransferServiceImpl {
//!     #[autowired("accountDao")]
//!     #[property]
//!     account_dao: Autowired<dyn AccountDao>,
//! }
//! ```
//!
//! 生成的代码通过 `::infrastructure_common` 路径引用运行时类型，使用方需要直接依赖该 crate。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, ItemTrait};

mod bean;
mod transactional;
mod utils;

/// bean 派生宏
///
/// 为结构体实现 `Bean`，并使用 `ctor` 在程序启动时把类型描述符登记到全局类型目录。
///
/// # 结构体属性
///
/// - `#[bean(implements(A, B))]` - 声明能力集（trait），第一个能力集决定扫描时推导的 id
/// - `#[bean(alias = "com.example.Foo")]` - 声明式配置中可用的别名
/// - `#[bean(init = "path::to::ctor")]` - 使用 `fn() -> Result<Self, E>` 构造，默认使用 `Default`
/// - `#[service]` / `#[service("id")]` / `#[service(value = "id", meta_data = "...")]` - 组件标记
/// - `#[transactional]` - 通过能力集取出时包裹事务代理
///
/// # 字段属性
///
/// - `#[autowired]` / `#[autowired("id")]` - 扫描后按字段名或显式 id 注入
/// - `#[property]` - 声明式配置可以通过 setter 设置
///
/// 带字段属性的字段类型必须是 `Autowired<T>`。
#[proc_macro_derive(Bean, attributes(bean, service, autowired, property, transactional))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    bean::expand_bean(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 事务能力集宏
///
/// 为 `TransactionalProxy<dyn Trait>` 实现该 trait。每个方法必须以 `&self`
/// 为接收者，返回 `Result<_, E>` 且 `E: From<TransactionError>`。
#[proc_macro_attribute]
pub fn transactional_capability(_args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemTrait);
    transactional::expand_transactional_capability(&item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
