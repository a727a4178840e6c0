//! # Handler Macros
//!
//! 为命令处理器生成编译时类型描述，代替运行时反射。
//!
//! ## 核心宏
//!
//! - [`Describe`] - 派生 `di_abstractions::Describe`
//!
//! 生成的代码引用 `di_abstractions` 和 `event_sourcing`，使用方需要同时依赖这两个 crate。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use handler_macros::Describe;
//!
//! #[derive(Default, Describe)]
//! #[describe(handles(OpenAccount, CloseAccount))]
//! pub struct AccountHandler;
//!
//! let module = StaticModule::new("accounts").with_described::<AccountHandler>();
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod describe;

/// 派生类型描述
///
/// # 参数
///
/// - `handles(A, B, ...)` - 实现了 `CommandHandler<A>`、`CommandHandler<B>` 的命令类型
/// - `constructor = path` - 构造函数 `fn(&dyn ServiceResolver) -> Result<Self, DependencyError>`，
///   缺省时使用 `Default`
/// - `capability = expr` - 额外声明的能力表达式，例如标记能力
///
/// 泛型类型不能派生，开放泛型需要手写 `TypeDescriptor::open_generic`。
#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    describe::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
