//! 虚拟机
//!
//! 纸带机及其错误类型。编译好的程序经 [`VM::run`] 解释执行,
//! 输入输出通过泛型的 `Read`/`Write` 注入,便于嵌入和测试。

pub mod errors;
pub mod executor;

#[cfg(test)]
mod tests;

pub use errors::{VMError, VMResult};
pub use executor::{VM, VMConfig, VMStatus, DEFAULT_TAPE_SIZE};
