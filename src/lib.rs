//! 基于 getdents64 的文件查找库
//!
//! 本库提供了低层次的递归文件查找功能，支持：
//! - 通过原始 getdents64 系统调用批量读取目录项
//! - 多种过滤条件（inode 编号、文件名、大小、硬链接数）
//! - 按目录粒度的错误恢复回调
//! - 详细的错误报告
//!
//! 仅支持 Linux。
//!
//! ## 使用场景
//!
//! - 按 inode 或硬链接数定位文件
//! - 在大目录树中按大小区间筛选文件
//! - 为外部程序收集待处理的文件列表
//!
//! # 示例
//!
//! 基本用法：
//! ```no_run
//! use osfind::finder::Finder;
//! use osfind::finder::filter::{Cmp, SizeFilter};
//!
//! // 创建查找器并注册过滤器
//! let mut finder = Finder::new();
//! finder.filter_size(SizeFilter::new(100, Cmp::Greater));
//! finder.filter_size(SizeFilter::new(1000, Cmp::Less));
//!
//! // 执行查找
//! let results = finder.visit(".").unwrap();
//!
//! // 输出结果
//! for path in results {
//!     println!("找到文件: {}", path.display());
//! }
//! ```
//!
//! 更多用法请参考各模块文档。

pub mod cli;
pub mod errors;
pub mod finder;

// Re-export main types for convenience
pub use errors::{FindError, FindResult};
pub use finder::filter::{Cmp, SizeFilter};
pub use finder::Finder;
