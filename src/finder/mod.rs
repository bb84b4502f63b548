//! 文件查找模块
//!
//! 这个模块提供了基于 getdents64 的文件系统遍历和搜索功能，
//! 包括过滤器注册和按目录粒度的错误恢复机制。

pub(crate) mod dirent;
pub mod filter;
mod walker;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::{FindError, FindResult};
use filter::{FilterSet, SizeFilter};

/// 文件查找器
///
/// 在扫描开始前累积过滤谓词，之后通过 [`visit`](Finder::visit) 深度优先
/// 遍历目录树，返回满足所有已注册过滤器的普通文件路径。
///
/// 同一个实例一次只支持一个 `visit` 调用；过滤器在遍历开始后只读。
/// 遍历使用原生递归，递归深度等于目录树深度，极深的目录树可能耗尽
/// 栈空间，这是一个已知限制。
#[derive(Debug, Default)]
pub struct Finder {
    filters: FilterSet,
}

impl Finder {
    /// 创建没有任何过滤器的查找器（匹配所有普通文件）
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个 inode 编号过滤器（集合语义，可多次调用）
    pub fn filter_inum(&mut self, inum: u64) {
        self.filters.add_inum(inum);
    }

    /// 注册一个文件名过滤器，按基本名精确匹配（集合语义）
    pub fn filter_name(&mut self, name: impl Into<OsString>) {
        self.filters.add_name(name.into());
    }

    /// 注册一个大小过滤器；多个大小过滤器取交集（AND）
    pub fn filter_size(&mut self, filter: SizeFilter) {
        self.filters.add_size(filter);
    }

    /// 注册一个硬链接数过滤器（集合语义）
    pub fn filter_nlinks(&mut self, nlinks: u64) {
        self.filters.add_nlinks(nlinks);
    }

    /// 遍历 `root` 下的目录树，返回所有匹配的普通文件路径。
    ///
    /// 结果按深度优先的枚举顺序排列。第一个目录级 I/O 错误即中止
    /// 整个扫描并返回 Err，已累积的部分结果被丢弃。
    pub fn visit<P: AsRef<Path>>(&self, root: P) -> FindResult<Vec<PathBuf>> {
        self.visit_with(root, walker::abort_on_error)
    }

    /// 同 [`visit`](Finder::visit)，但目录级 I/O 错误交给 `on_error` 决定：
    /// 返回 `true` 跳过出错的子树并继续，返回 `false` 中止扫描。
    ///
    /// 中止时返回 Err，部分结果被丢弃。
    pub fn visit_with<P, F>(&self, root: P, mut on_error: F) -> FindResult<Vec<PathBuf>>
    where
        P: AsRef<Path>,
        F: FnMut(&Path, &FindError) -> bool,
    {
        let root = root.as_ref();
        info!("starting scan in {}", root.display());

        let mut found = Vec::new();
        walker::walk(root, &self.filters, &mut found, &mut on_error)?;

        info!("scan finished, {} match(es)", found.len());
        Ok(found)
    }
}
