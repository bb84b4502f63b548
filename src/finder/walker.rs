//! 递归遍历引擎
//!
//! 本模块实现深度优先的目录遍历：逐目录打开一个 getdents64 流，
//! 按磁盘枚举顺序处理目录项，对普通文件应用过滤器，对子目录递归。
//! 目录级 I/O 错误交给调用方提供的回调决定是跳过子树还是中止扫描。

use std::path::{Path, PathBuf};

use log::{debug, trace};

use super::dirent::{DirStream, EntryKind};
use super::filter::FilterSet;
use crate::errors::{FindError, FindResult};

/// 目录级错误的恢复回调：返回 true 跳过出错的子树并继续，
/// 返回 false 中止整个扫描。
pub type ErrorHandler<'a> = dyn FnMut(&Path, &FindError) -> bool + 'a;

/// 遍历 `path` 下的目录树，把匹配的普通文件追加到 `found`。
///
/// 返回 Err 表示扫描被中止（回调返回 false 或错误未被处理），
/// 此时 `found` 中的部分结果由上层丢弃。
pub(crate) fn walk(
    path: &Path,
    filters: &FilterSet,
    found: &mut Vec<PathBuf>,
    on_error: &mut ErrorHandler<'_>,
) -> FindResult<()> {
    debug!("scanning directory: {}", path.display());

    // 流持有目录 fd，任何退出路径（包括中止）都会在离开本帧时关闭它
    let mut stream = match DirStream::open(path) {
        Ok(stream) => stream,
        Err(source) => {
            let err = FindError::DirectoryOpenFailed {
                path: path.to_path_buf(),
                source,
            };
            return recover(path, err, on_error);
        }
    };

    loop {
        let entry = match stream.next_entry() {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(source) => {
                let err = FindError::DirectoryReadFailed {
                    path: path.to_path_buf(),
                    source,
                };
                return recover(path, err, on_error);
            }
        };

        if entry.is_dot() {
            continue;
        }
        let child = path.join(&entry.name);

        match entry.kind {
            EntryKind::RegularFile => {
                // 无需元数据的过滤器先行，能提前淘汰就不再发 stat
                if !filters.accepts_inum(entry.ino) {
                    continue;
                }
                if !filters.accepts_name(&entry.name) {
                    continue;
                }
                if filters.needs_metadata() {
                    match query_metadata(&stream, &child, &entry.name, on_error)? {
                        Some((size, nlinks)) => {
                            if !filters.accepts_metadata(size, nlinks) {
                                continue;
                            }
                        }
                        // 元数据查询失败但回调选择继续：跳过该条目
                        None => continue,
                    }
                }
                trace!("matched: {}", child.display());
                found.push(child);
            }
            EntryKind::Directory => {
                // 递归中的中止信号直接向上传播，剩余条目不再处理
                walk(&child, filters, found, on_error)?;
            }
            EntryKind::Other | EntryKind::Unknown => {}
        }
    }

    Ok(())
}

/// 对一个目录项执行 fstatat 查询。失败时询问回调：
/// Ok(None) 表示跳过该条目继续扫描，Err 表示中止。
fn query_metadata(
    stream: &DirStream,
    child: &Path,
    name: &std::ffi::OsStr,
    on_error: &mut ErrorHandler<'_>,
) -> FindResult<Option<(u64, u64)>> {
    match stream.stat_entry(name) {
        Ok(meta) => Ok(Some(meta)),
        Err(source) => {
            let err = FindError::MetadataQueryFailed {
                path: child.to_path_buf(),
                source,
            };
            if on_error(child, &err) {
                debug!("skipping entry after error: {}", err);
                Ok(None)
            } else {
                Err(err)
            }
        }
    }
}

/// 目录级错误的统一出口：回调返回 true 则放弃当前子树继续扫描
fn recover(path: &Path, err: FindError, on_error: &mut ErrorHandler<'_>) -> FindResult<()> {
    if on_error(path, &err) {
        debug!("skipping subtree after error: {}", err);
        Ok(())
    } else {
        Err(err)
    }
}

/// 默认策略：不提供回调时第一个错误即中止扫描
pub(crate) fn abort_on_error(_path: &Path, _err: &FindError) -> bool {
    false
}
