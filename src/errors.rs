//! osfind 的自定义错误类型
//!
//! 遍历引擎只区分三类目录级 I/O 错误（打开、读取、元数据查询），
//! 每个错误都携带出错的路径和底层的系统错误。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// 遍历过程中产生的错误
#[derive(Debug, Error)]
pub enum FindError {
    /// 目录打开失败
    #[error("无法打开目录 {}: {}", .path.display(), .source)]
    DirectoryOpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 目录读取失败
    #[error("无法读取目录 {}: {}", .path.display(), .source)]
    DirectoryReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 文件元数据查询失败
    #[error("无法查询文件元数据 {}: {}", .path.display(), .source)]
    MetadataQueryFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 指定的路径无效
    #[error("无效路径: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl FindError {
    /// 返回出错的路径
    pub fn path(&self) -> &PathBuf {
        match self {
            FindError::DirectoryOpenFailed { path, .. }
            | FindError::DirectoryReadFailed { path, .. }
            | FindError::MetadataQueryFailed { path, .. } => path,
            FindError::InvalidPath(path) => path,
        }
    }
}
