//! osfind 的命令行接口
//!
//! 本模块负责参数解析和验证，把文本形式的过滤标志
//! （例如带符号的大小记号 `-N`/`+N`/`=N`）转换成类型化的谓词，
//! 再交给遍历引擎。

use std::path::PathBuf;

use clap::Parser;

use crate::errors::FindError;
use crate::finder::filter::{Cmp, SizeFilter};
use crate::finder::Finder;

/// 基于 getdents64 的文件查找工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 搜索根路径
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// 按 inode 编号过滤（可多次指定，任一匹配即可）
    #[arg(long, value_name = "INO")]
    pub inum: Vec<u64>,

    /// 按文件名过滤，精确匹配基本名（可多次指定，任一匹配即可）
    #[arg(long, value_name = "NAME")]
    pub name: Vec<String>,

    /// 按大小过滤：-N 小于 / +N 大于 / =N 等于（可多次指定，全部满足）
    #[arg(long, value_name = "FILTER", value_parser = parse_size_filter, allow_hyphen_values = true)]
    pub size: Vec<SizeFilter>,

    /// 按硬链接数过滤（可多次指定，任一匹配即可）
    #[arg(long, value_name = "NUM")]
    pub nlinks: Vec<u64>,

    /// 用匹配的路径作为参数执行指定程序（替换当前进程）
    #[arg(long, value_name = "PROGRAM")]
    pub exec: Vec<PathBuf>,

    /// 跳过读取失败的子目录并继续扫描
    #[arg(long)]
    pub skip_errors: bool,

    /// 启用调试日志
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// 验证命令行参数
    pub fn validate(&self) -> Result<(), FindError> {
        if !self.path.exists() {
            return Err(FindError::InvalidPath(self.path.clone()));
        }
        Ok(())
    }

    /// 根据参数构建查找器并注册全部过滤器
    pub fn build_finder(&self) -> Finder {
        let mut finder = Finder::new();
        for &inum in &self.inum {
            finder.filter_inum(inum);
        }
        for name in &self.name {
            finder.filter_name(name.clone());
        }
        for &size in &self.size {
            finder.filter_size(size);
        }
        for &nlinks in &self.nlinks {
            finder.filter_nlinks(nlinks);
        }
        finder
    }
}

/// 解析带符号的大小记号：`-N` 小于、`+N` 大于、`=N` 等于
pub fn parse_size_filter(token: &str) -> Result<SizeFilter, String> {
    let cmp = match token.as_bytes().first() {
        Some(b'-') => Cmp::Less,
        Some(b'+') => Cmp::Greater,
        Some(b'=') => Cmp::Equal,
        _ => return Err(format!("无效的大小过滤器 '{token}'，应为 -N、+N 或 =N")),
    };

    let threshold: u64 = token[1..]
        .parse()
        .map_err(|_| format!("无效的大小过滤器 '{token}'，应为 -N、+N 或 =N"))?;

    Ok(SizeFilter::new(threshold, cmp))
}
