//! 程序入口：初始化日志、解析命令行，加载翻译目录并执行一次编辑

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use fanyi_shu::config::{DEFAULT_FILE_NAME, DEFAULT_LOCALES_DIR};
use fanyi_shu::model::performance;
use fanyi_shu::vm::bridge::*;
use fanyi_shu::{CatalogConfig, CatalogState, LocaleDirStore};

#[derive(Parser, Debug)]
#[command(name = "fanyi_shu", version, about = "多语言翻译目录的树形编辑工具")]
struct Cli {
    /// 语言目录所在的根目录
    #[arg(long, default_value = DEFAULT_LOCALES_DIR)]
    locales_dir: PathBuf,

    /// 语言代码，逗号分隔
    #[arg(long, value_delimiter = ',', default_value = "fr,en")]
    languages: Vec<String>,

    /// 每个语言目录下的文档文件名
    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    file_name: String,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 以树形显示全部翻译
    Show {
        /// 只显示路径或键名包含该字符串的节点
        #[arg(long)]
        filter: Option<String>,
        /// 折叠全部分类
        #[arg(long)]
        collapsed: bool,
    },
    /// 修改某条翻译的某种语言
    Set { path: String, lang: String, value: String },
    /// 删除翻译或整个分类
    Delete { path: String },
    /// 在分类下新增空翻译（parent 为空表示根）
    Add { parent: String, key: String },
    /// 用 a/b/c 一次创建多级分类和末级翻译
    AddCategory { path: String },
    /// 列出缺失的翻译
    Missing,
    /// 输出合并后的树 JSON
    Export,
    /// 从合并后的树 JSON 文件导入并拆分回写
    Import { file: PathBuf },
    /// 在内存中生成数据并测量合并与拆分耗时
    Bench {
        #[arg(long, default_value_t = 4)]
        depth: usize,
        #[arg(long, default_value_t = 30)]
        width: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志输出
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let _ = SubscriberBuilder::default().with_max_level(level).try_init();

    let config = CatalogConfig::new(cli.locales_dir, cli.languages, cli.file_name);

    if let Command::Bench { depth, width } = cli.command {
        for r in performance::run_all(depth, width, &config.languages) {
            println!("{}: {}ms ({})", r.operation, r.duration_ms, r.details);
        }
        return Ok(());
    }

    let store = LocaleDirStore::from_config(&config);
    let mut state = CatalogState::new(config);
    state
        .load_from(&store)
        .with_context(|| format!("{}无法加载翻译目录", STATUS_ERROR_PREFIX))?;
    tracing::info!("{}", STATUS_LOADED);

    match cli.command {
        Command::Show { filter, collapsed } => {
            if collapsed {
                state.set_all_expanded(false);
            }
            if let Some(filter) = filter {
                state.apply_search_filter(&filter);
            }
            print!("{}", render_rows(&state.tree_flat));
        }
        Command::Set { path, lang, value } => state.update_value(&path, &lang, &value)?,
        Command::Delete { path } => state.delete(&path)?,
        Command::Add { parent, key } => state.add_translation(&parent, &key)?,
        Command::AddCategory { path } => state.add_category(&path)?,
        Command::Missing => print!("{}", render_missing(&state.missing_translations())),
        Command::Export => println!("{}", state.export_unified()?),
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("无法读取文件: {}", file.display()))?;
            state.import_unified(&text)?;
        }
        Command::Bench { .. } => {}
    }

    if state.dirty {
        state.save_to(&store).context("回写翻译失败")?;
        println!("{}", STATUS_SAVED);
    } else {
        tracing::debug!("{}", STATUS_NO_CHANGES);
    }
    Ok(())
}
