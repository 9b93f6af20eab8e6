use env_logger::Env;

/// 初始化日誌，`RUST_LOG` 優先於預設等級
pub fn init(default_level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_target(false)
        .format_timestamp(None)
        .init();
}
