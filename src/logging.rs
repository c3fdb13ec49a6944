//! ログ出力の初期化
//!
//! 標準出力はテーブル・プログレスバー用なので、ログは標準エラーへ出す。

use tracing_subscriber::EnvFilter;

/// フィルタを読む環境変数
pub const LOG_ENV: &str = "TEXOPT_LOG";

/// tracing subscriber を初期化
///
/// `TEXOPT_LOG` が設定されていればそれに従う。
/// 未設定なら `--verbose` で debug、通常は warn。
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "texopt=debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(true), "texopt=debug");
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
