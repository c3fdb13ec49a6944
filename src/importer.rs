//! テクスチャインポーター設定
//!
//! アセットごとの設定は隣接する `.meta` ファイル（YAML）に保存されている。
//! ここではその読み込み・書き換え・書き戻しを扱う。
//! 書き戻すとエディタが変更を検知して再インポートする。

mod codes;
mod meta;

pub use meta::TextureImporterMeta;

use std::path::{Path, PathBuf};

#[cfg(test)]
pub mod fixtures;

/// .meta ファイルの拡張子
const META_EXTENSION: &str = "meta";

/// アセットパスから .meta ファイルのパスを取得
pub fn meta_path_for(asset: &Path) -> PathBuf {
    let mut name = asset.as_os_str().to_os_string();
    name.push(".");
    name.push(META_EXTENSION);
    PathBuf::from(name)
}

/// .meta ファイルのパスならアセットパスへ変換
pub fn asset_path_for(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == META_EXTENSION => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}
