//! テクスチャロールの定義

use serde::{Deserialize, Serialize};

/// テクスチャロール（インポーター上の用途分類）
///
/// 閉じた集合。未知の分類はこの型に変換せず、呼び出し側で別扱いにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextureRole {
    /// 汎用カラーテクスチャ
    Default,
    /// スプライト（2D）
    Sprite,
    /// 法線マップ
    NormalMap,
    /// ライトマップ
    Lightmap,
    /// ライトクッキー
    Cookie,
    /// 単一チャンネル（マスク等）
    SingleChannel,
    /// エディタ GUI 用
    #[serde(rename = "gui")]
    Gui,
}

impl TextureRole {
    /// 表示名を取得
    pub fn display_name(&self) -> &'static str {
        match self {
            TextureRole::Default => "Default",
            TextureRole::Sprite => "Sprite",
            TextureRole::NormalMap => "NormalMap",
            TextureRole::Lightmap => "Lightmap",
            TextureRole::Cookie => "Cookie",
            TextureRole::SingleChannel => "SingleChannel",
            TextureRole::Gui => "GUI",
        }
    }

    /// 全ロールを取得
    #[cfg(test)]
    pub fn all() -> &'static [TextureRole] {
        &[
            TextureRole::Default,
            TextureRole::Sprite,
            TextureRole::NormalMap,
            TextureRole::Lightmap,
            TextureRole::Cookie,
            TextureRole::SingleChannel,
            TextureRole::Gui,
        ]
    }
}

impl std::fmt::Display for TextureRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
