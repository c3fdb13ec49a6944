//! TextureImporter 設定（.meta ファイル）の読み書き

use super::codes::{
    compression_code, compression_from_code, format_code, format_from_code, role_from_code,
};
use crate::error::{Result, TexoptError};
use crate::policy::{DesiredSettings, PlatformOverride, TextureRole, PLATFORM_FORMATS};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// デフォルトプラットフォームのビルドターゲット名
const DEFAULT_PLATFORM: &str = "DefaultTexturePlatform";

const IMPORTER_KEY: &str = "TextureImporter";
const PLATFORM_SETTINGS_KEY: &str = "platformSettings";
const HEX_ID_LEN: usize = 32;

/// プラットフォーム設定を丸ごと書き込む際の品質値（エディタ既定値）
const OVERRIDE_COMPRESSION_QUALITY: i64 = 50;

// 値が省略されているときのエディタ既定値
const DEFAULT_MAX_TEXTURE_SIZE: i64 = 2048;
const DEFAULT_COMPRESSION: i64 = 1;
const DEFAULT_COMPRESSION_QUALITY: i64 = 50;
const DEFAULT_FORMAT: i64 = -1;

/// 1 アセット分の .meta ファイル
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImporterMeta {
    /// エラー表示用のパス
    path: String,
    root: Value,
}

impl TextureImporterMeta {
    /// .meta ファイルの内容をパース
    ///
    /// `TextureImporter` セクションが無ければ `MissingImporter`。
    pub fn parse(path: impl Into<String>, text: &str) -> Result<Self> {
        let path = path.into();
        let root: Value = serde_yaml::from_str(&quote_hex_ids(text))
            .map_err(|e| TexoptError::invalid_meta(path.clone(), e.to_string()))?;

        let has_importer = root
            .get(IMPORTER_KEY)
            .map(Value::is_mapping)
            .unwrap_or(false);
        if !has_importer {
            return Err(TexoptError::MissingImporter(path));
        }

        Ok(Self { path, root })
    }

    /// アセットの GUID
    pub fn guid(&self) -> Option<&str> {
        self.root.get("guid").and_then(Value::as_str)
    }

    /// `textureType` の生の値（省略時は 0）
    pub fn texture_type(&self) -> Result<i64> {
        Ok(self.read_int(self.importer()?, "textureType")?.unwrap_or(0))
    }

    /// テクスチャロール（閉じた集合に無い種別は None）
    pub fn role(&self) -> Result<Option<TextureRole>> {
        Ok(role_from_code(self.texture_type()?))
    }

    /// デフォルト以外のプラットフォーム設定
    pub fn platform_overrides(&self) -> Result<BTreeMap<String, PlatformOverride>> {
        let mut overrides = BTreeMap::new();
        for entry in self.platform_entries()? {
            let parsed = self.read_override(entry)?;
            if parsed.build_target != DEFAULT_PLATFORM {
                overrides.insert(parsed.build_target.clone(), parsed);
            }
        }
        Ok(overrides)
    }

    /// 現在の設定をポリシー出力と同じ形で取得
    ///
    /// プラットフォーム設定は Standalone / Android / iPhone のうち存在するものだけ。
    pub fn current_settings(&self) -> Result<DesiredSettings> {
        let importer = self.importer()?;
        let default_entry = self.find_platform_entry(DEFAULT_PLATFORM)?;

        // デフォルトプラットフォーム > トップレベル > 既定値
        let global = |key: &str, fallback: i64| -> Result<i64> {
            if let Some(entry) = default_entry {
                if let Some(v) = self.read_int(entry, key)? {
                    return Ok(v);
                }
            }
            Ok(self.read_int(importer, key)?.unwrap_or(fallback))
        };

        let is_readable = self.read_int(importer, "isReadable")?.unwrap_or(0) != 0;
        let max_texture_size = global("maxTextureSize", DEFAULT_MAX_TEXTURE_SIZE)?;
        let compression = global("textureCompression", DEFAULT_COMPRESSION)?;
        let compression_quality = global("compressionQuality", DEFAULT_COMPRESSION_QUALITY)?;
        let crunched = global("crunchedCompression", 0)?;

        let mut platform_overrides = Vec::new();
        for rule in PLATFORM_FORMATS {
            if let Some(entry) = self.find_platform_entry(rule.platform.build_target())? {
                platform_overrides.push(self.read_override(entry)?);
            }
        }

        Ok(DesiredSettings {
            is_readable,
            max_texture_size: clamp_u32(max_texture_size),
            compression: compression_from_code(compression),
            compression_quality: compression_quality.clamp(0, 100) as u8,
            crunched_compression: crunched != 0,
            platform_overrides,
        })
    }

    /// 設定を書き込む
    ///
    /// - 全体設定はデフォルトプラットフォームのエントリに書く（`overridden` は触らない）
    /// - トップレベルの旧形式キーは存在する場合のみ更新
    /// - 対象外のビルドターゲット（WebGL 等）はそのまま残す
    pub fn apply(&mut self, desired: &DesiredSettings) -> Result<()> {
        let path = self.path.clone();
        let importer = self.importer_mut()?;

        set_int(importer, "isReadable", i64::from(desired.is_readable));
        for (key, value) in global_values(desired) {
            if importer.contains_key(key) {
                set_int(importer, key, value);
            }
        }

        let entries = platform_entries_mut(importer, &path)?;

        let default_entry = find_or_push_entry(entries, DEFAULT_PLATFORM, &path)?;
        for (key, value) in global_values(desired) {
            set_int(default_entry, key, value);
        }

        for o in &desired.platform_overrides {
            let entry = find_or_push_entry(entries, &o.build_target, &path)?;
            set_int(entry, "maxTextureSize", i64::from(o.max_texture_size));
            set_int(entry, "textureFormat", format_code(o.format));
            set_int(entry, "textureCompression", compression_code(o.compression));
            set_int(entry, "compressionQuality", OVERRIDE_COMPRESSION_QUALITY);
            set_int(entry, "crunchedCompression", 0);
            set_int(entry, "resizeAlgorithm", 0);
            set_int(entry, "allowsAlphaSplitting", 0);
            set_int(entry, "androidETC2FallbackOverride", 0);
            set_int(entry, "overridden", i64::from(o.overridden));
        }

        Ok(())
    }

    /// 既に書き込み済みかどうか（書き込んでも内容が変わらない）
    pub fn is_applied(&self, desired: &DesiredSettings) -> Result<bool> {
        let mut probe = self.clone();
        probe.apply(desired)?;
        Ok(probe.root == self.root)
    }

    /// YAML 文字列へ戻す
    pub fn to_yaml(&self) -> Result<String> {
        let text = serde_yaml::to_string(&self.root)?;
        Ok(editor_style(&text))
    }

    fn importer(&self) -> Result<&Mapping> {
        self.root
            .get(IMPORTER_KEY)
            .and_then(Value::as_mapping)
            .ok_or_else(|| TexoptError::MissingImporter(self.path.clone()))
    }

    fn importer_mut(&mut self) -> Result<&mut Mapping> {
        let path = self.path.clone();
        self.root
            .get_mut(IMPORTER_KEY)
            .and_then(Value::as_mapping_mut)
            .ok_or(TexoptError::MissingImporter(path))
    }

    fn platform_entries(&self) -> Result<Vec<&Mapping>> {
        let Some(value) = self.importer()?.get(PLATFORM_SETTINGS_KEY) else {
            return Ok(Vec::new());
        };
        if value.is_null() {
            return Ok(Vec::new());
        }
        let seq = value.as_sequence().ok_or_else(|| {
            TexoptError::invalid_meta(self.path.clone(), "platformSettings is not a list")
        })?;
        seq.iter()
            .map(|v| {
                v.as_mapping().ok_or_else(|| {
                    TexoptError::invalid_meta(
                        self.path.clone(),
                        "platformSettings entry is not a mapping",
                    )
                })
            })
            .collect()
    }

    fn find_platform_entry(&self, build_target: &str) -> Result<Option<&Mapping>> {
        Ok(self
            .platform_entries()?
            .into_iter()
            .find(|entry| entry_build_target(entry) == Some(build_target)))
    }

    fn read_override(&self, entry: &Mapping) -> Result<PlatformOverride> {
        let build_target = entry_build_target(entry)
            .ok_or_else(|| {
                TexoptError::invalid_meta(self.path.clone(), "platformSettings entry has no buildTarget")
            })?
            .to_string();

        Ok(PlatformOverride {
            build_target,
            overridden: self.read_int(entry, "overridden")?.unwrap_or(0) != 0,
            max_texture_size: clamp_u32(
                self.read_int(entry, "maxTextureSize")?
                    .unwrap_or(DEFAULT_MAX_TEXTURE_SIZE),
            ),
            compression: compression_from_code(
                self.read_int(entry, "textureCompression")?
                    .unwrap_or(DEFAULT_COMPRESSION),
            ),
            format: format_from_code(self.read_int(entry, "textureFormat")?.unwrap_or(DEFAULT_FORMAT)),
        })
    }

    /// 整数フィールドを読む（無い・空なら None、整数以外はエラー）
    fn read_int(&self, map: &Mapping, key: &str) -> Result<Option<i64>> {
        match map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                TexoptError::invalid_meta(self.path.clone(), format!("{} is not an integer", key))
            }),
        }
    }
}

/// 全体設定として書くキーと値
fn global_values(desired: &DesiredSettings) -> [(&'static str, i64); 4] {
    [
        ("maxTextureSize", i64::from(desired.max_texture_size)),
        ("textureCompression", compression_code(desired.compression)),
        ("compressionQuality", i64::from(desired.compression_quality)),
        ("crunchedCompression", i64::from(desired.crunched_compression)),
    ]
}

fn entry_build_target(entry: &Mapping) -> Option<&str> {
    entry.get("buildTarget").and_then(Value::as_str)
}

fn set_int(map: &mut Mapping, key: &str, value: i64) {
    map.insert(Value::String(key.to_string()), Value::Number(value.into()));
}

fn platform_entries_mut<'a>(importer: &'a mut Mapping, path: &str) -> Result<&'a mut Vec<Value>> {
    let needs_init = importer
        .get(PLATFORM_SETTINGS_KEY)
        .map(Value::is_null)
        .unwrap_or(true);
    if needs_init {
        importer.insert(
            Value::String(PLATFORM_SETTINGS_KEY.to_string()),
            Value::Sequence(Vec::new()),
        );
    }

    importer
        .get_mut(PLATFORM_SETTINGS_KEY)
        .and_then(Value::as_sequence_mut)
        .ok_or_else(|| TexoptError::invalid_meta(path, "platformSettings is not a list"))
}

fn find_or_push_entry<'a>(
    entries: &'a mut Vec<Value>,
    build_target: &str,
    path: &str,
) -> Result<&'a mut Mapping> {
    let position = entries.iter().position(|v| {
        v.as_mapping()
            .and_then(entry_build_target)
            .map(|t| t == build_target)
            .unwrap_or(false)
    });

    let index = match position {
        Some(index) => index,
        None => {
            entries.push(Value::Mapping(new_platform_entry(build_target)));
            entries.len() - 1
        }
    };

    entries[index]
        .as_mapping_mut()
        .ok_or_else(|| TexoptError::invalid_meta(path, "platformSettings entry is not a mapping"))
}

/// エディタが新規作成するときと同じキー順のプラットフォームエントリ
fn new_platform_entry(build_target: &str) -> Mapping {
    let mut entry = Mapping::new();
    set_int(&mut entry, "serializedVersion", 3);
    entry.insert(
        Value::String("buildTarget".to_string()),
        Value::String(build_target.to_string()),
    );
    set_int(&mut entry, "maxTextureSize", DEFAULT_MAX_TEXTURE_SIZE);
    set_int(&mut entry, "resizeAlgorithm", 0);
    set_int(&mut entry, "textureFormat", DEFAULT_FORMAT);
    set_int(&mut entry, "textureCompression", DEFAULT_COMPRESSION);
    set_int(&mut entry, "compressionQuality", DEFAULT_COMPRESSION_QUALITY);
    set_int(&mut entry, "crunchedCompression", 0);
    set_int(&mut entry, "allowsAlphaSplitting", 0);
    set_int(&mut entry, "overridden", 0);
    set_int(&mut entry, "ignorePlatformSupport", 0);
    set_int(&mut entry, "androidETC2FallbackOverride", 0);
    set_int(&mut entry, "forceMaximumCompressionQuality_BC6H_BC7", 0);
    entry
}

/// GUID などの 32 桁の 16 進 ID かどうか
fn is_hex_id(value: &str) -> bool {
    value.len() == HEX_ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// ブロック形式の `key: value` 行を分割する
fn split_scalar_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(": ")?;
    Some((key, value.trim_end()))
}

/// 16 進 ID をクォートしてからパースさせる
///
/// 数字だけの ID や `1234e5678...` の形の ID は YAML では数値として読まれ、
/// 元の文字列に戻せなくなる。
fn quote_hex_ids(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        match split_scalar_line(line) {
            Some((key, value)) if is_hex_id(value) => {
                out.push_str(key);
                out.push_str(": '");
                out.push_str(value);
                out.push('\'');
            }
            _ => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

/// serde_yaml の出力をエディタの書式に寄せる
///
/// - 空のスカラーは `null` ではなく空のまま
/// - クォートされた 16 進 ID はクォートを外す
fn editor_style(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if let Some(stripped) = line.strip_suffix(": null") {
            out.push_str(stripped);
            out.push(':');
        } else if line.trim_start() == "- null" {
            out.push_str(line.trim_end_matches(" null"));
        } else if let Some((key, id)) = split_scalar_line(line).and_then(|(key, value)| {
            unquote(value).filter(|id| is_hex_id(id)).map(|id| (key, id))
        }) {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(id);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

fn unquote(value: &str) -> Option<&str> {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "meta_test.rs"]
mod tests;
