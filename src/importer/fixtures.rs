//! テスト用の .meta ファイル内容

/// 一般的なテクスチャの .meta（WebGL のみオーバーライド済み）
pub fn texture_meta(texture_type: i64) -> String {
    format!(
        r#"fileFormatVersion: 2
guid: 5b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e
TextureImporter:
  internalIDToNameTable: []
  externalObjects: {{}}
  serializedVersion: 11
  mipmaps:
    mipMapMode: 0
    enableMipMap: 1
    sRGBTexture: 1
  isReadable: 1
  streamingMipmaps: 0
  maxTextureSize: 2048
  textureSettings:
    serializedVersion: 2
    filterMode: 1
    aniso: 1
  compressionQuality: 50
  spritePixelsToUnits: 100
  alphaTestReferenceValue: 0.5
  textureType: {texture_type}
  spritePackingTag:
  platformSettings:
  - serializedVersion: 3
    buildTarget: DefaultTexturePlatform
    maxTextureSize: 2048
    resizeAlgorithm: 0
    textureFormat: -1
    textureCompression: 1
    compressionQuality: 50
    crunchedCompression: 0
    allowsAlphaSplitting: 0
    overridden: 0
  - serializedVersion: 3
    buildTarget: WebGL
    maxTextureSize: 4096
    resizeAlgorithm: 0
    textureFormat: -1
    textureCompression: 1
    compressionQuality: 50
    crunchedCompression: 0
    allowsAlphaSplitting: 0
    overridden: 1
  userData:
  assetBundleName:
  assetBundleVariant:
"#
    )
}

/// platformSettings を持たない最小の .meta
pub fn minimal_texture_meta() -> String {
    "fileFormatVersion: 2\nguid: 0a0b0c0d0e0f00000000000000000001\nTextureImporter:\n  isReadable: 0\n  textureType: 0\n".to_string()
}

/// テクスチャ以外のアセットの .meta
pub fn non_texture_meta() -> String {
    "fileFormatVersion: 2\nguid: 9f9f9f9f9f9f9f9f9f9f9f9f9f9f9f9f\nDefaultImporter:\n  externalObjects: {}\n  userData:\n".to_string()
}
