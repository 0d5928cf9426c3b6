//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    CompilerSettings,
    ConfigError,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".ymo-compiler.json";

/// ディレクトリから設定を読み込む
///
/// `.ymo-compiler.json` ファイルを探して読み込む
///
/// # Arguments
/// * `base_dir` - 設定ファイルを探すディレクトリ
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_dir(base_dir: &Path) -> Result<Option<CompilerSettings>, ConfigError> {
    let config_path = base_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: CompilerSettings = serde_json::from_str(&content)?;
    tracing::debug!(
        encoding = %settings.encoding,
        include_fuzzy = settings.include_fuzzy,
        "Loaded compiler settings"
    );

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::encoding::TextEncoding;

    /// `load_from_dir`: エンコーディング名の読み込み
    #[rstest]
    #[case::utf16le("utf-16le", TextEncoding::Utf16Le)]
    #[case::utf16be("utf-16be", TextEncoding::Utf16Be)]
    #[case::ucs2le("ucs-2le", TextEncoding::Ucs2Le)]
    #[case::ucs2be("ucs-2be", TextEncoding::Ucs2Be)]
    fn test_load_from_dir_encoding_names(#[case] name: &str, #[case] expected: TextEncoding) {
        let temp_dir = TempDir::new().unwrap();
        let config_content = format!(r#"{{"encoding": "{name}", "output": "fr.ymo"}}"#);
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let settings = load_from_dir(temp_dir.path()).unwrap().unwrap();

        assert_eq!(settings.encoding, expected);
        assert_eq!(settings.output, Path::new("fr.ymo"));
        assert_eq!(settings.input, Path::new("t.po"));
    }

    /// `load_from_dir`: 1 バイト単位のエンコーディングは受け付けない
    #[rstest]
    #[case::utf8("utf-8")]
    #[case::upper_case("UTF-16LE")]
    #[case::generic_utf16("utf-16")]
    fn test_load_from_dir_unsupported_encoding(#[case] name: &str) {
        let temp_dir = TempDir::new().unwrap();
        let config_content = format!(r#"{{"encoding": "{name}"}}"#);
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(matches!(
            &result,
            Err(ConfigError::ParseError(e)) if e.to_string().contains(name)
        ));
    }

    /// `load_from_dir`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_dir_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(matches!(result, Ok(None)));
    }

    /// `load_from_dir`: 未知のフィールドは無視される
    #[rstest]
    fn test_load_from_dir_ignores_unknown_fields() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"keySeparator": "."}"#).unwrap();

        let settings = load_from_dir(temp_dir.path()).unwrap().unwrap();

        assert_eq!(settings, CompilerSettings::default());
    }
}
