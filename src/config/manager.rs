//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    CompilerSettings,
    ConfigError,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: CompilerSettings,

    /// 設定ファイルを探したディレクトリ（相対パスの基準）
    base_dir: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: CompilerSettings::default(), base_dir: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `base_dir` - 設定ファイルを探すディレクトリ
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, base_dir: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", base_dir);

        let settings = if let Some(dir) = &base_dir {
            loader::load_from_dir(dir)?.map_or_else(CompilerSettings::default, |loaded| {
                tracing::debug!("Loaded settings file: {:?}", loaded);
                loaded
            })
        } else {
            CompilerSettings::default()
        };

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.base_dir = base_dir;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する（コマンドライン引数による上書き用）
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn update_settings(&mut self, new_settings: CompilerSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &CompilerSettings {
        &self.current_settings
    }

    /// 設定ファイルを探したディレクトリを取得
    #[must_use]
    pub const fn base_dir(&self) -> Option<&PathBuf> {
        self.base_dir.as_ref()
    }

    /// 設定中のパスを基準ディレクトリから解決する
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// 入力ファイルの解決済みパス
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.current_settings.input)
    }

    /// 出力ファイルの解決済みパス
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.current_settings.output)
    }
}
