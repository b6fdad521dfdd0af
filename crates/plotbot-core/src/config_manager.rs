//! 설정 파일 관리.
//!
//! 플랫폼별 설정 디렉토리에 JSON 파일로 설정을 저장/로드한다.
//! 파일이 없거나 파싱할 수 없으면 기본 설정으로 동작한다.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::BotError;

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "settings.json";

/// 앱 디렉토리 이름
const APP_DIR_NAME: &str = "plotbot";

/// 설정 관리자
///
/// 설정 파일의 로드/저장 및 런타임 설정 변경을 관리한다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 현재 설정 (스레드 안전)
    config: Arc<RwLock<AppConfig>>,
    /// 설정 파일 경로
    config_path: PathBuf,
}

impl ConfigManager {
    /// 새 설정 관리자 생성 및 설정 로드
    ///
    /// 설정 파일이 없으면 기본 설정을 생성하고 저장한다.
    pub fn new() -> Result<Self, BotError> {
        let config_path = Self::default_config_path()?;
        Self::with_path(config_path)
    }

    /// 지정된 경로로 설정 관리자 생성
    pub fn with_path(config_path: PathBuf) -> Result<Self, BotError> {
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    BotError::Config(format!(
                        "설정 디렉토리 생성 실패: {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
                info!("설정 디렉토리 생성: {}", parent.display());
            }
        }

        let config = if config_path.exists() {
            // 깨진 파일은 기본 설정으로 완화 — 파일은 건드리지 않는다
            match Self::load_from_file(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "설정 파일 파싱 실패, 기본 설정으로 계속: {}: {}",
                        config_path.display(),
                        e
                    );
                    AppConfig::default_config()
                }
            }
        } else {
            let default_config = AppConfig::default_config();
            Self::save_to_file(&config_path, &default_config)?;
            info!("기본 설정 파일 생성: {}", config_path.display());
            default_config
        };

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// 플랫폼 기본 설정 파일 경로
    fn default_config_path() -> Result<PathBuf, BotError> {
        let dirs = ProjectDirs::from("", "", APP_DIR_NAME)
            .ok_or_else(|| BotError::Config("설정 디렉토리를 결정할 수 없음".to_string()))?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// 파일에서 설정 로드
    fn load_from_file(path: &PathBuf) -> Result<AppConfig, BotError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| BotError::Config(format!("설정 파일 읽기 실패: {e}")))?;
        let config: AppConfig = serde_json::from_str(&contents)
            .map_err(|e| BotError::Config(format!("설정 파일 파싱 실패: {e}")))?;
        debug!("설정 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 파일에 설정 저장
    fn save_to_file(path: &PathBuf, config: &AppConfig) -> Result<(), BotError> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json)
            .map_err(|e| BotError::Config(format!("설정 파일 저장 실패: {e}")))?;
        Ok(())
    }

    /// 현재 설정의 스냅샷
    pub fn snapshot(&self) -> AppConfig {
        self.config.read().expect("설정 락 오염").clone()
    }

    /// 설정 변경 후 파일에 반영
    pub fn update<F>(&self, mutate: F) -> Result<(), BotError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = self.config.write().expect("설정 락 오염");
        mutate(&mut guard);
        Self::save_to_file(&self.config_path, &guard)
    }

    /// 설정 파일 경로
    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }
}
