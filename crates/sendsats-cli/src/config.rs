use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, ConfigError, File};
use sendsats::{Color, ErrorCorrection, RenderOptions, DEFAULT_SCALE};
use sendsats_http_client::HttpClient;
use sendsats_lnbits::LNbitsClient;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORK_DIR: &str = ".sendsats";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Http {
    pub timeout_secs: u64,
    pub proxy: Option<String>,
}

impl Default for Http {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            proxy: None,
        }
    }
}

impl Http {
    pub fn client(&self) -> Result<HttpClient> {
        let mut builder = HttpClient::builder().timeout(Duration::from_secs(self.timeout_secs));

        if let Some(proxy) = self.proxy.as_deref() {
            builder = builder.proxy(proxy.parse()?);
        }

        Ok(builder.build()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Qr {
    pub scale: u32,
    pub module_color: Color,
    pub background_color: Color,
    pub error_correction: ErrorCorrection,
}

impl Default for Qr {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            module_color: Color::BLACK,
            background_color: Color::WHITE,
            error_correction: ErrorCorrection::default(),
        }
    }
}

impl From<&Qr> for RenderOptions {
    fn from(qr: &Qr) -> Self {
        RenderOptions {
            module_color: qr.module_color,
            background_color: qr.background_color,
            scale: qr.scale,
            error_correction: qr.error_correction,
            ..Default::default()
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LNbits {
    pub base_url: String,
    pub invoice_key: String,
    pub admin_key: String,
}

impl std::fmt::Debug for LNbits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &str| if key.is_empty() { "<unset>" } else { "<redacted>" };

        f.debug_struct("LNbits")
            .field("base_url", &self.base_url)
            .field("invoice_key", &redact(&self.invoice_key))
            .field("admin_key", &redact(&self.admin_key))
            .finish()
    }
}

impl LNbits {
    pub fn client(&self, http_client: HttpClient) -> Result<LNbitsClient> {
        if self.base_url.is_empty() {
            bail!("LNbits base url is not set, configure [lnbits] base_url or BASE_URL");
        }

        Ok(
            LNbitsClient::new(&self.base_url, &self.invoice_key, &self.admin_key)?
                .with_http_client(http_client),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub http: Http,
    pub qr: Qr,
    pub lnbits: LNbits,
}

impl Settings {
    /// Defaults, then the config file, then environment variables
    ///
    /// An explicit `config_file_name` must exist, the default `~/.sendsats/config.toml` is
    /// optional.
    pub fn new<P>(config_file_name: Option<P>) -> Result<Self>
    where
        P: Into<PathBuf>,
    {
        let settings = Self::new_from_default(&Settings::default(), config_file_name)?;
        Ok(settings.from_env())
    }

    fn new_from_default<P>(
        default: &Settings,
        config_file_name: Option<P>,
    ) -> Result<Self, ConfigError>
    where
        P: Into<PathBuf>,
    {
        let file = match config_file_name {
            Some(path) => {
                let path: PathBuf = path.into();
                File::from(path).required(true)
            }
            None => match home::home_dir() {
                Some(home_dir) => {
                    File::from(home_dir.join(DEFAULT_WORK_DIR).join("config.toml")).required(false)
                }
                None => return Ok(default.clone()),
            },
        };

        let config: Config = Config::builder()
            // use defaults
            .add_source(Config::try_from(default)?)
            // override with file contents
            .add_source(file)
            .build()?;

        let settings: Settings = config.try_deserialize()?;

        tracing::debug!("Loaded settings {:?}", settings);

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.http.timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(settings.qr.scale, 3);
        assert_eq!(settings.qr.module_color, Color::BLACK);
        assert_eq!(settings.qr.background_color, Color::WHITE);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r##"
[http]
timeout_secs = 5

[qr]
module_color = "#f7931a"

[lnbits]
base_url = "https://lnbits.example/api/v1/payments"
invoice_key = "inv"
"##
        )
        .unwrap();

        let settings =
            Settings::new_from_default(&Settings::default(), Some(file.path())).unwrap();

        assert_eq!(settings.http.timeout_secs, 5);
        assert_eq!(settings.qr.module_color.to_string(), "#f7931a");
        assert_eq!(settings.qr.background_color, Color::WHITE);
        assert_eq!(settings.qr.scale, 3);
        assert_eq!(settings.lnbits.invoice_key, "inv");
        assert!(settings.lnbits.admin_key.is_empty());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result =
            Settings::new_from_default(&Settings::default(), Some("/nonexistent/sendsats.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_lnbits_debug_redacts_keys() {
        let lnbits = LNbits {
            base_url: "https://lnbits.example".to_string(),
            invoice_key: "inv-secret".to_string(),
            admin_key: String::new(),
        };
        let debug = format!("{lnbits:?}");
        assert!(!debug.contains("inv-secret"));
        assert!(debug.contains("<unset>"));
    }

    #[test]
    fn test_lnbits_client_needs_base_url() {
        assert!(LNbits::default().client(HttpClient::new()).is_err());
    }
}
