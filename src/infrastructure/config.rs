use crate::domain::chart::ChartTheme;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChartSettings {
    /// Entry cap used when neither the query nor the cookie sets one
    pub default_max_entries: Option<usize>,
    /// Answer 422 for a period with no entries instead of an empty chart
    #[serde(default)]
    pub require_points: bool,
    #[serde(default)]
    pub theme: ChartTheme,
}

/// Load `config/weatherdan.*` (optional) overridden by `WEATHERDAN__*` variables
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(config::File::with_name("config/weatherdan").required(false))
}

fn load_config_from<S>(source: S) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.listen", "0.0.0.0:8080")?
        .set_default("backend.base_url", "http://localhost:8000")?
        .add_source(source)
        .add_source(config::Environment::with_prefix("WEATHERDAN").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
