use anyhow::Context;

const DEFAULT_DB_PATH: &str = "data/portfolio.db";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

pub struct Config {
    pub db_path: String,
    pub cmc_api_key: String,
    pub moralis_api_key: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
}

impl Config {
    /// Read configuration from the process environment (and `.env`).
    ///
    /// A missing required key is startup-fatal; nothing later in the
    /// program checks for one.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let db_path =
            std::env::var("COINFOLIO_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let cmc_api_key = std::env::var("CMC_API_KEY")
            .context("CMC_API_KEY is required in environment variables")?;
        let moralis_api_key = std::env::var("MORALIS_API_KEY")
            .context("MORALIS_API_KEY is required in environment variables")?;
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY is required in environment variables")?;
        let openai_base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let openai_model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());

        Ok(Self {
            db_path,
            cmc_api_key,
            moralis_api_key,
            openai_api_key,
            openai_base_url,
            openai_model,
        })
    }
}
