use tracing_subscriber::EnvFilter;

/// Fallback settings for builds that ship without a `.env` (web, mobile).
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn bundled_pairs(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
}

fn load_bundled_config() {
    for (key, value) in bundled_pairs(BUNDLED_CONFIG) {
        // Real environment wins.
        if std::env::var_os(key).is_none() {
            // SAFETY: runs at startup before any other thread exists.
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    load_dotenv();
    init_tracing();
    tracing::info!(
        configured = folio::ai::AgentConfig::from_env().is_configured(),
        "starting portfolio assistant"
    );
    dioxus::launch(folio::ui::App);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_pairs_skip_comments_and_blanks() {
        let raw = "# comment\n\nGEMINI_API_KEY = abc\nnot a pair\n=orphan\nAI_PROVIDER=groq\n";
        let pairs: Vec<_> = bundled_pairs(raw).collect();
        assert_eq!(pairs, vec![("GEMINI_API_KEY", "abc"), ("AI_PROVIDER", "groq")]);
    }
}
