use rand::seq::SliceRandom;

const DESKTOP_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
];

const DESKTOP_VIEWPORTS: &[(u32, u32)] = &[(1920, 1080), (1366, 768), (1536, 864), (1440, 900)];

/// The directory is a UK site; present as a UK visitor.
const DEFAULT_LOCALE: &str = "en-GB";

/// Desktop identity the browser presents to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub locale: String,
}

impl FingerprintConfig {
    /// Fixed identity, mainly for reproducible runs.
    pub fn desktop(user_agent: &str, (width, height): (u32, u32)) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            viewport_width: width,
            viewport_height: height,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Desktop agent and viewport drawn at random.
    pub fn randomized() -> Self {
        let mut rng = rand::thread_rng();
        let agent = DESKTOP_AGENTS.choose(&mut rng).copied().unwrap_or(DESKTOP_AGENTS[0]);
        let viewport = DESKTOP_VIEWPORTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(DESKTOP_VIEWPORTS[0]);
        Self::desktop(agent, viewport)
    }

    /// Chromium switches applying this identity.
    pub fn launch_args(&self) -> Vec<String> {
        vec![
            format!("--user-agent={}", self.user_agent),
            format!("--lang={}", self.locale),
            "--disable-dev-shm-usage".to_string(),
        ]
    }
}
