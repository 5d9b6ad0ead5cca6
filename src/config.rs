use crate::models::JobSite;

/// Login credentials for one platform.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Process-wide configuration, built once at startup and passed by
/// reference into every component.
#[derive(Clone, Debug)]
pub struct Config {
    // --- Platform credentials (auto-apply) ---
    pub linkedin: Option<Credentials>,
    pub internshala: Option<Credentials>,
    pub wellfound: Option<Credentials>,
    pub jobright: Option<Credentials>,
    // --- Email notify ---
    pub gmail_user: Option<String>,
    pub gmail_pass: Option<String>,
    pub notify_to: Option<String>,
    pub smtp_host: String,
    // --- LLM scoring ---
    pub groq_api_key: String,
    pub llm_api_base_url: String,
    pub primary_model: String,
    pub fallback_model: String,
    // --- Listing search URLs ---
    pub internshala_search_url: String,
    pub linkedin_search_url: String,
    pub wellfound_search_url: String,
    pub jobright_search_url: String,
    // --- Runtime settings ---
    pub max_jobs_to_apply: usize,
    pub relevance_threshold: u8,
    pub max_jobs_per_site: usize,
    pub headless: bool,
    /// Inter-posting delay, reduces load on target sites
    pub pace_delay_secs: u64,
    /// Bounded wait before declaring an apply control absent
    pub apply_wait_secs: u64,
    /// Step bound for multi-step application wizards
    pub max_apply_steps: usize,
    // --- Files ---
    pub applied_jobs_file: String,
    pub matched_csv: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            linkedin: None,
            internshala: None,
            wellfound: None,
            jobright: None,
            gmail_user: None,
            gmail_pass: None,
            notify_to: None,
            smtp_host: "smtp.gmail.com".to_string(),
            groq_api_key: String::new(),
            llm_api_base_url: "https://api.groq.com/openai/v1".to_string(),
            primary_model: "llama-3.3-70b-versatile".to_string(),
            fallback_model: "llama-3.1-8b-instant".to_string(),
            internshala_search_url: "https://internshala.com/internships/keywords-ai-machine-learning".to_string(),
            linkedin_search_url: "https://www.linkedin.com/jobs/search/?keywords=AI%20Machine%20Learning%20Internship".to_string(),
            wellfound_search_url: "https://wellfound.com/role/machine-learning-intern".to_string(),
            jobright_search_url: "https://www.jobright.ai/jobs?q=machine+learning+intern".to_string(),
            max_jobs_to_apply: 20,
            relevance_threshold: 6,
            max_jobs_per_site: 20,
            headless: false,
            pace_delay_secs: 2,
            apply_wait_secs: 5,
            max_apply_steps: 6,
            applied_jobs_file: "applied_jobs.txt".to_string(),
            matched_csv: "matched_jobs.csv".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        // .env is optional; missing file is fine
        dotenvy::dotenv().ok();

        let default = Self::default();
        Self {
            linkedin: credentials_from_env("LINKEDIN_EMAIL", "LINKEDIN_PASSWORD"),
            internshala: credentials_from_env("INTERNSHALA_EMAIL", "INTERNSHALA_PASSWORD"),
            wellfound: credentials_from_env("WELLFOUND_EMAIL", "WELLFOUND_PASSWORD"),
            jobright: credentials_from_env("JOBRIGHT_EMAIL", "JOBRIGHT_PASSWORD"),
            gmail_user: std::env::var("GMAIL_USER").ok(),
            gmail_pass: std::env::var("GMAIL_PASS").ok(),
            notify_to: std::env::var("NOTIFY_TO").ok(),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(default.smtp_host),
            groq_api_key: std::env::var("GROQ_API_KEY").unwrap_or(default.groq_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            primary_model: std::env::var("PRIMARY_MODEL").unwrap_or(default.primary_model),
            fallback_model: std::env::var("FALLBACK_MODEL").unwrap_or(default.fallback_model),
            internshala_search_url: std::env::var("INTERNSHALA_SEARCH_URL").unwrap_or(default.internshala_search_url),
            linkedin_search_url: std::env::var("LINKEDIN_SEARCH_URL").unwrap_or(default.linkedin_search_url),
            wellfound_search_url: std::env::var("WELLFOUND_SEARCH_URL").unwrap_or(default.wellfound_search_url),
            jobright_search_url: std::env::var("JOBRIGHT_SEARCH_URL").unwrap_or(default.jobright_search_url),
            max_jobs_to_apply: std::env::var("MAX_JOBS_TO_APPLY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_jobs_to_apply),
            relevance_threshold: std::env::var("AI_RELEVANCE_THRESHOLD").ok().and_then(|v| v.parse().ok()).unwrap_or(default.relevance_threshold),
            max_jobs_per_site: std::env::var("MAX_JOBS_PER_SITE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_jobs_per_site),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            pace_delay_secs: std::env::var("PACE_DELAY_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.pace_delay_secs),
            apply_wait_secs: std::env::var("APPLY_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.apply_wait_secs),
            max_apply_steps: std::env::var("MAX_APPLY_STEPS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_apply_steps),
            applied_jobs_file: std::env::var("APPLIED_JOBS_FILE").unwrap_or(default.applied_jobs_file),
            matched_csv: std::env::var("MATCHED_CSV").unwrap_or(default.matched_csv),
        }
    }

    /// Credentials registered for a platform, if any.
    pub fn credentials_for(&self, site: JobSite) -> Option<&Credentials> {
        match site {
            JobSite::LinkedIn => self.linkedin.as_ref(),
            JobSite::Internshala => self.internshala.as_ref(),
            JobSite::Wellfound => self.wellfound.as_ref(),
            JobSite::Jobright => self.jobright.as_ref(),
        }
    }

    /// Listing URL for a platform.
    pub fn search_url_for(&self, site: JobSite) -> &str {
        match site {
            JobSite::LinkedIn => &self.linkedin_search_url,
            JobSite::Internshala => &self.internshala_search_url,
            JobSite::Wellfound => &self.wellfound_search_url,
            JobSite::Jobright => &self.jobright_search_url,
        }
    }
}

/// A credential pair counts as present only when both halves are set.
fn credentials_from_env(email_var: &str, password_var: &str) -> Option<Credentials> {
    let email = std::env::var(email_var).ok().filter(|v| !v.is_empty())?;
    let password = std::env::var(password_var).ok().filter(|v| !v.is_empty())?;
    Some(Credentials { email, password })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_runtime_expectations() {
        let config = Config::default();
        assert_eq!(config.max_jobs_to_apply, 20);
        assert_eq!(config.relevance_threshold, 6);
        assert_eq!(config.max_jobs_per_site, 20);
        assert_eq!(config.max_apply_steps, 6);
        assert_eq!(config.applied_jobs_file, "applied_jobs.txt");
        assert_eq!(config.matched_csv, "matched_jobs.csv");
        assert!(config.linkedin.is_none());
    }

    #[test]
    fn credentials_lookup_by_site() {
        let mut config = Config::default();
        config.internshala = Some(Credentials {
            email: "me@example.com".to_string(),
            password: "secret".to_string(),
        });

        assert!(config.credentials_for(JobSite::Internshala).is_some());
        assert!(config.credentials_for(JobSite::LinkedIn).is_none());
    }

    #[test]
    fn search_url_lookup_by_site() {
        let mut config = Config::default();
        config.wellfound_search_url = "https://wellfound.com/role/ai-intern".to_string();

        assert_eq!(
            config.search_url_for(JobSite::Wellfound),
            "https://wellfound.com/role/ai-intern"
        );
        assert_eq!(
            config.search_url_for(JobSite::Internshala),
            config.internshala_search_url
        );
    }
}
